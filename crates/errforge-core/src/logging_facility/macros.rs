//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use errforge_core::log_op_start;
/// log_op_start!("construct");
/// log_op_start!("construct", type_name = "FatalError");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = errforge_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = errforge_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use errforge_core::log_op_end;
/// log_op_end!("construct", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = errforge_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = errforge_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// # Example
///
/// ```
/// # use errforge_core::{log_op_error, errors::FactoryError};
/// let err = FactoryError::MissingName;
/// log_op_error!("construct", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let err: &$crate::errors::FactoryError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = errforge_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?err.kind(),
            err_code = err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let err: &$crate::errors::FactoryError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = errforge_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?err.kind(),
            err_code = err.code(),
            $($field)*
        );
    }};
}
