//! Lowercase convenience constructors, one per pre-built type
//!
//! Each takes a message and optional data, folding the data into the `data`
//! extra field of the new instance.

use errforge_core::{ErrorArgs, ErrorInstance, Options, Result};
use serde_json::Value;

use crate::catalog::install;

/// Status whose instances are marked as developer errors
const DEVELOPER_ERROR_STATUS: u16 = 505;

/// Construct an instance of the pre-built type for `status`
///
/// Statuses without a pre-built type produce an `HttpError` reporting that
/// status.
///
/// # Errors
///
/// Propagates a factory error raised while installing the catalog.
pub fn http_error(status: u16, message: impl Into<String>, data: Option<Value>) -> Result<ErrorInstance> {
    let catalog = install()?;
    let ty = catalog.by_status_or_base(status);

    let mut options = Options::new();
    if ty == catalog.base() {
        options.insert("status".to_string(), Value::from(status));
    }
    if let Some(data) = data {
        options.insert("data".to_string(), data);
    }
    if status == DEVELOPER_ERROR_STATUS {
        options.insert("developer_error".to_string(), Value::Bool(true));
    }

    ty.instantiate(ErrorArgs::message(message).with_options(options))
}

macro_rules! http_constructors {
    ($($fn_name:ident => $status:literal),* $(,)?) => {
        $(
            #[doc = concat!("Construct a ", stringify!($status), " error carrying `data`")]
            ///
            /// # Errors
            ///
            /// Propagates a factory error raised while installing the catalog.
            pub fn $fn_name(message: impl Into<String>, data: Option<Value>) -> Result<ErrorInstance> {
                http_error($status, message, data)
            }
        )*
    };
}

http_constructors! {
    bad_request => 400,
    unauthorized => 401,
    forbidden => 403,
    not_found => 404,
    method_not_allowed => 405,
    not_acceptable => 406,
    proxy_authentication_required => 407,
    request_timeout => 408,
    conflict => 409,
    gone => 410,
    length_required => 411,
    precondition_failed => 412,
    request_entity_too_large => 413,
    request_uri_too_long => 414,
    unsupported_media_type => 415,
    requested_range_not_satisfiable => 416,
    expectation_failed => 417,
    internal_server_error => 500,
    not_implemented => 501,
    bad_gateway => 502,
    service_unavailable => 503,
    gateway_timeout => 504,
    http_version_not_supported => 505,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_folded_into_extra_field() {
        let err = conflict("Duplicate key", Some(json!({"key": "id"}))).unwrap();
        assert_eq!(err.get("data"), Some(json!({"key": "id"})));
        assert_eq!(err.extra().len(), 1);
    }

    #[test]
    fn test_no_data_no_extra_field() {
        let err = gone("Removed", None).unwrap();
        assert!(err.extra().is_empty());
        assert_eq!(err.get("developer_error"), None);
    }

    #[test]
    fn test_unlisted_status_uses_base_type() {
        let err = http_error(418, "Short and stout", None).unwrap();
        assert_eq!(err.name(), "HttpError");
        assert_eq!(err.status(), 418);
    }
}
