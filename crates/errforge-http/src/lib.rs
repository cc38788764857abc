//! errforge HTTP - pre-built HTTP error types
//!
//! An `HttpError` base type with one subtype per common client and server
//! status. Each subtype's code is its status and its default message is the
//! status reason phrase.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//!
//! let err = errforge_http::bad_request("Missing data", Some(json!({"type": "user"}))).unwrap();
//!
//! assert_eq!(err.code(), 400);
//! assert_eq!(err.status(), 400);
//! assert_eq!(err.get("data").unwrap()["type"], "user");
//! ```

pub mod catalog;
pub mod constructors;

pub use catalog::{install, Catalog, HttpDefinition, BASE_TYPE_NAME, DEFINITIONS};
pub use constructors::*;

use std::sync::Arc;

use errforge_core::{ErrorType, Result, Scope};

/// Namespace holding every HTTP type by name
///
/// # Errors
///
/// Propagates a factory error raised while installing the catalog.
pub fn scope() -> Result<Arc<Scope>> {
    Ok(Arc::clone(install()?.scope()))
}

/// The pre-built type for `status`
///
/// # Errors
///
/// Propagates a factory error raised while installing the catalog.
pub fn by_status(status: u16) -> Result<Option<ErrorType>> {
    Ok(install()?.by_status(status).cloned())
}
