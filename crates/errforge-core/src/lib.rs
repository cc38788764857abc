//! errforge Core - runtime factory for hierarchical error types
//!
//! This crate provides:
//! - A type factory (`construct`) building error types under a parent type
//! - A process-wide registry resolving types by numeric code or by name
//! - The instance protocol shared by every factory-built type
//! - Text and structured representations with an optional captured stack
//! - A canonical structured logging facility
//!
//! # Example
//!
//! ```
//! use errforge_core::{find, TypeConfig};
//!
//! let fatal = TypeConfig::new().with_name("FatalError").construct().unwrap();
//! let err = fatal.default_instance();
//!
//! assert!(err.code() > 599);
//! assert_eq!(err.status(), 500);
//! assert_eq!(err.message(), "An unexpected FatalError occurred.");
//! assert_eq!(find("FatalError"), Some(fatal));
//! ```

pub mod args;
pub mod descriptor;
pub mod errors;
pub mod factory;
pub mod instance;
pub mod logging_facility;
pub mod registry;
pub mod render;
pub mod scope;
pub mod stacks;

// Re-export commonly used types
pub use args::{Arg, ErrorArgs, Options};
pub use descriptor::{ErrorType, TypeSummary};
pub use errors::{FactoryError, FactoryErrorKind, Result};
pub use factory::{construct, TypeConfig};
pub use instance::{is_error, ErrorInstance, ErrorShape};
pub use registry::{find, find_by_code, find_by_name, next_free_code, registered_types, Key};
pub use render::{DefaultFormatter, ErrorFormatter};
pub use scope::Scope;
pub use stacks::{set_stacks, stacks, stacks_enabled};
