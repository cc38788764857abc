use thiserror::Error;

/// Result type alias using FactoryError
pub type Result<T> = std::result::Result<T, FactoryError>;

/// Canonical error kind taxonomy
///
/// Every failure the factory can raise maps to one of these kinds, and each
/// kind maps to a stable error code usable by callers, tests and log queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactoryErrorKind {
    // Type creation
    MissingName,

    // Instance construction
    ProtectedOverride,
}

impl FactoryErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            FactoryErrorKind::MissingName => "ERR_MISSING_NAME",
            FactoryErrorKind::ProtectedOverride => "ERR_PROTECTED_OVERRIDE",
        }
    }
}

/// Errors raised by the type factory and the instance protocol
///
/// Both are fatal to the call in progress and never retried internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
    /// `construct` was called without a positional name or `config.name`
    #[error("An error type requires a name")]
    MissingName,

    /// The options form tried to supply `stack`, `name` or `code`
    #[error("Property \"{key}\" cannot be overridden; \"stack\", \"name\" and \"code\" are protected")]
    ProtectedOverride { key: String },
}

impl FactoryError {
    /// Get the error kind
    pub fn kind(&self) -> FactoryErrorKind {
        match self {
            FactoryError::MissingName => FactoryErrorKind::MissingName,
            FactoryError::ProtectedOverride { .. } => FactoryErrorKind::ProtectedOverride,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}
