//! The type factory
//!
//! `construct` builds a new error type under a parent, assigns it a code and
//! default texts, and registers it by name and code.

use std::sync::{Arc, RwLock};
use std::time::Instant;

use crate::descriptor::{Descriptor, ErrorType};
use crate::errors::{FactoryError, Result};
use crate::registry;
use crate::scope::Scope;
use crate::{log_op_end, log_op_error, log_op_start};

/// Name reported for the platform error type at the root of every hierarchy
pub const ROOT_TYPE_NAME: &str = "Error";

/// Configuration for [`construct`]
///
/// Positional arguments to `construct` take precedence over the matching
/// fields here.
#[derive(Debug, Clone, Default)]
pub struct TypeConfig {
    name: Option<String>,
    parent: Option<ErrorType>,
    code: Option<u32>,
    status: Option<u16>,
    default_message: Option<String>,
    default_explanation: Option<String>,
    default_response: Option<String>,
    scope: Option<Arc<Scope>>,
}

impl TypeConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the type name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the parent type
    pub fn with_parent(mut self, parent: &ErrorType) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    /// Set an explicit code instead of allocating one
    pub fn with_code(mut self, code: u32) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the default HTTP status for instances
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the default message
    pub fn with_default_message(mut self, message: impl Into<String>) -> Self {
        self.default_message = Some(message.into());
        self
    }

    /// Set the default explanation
    pub fn with_default_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.default_explanation = Some(explanation.into());
        self
    }

    /// Set the default response
    pub fn with_default_response(mut self, response: impl Into<String>) -> Self {
        self.default_response = Some(response.into());
        self
    }

    /// Also install the new type into `scope`
    pub fn with_scope(mut self, scope: &Arc<Scope>) -> Self {
        self.scope = Some(Arc::clone(scope));
        self
    }

    /// Construct a type from this configuration alone
    ///
    /// # Errors
    ///
    /// Returns `MissingName` if no name was configured.
    pub fn construct(self) -> Result<ErrorType> {
        construct(None, None, self)
    }
}

/// Create and register a new error type
///
/// `parent` and `name` take precedence over `config.parent` and
/// `config.name`. Without a parent the type descends directly from the
/// platform error type; without a code one is allocated from 600 upward.
/// When no default message is configured, `"An unexpected <name> occurred."`
/// is used, built from the resolved name.
///
/// # Errors
///
/// Returns `MissingName` if neither `name` nor `config.name` is a non-blank
/// string.
///
/// # Example
///
/// ```
/// use errforge_core::{construct, TypeConfig};
///
/// let fatal = TypeConfig::new().with_name("DocFatalError").construct().unwrap();
/// let db = construct(
///     Some(&fatal),
///     None,
///     TypeConfig::new()
///         .with_name("DocFatalDBError")
///         .with_default_message("A Fatal Database Error Occurred."),
/// )
/// .unwrap();
///
/// assert!(fatal.code() >= 600);
/// assert_ne!(db.code(), fatal.code());
/// assert!(db.is_subtype_of(&fatal));
/// ```
pub fn construct(
    parent: Option<&ErrorType>,
    name: Option<&str>,
    config: TypeConfig,
) -> Result<ErrorType> {
    let started = Instant::now();
    log_op_start!("construct");

    let Some(name) = resolve_name(name, config.name.as_deref()) else {
        let err = FactoryError::MissingName;
        log_op_error!("construct", err, duration_ms = elapsed_ms(started));
        return Err(err);
    };

    let parent = parent.cloned().or(config.parent);
    let default_message = config
        .default_message
        .unwrap_or_else(|| format!("An unexpected {} occurred.", name));

    // Allocation and registration share one lock so concurrent calls cannot
    // be handed the same free code.
    let (ty, displaced) = {
        let mut registry = registry::global();
        let code = config.code.unwrap_or_else(|| registry.next_free_code());
        let ty = ErrorType::from_descriptor(Descriptor {
            name: name.clone(),
            parent,
            code,
            status_code: config.status,
            default_message,
            default_explanation: config.default_explanation,
            default_response: config.default_response,
            formatter: RwLock::new(None),
        });
        let displaced = registry.register(&name, code, ty.clone());
        (ty, displaced)
    };

    if let Some(previous) = &displaced.by_code {
        tracing::warn!(
            type_name = ty.name(),
            type_code = ty.code(),
            replaced = previous.name(),
            "code already registered; replacing previous type"
        );
    }
    if let Some(previous) = &displaced.by_name {
        tracing::warn!(
            type_name = ty.name(),
            type_code = ty.code(),
            replaced_code = previous.code(),
            "name already registered; replacing previous type"
        );
    }

    if let Some(scope) = &config.scope {
        scope.insert(ty.clone());
    }

    log_op_end!(
        "construct",
        duration_ms = elapsed_ms(started),
        type_name = ty.name(),
        type_code = ty.code(),
        parent = ty.parent().map_or(ROOT_TYPE_NAME, ErrorType::name),
    );
    Ok(ty)
}

fn resolve_name(positional: Option<&str>, configured: Option<&str>) -> Option<String> {
    positional
        .filter(|n| !n.trim().is_empty())
        .or_else(|| configured.filter(|n| !n.trim().is_empty()))
        .map(str::to_string)
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_name_prefers_positional() {
        assert_eq!(
            resolve_name(Some("Positional"), Some("Configured")),
            Some("Positional".to_string())
        );
        assert_eq!(
            resolve_name(None, Some("Configured")),
            Some("Configured".to_string())
        );
        assert_eq!(
            resolve_name(Some("  "), Some("Configured")),
            Some("Configured".to_string())
        );
        assert_eq!(resolve_name(None, None), None);
        assert_eq!(resolve_name(Some(""), Some("\t")), None);
    }

    #[test]
    fn test_construct_without_name_fails() {
        let err = construct(None, None, TypeConfig::new().with_code(1)).unwrap_err();
        assert_eq!(err, FactoryError::MissingName);
    }

    #[test]
    fn test_default_message_uses_positional_name() {
        let ty = construct(None, Some("FactoryUnitPositionalError"), TypeConfig::new()).unwrap();
        assert_eq!(
            ty.default_message(),
            "An unexpected FactoryUnitPositionalError occurred."
        );
    }

    #[test]
    fn test_positional_parent_beats_configured_parent() {
        let a = construct(None, Some("FactoryUnitA"), TypeConfig::new()).unwrap();
        let b = construct(None, Some("FactoryUnitB"), TypeConfig::new()).unwrap();
        let child = construct(
            Some(&a),
            Some("FactoryUnitChild"),
            TypeConfig::new().with_parent(&b),
        )
        .unwrap();
        assert_eq!(child.parent(), Some(&a));
        assert!(!child.is_subtype_of(&b));
    }

    #[test]
    fn test_scope_receives_new_type() {
        let scope = Arc::new(Scope::new());
        let ty = TypeConfig::new()
            .with_name("FactoryUnitScopedError")
            .with_scope(&scope)
            .construct()
            .unwrap();
        assert_eq!(scope.get("FactoryUnitScopedError"), Some(ty));
        assert_eq!(scope.len(), 1);
    }
}
