//! The pre-built HTTP error types
//!
//! Every type descends from `HttpError` and uses its status as its code. The
//! catalog is built on first use and lives for the rest of the process.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use errforge_core::{ErrorType, Result, Scope, TypeConfig};
use errforge_core_types::reason_phrase;

/// Name of the base type every HTTP error descends from
pub const BASE_TYPE_NAME: &str = "HttpError";

/// Status reported by instances of the base type
pub const BASE_STATUS: u16 = 500;

/// One pre-built type: its status (also its code), name and default explanation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpDefinition {
    pub status: u16,
    pub name: &'static str,
    pub explanation: &'static str,
}

const fn def(status: u16, name: &'static str, explanation: &'static str) -> HttpDefinition {
    HttpDefinition {
        status,
        name,
        explanation,
    }
}

/// The pre-built types, ordered by status
pub const DEFINITIONS: [HttpDefinition; 23] = [
    def(400, "BadRequestError", "The request could not be understood by the server."),
    def(401, "UnauthorizedError", "The request requires user authentication."),
    def(403, "ForbiddenError", "The server understood the request but refuses to fulfil it."),
    def(404, "NotFoundError", "The requested resource could not be found."),
    def(405, "MethodNotAllowedError", "The method is not allowed for the requested resource."),
    def(406, "NotAcceptableError", "The resource cannot produce a response matching the request's Accept headers."),
    def(407, "ProxyAuthenticationRequiredError", "The client must first authenticate itself with the proxy."),
    def(408, "RequestTimeoutError", "The client did not produce a request within the time the server was prepared to wait."),
    def(409, "ConflictError", "The request conflicts with the current state of the resource."),
    def(410, "GoneError", "The requested resource is no longer available and will not be available again."),
    def(411, "LengthRequiredError", "The request did not specify the length of its content."),
    def(412, "PreconditionFailedError", "A precondition given in the request headers evaluated to false."),
    def(413, "RequestEntityTooLargeError", "The request entity is larger than the server is willing to process."),
    def(414, "RequestUriTooLongError", "The request URI is longer than the server is willing to interpret."),
    def(415, "UnsupportedMediaTypeError", "The request entity has a media type the server does not support."),
    def(416, "RequestedRangeNotSatisfiableError", "The requested range cannot be served for this resource."),
    def(417, "ExpectationFailedError", "The expectation given in the Expect header could not be met."),
    def(500, "InternalServerError", "The server encountered an unexpected condition."),
    def(501, "NotImplementedError", "The server does not support the functionality required to fulfil the request."),
    def(502, "BadGatewayError", "The server received an invalid response from an upstream server."),
    def(503, "ServiceUnavailableError", "The server is temporarily unable to handle the request."),
    def(504, "GatewayTimeoutError", "The server did not receive a timely response from an upstream server."),
    def(505, "HttpVersionNotSupportedError", "The server does not support the HTTP version used in the request."),
];

/// The installed HTTP types
#[derive(Debug)]
pub struct Catalog {
    base: ErrorType,
    by_status: BTreeMap<u16, ErrorType>,
    scope: Arc<Scope>,
}

impl Catalog {
    fn build() -> Result<Self> {
        let scope = Arc::new(Scope::new());
        let base = TypeConfig::new()
            .with_name(BASE_TYPE_NAME)
            .with_status(BASE_STATUS)
            .with_default_message(reason_phrase(u32::from(BASE_STATUS)).unwrap_or_default())
            .with_scope(&scope)
            .construct()?;

        let mut by_status = BTreeMap::new();
        for definition in &DEFINITIONS {
            let mut config = TypeConfig::new()
                .with_name(definition.name)
                .with_parent(&base)
                .with_code(u32::from(definition.status))
                .with_status(definition.status)
                .with_default_explanation(definition.explanation)
                .with_scope(&scope);
            if let Some(phrase) = reason_phrase(u32::from(definition.status)) {
                config = config.with_default_message(phrase);
            }
            by_status.insert(definition.status, config.construct()?);
        }

        tracing::debug!(
            type_name = BASE_TYPE_NAME,
            types = by_status.len(),
            "installed HTTP error catalog"
        );
        Ok(Self {
            base,
            by_status,
            scope,
        })
    }

    /// The `HttpError` base type
    pub fn base(&self) -> &ErrorType {
        &self.base
    }

    /// The pre-built type for `status`, if there is one
    pub fn by_status(&self, status: u16) -> Option<&ErrorType> {
        self.by_status.get(&status)
    }

    /// The pre-built type for `status`, or the base type
    pub fn by_status_or_base(&self, status: u16) -> &ErrorType {
        self.by_status(status).unwrap_or(&self.base)
    }

    /// Namespace holding the base type and every subtype by name
    pub fn scope(&self) -> &Arc<Scope> {
        &self.scope
    }

    /// Every pre-built subtype, ordered by status
    pub fn types(&self) -> impl Iterator<Item = &ErrorType> {
        self.by_status.values()
    }
}

static CATALOG: OnceLock<Catalog> = OnceLock::new();
static INSTALL_LOCK: Mutex<()> = Mutex::new(());

/// Install the HTTP types into the global registry, once
///
/// Later calls return the catalog built by the first.
///
/// # Errors
///
/// Propagates a factory error raised while constructing the types.
pub fn install() -> Result<&'static Catalog> {
    if let Some(catalog) = CATALOG.get() {
        return Ok(catalog);
    }

    // Serialise builders so the registry never sees two catalogs
    let _guard = INSTALL_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(catalog) = CATALOG.get() {
        return Ok(catalog);
    }
    let built = Catalog::build()?;
    Ok(CATALOG.get_or_init(|| built))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definitions_sorted_and_unique() {
        assert!(DEFINITIONS.windows(2).all(|w| w[0].status < w[1].status));
    }

    #[test]
    fn test_every_definition_has_a_reason_phrase() {
        for definition in &DEFINITIONS {
            assert!(
                reason_phrase(u32::from(definition.status)).is_some(),
                "no reason phrase for {}",
                definition.status
            );
            assert!(definition.name.ends_with("Error"));
        }
    }

    #[test]
    fn test_install_is_idempotent() {
        let first = install().unwrap();
        let second = install().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.types().count(), DEFINITIONS.len());
    }

    #[test]
    fn test_unknown_status_falls_back_to_base() {
        let catalog = install().unwrap();
        assert!(catalog.by_status(418).is_none());
        assert_eq!(catalog.by_status_or_base(418), catalog.base());
    }
}
