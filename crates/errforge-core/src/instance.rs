//! Error instances and the construction protocol every factory-built type shares

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::sync::OnceLock;

use errforge_core_types::is_known_status;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::args::{ErrorArgs, Options};
use crate::descriptor::ErrorType;
use crate::errors::{FactoryError, Result};
use crate::registry;

/// Status reported when neither the instance, the type nor the code supply one
pub const FALLBACK_STATUS: u16 = 500;

/// Option keys that may never be supplied through options, in check order
pub const PROTECTED_KEYS: [&str; 3] = ["stack", "name", "code"];

/// Option keys read by the protocol itself and never copied as extra fields
const CONSUMED_KEYS: [&str; 7] = [
    "msg",
    "message",
    "expl",
    "explanation",
    "fix",
    "response",
    "status",
];

/// An instance of a factory-built error type
///
/// Every field is fixed at construction. The stack text is formatted on first
/// access and cached.
pub struct ErrorInstance {
    error_type: ErrorType,
    message: String,
    explanation: Option<String>,
    response: Option<String>,
    code: u32,
    status: u16,
    extra: Options,
    backtrace: Backtrace,
    stack: OnceLock<String>,
}

impl ErrorType {
    /// Construct an instance of this type
    ///
    /// Each text field resolves, first match wins, from the positional value,
    /// then the short option key (`msg`, `expl`, `fix`), then the long one
    /// (`message`, `explanation`, `response`), then the type's default.
    /// Remaining option keys become extra fields. A successful construction
    /// registers the type again under its name and code, reclaiming entries a
    /// later explicit-code or same-name type displaced.
    ///
    /// # Errors
    ///
    /// Returns `ProtectedOverride` if the options contain `stack`, `name` or
    /// `code`; nothing is constructed in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use errforge_core::TypeConfig;
    /// use serde_json::json;
    ///
    /// let ty = TypeConfig::new().with_name("InstanceDocError").construct().unwrap();
    /// let err = ty
    ///     .instantiate(json!({"message": "x", "status": 501, "refID": "a1b2c3"}))
    ///     .unwrap();
    ///
    /// assert_eq!(err.status(), 501);
    /// assert_eq!(err.get("refID"), Some(json!("a1b2c3")));
    /// assert_eq!(err.to_json()["refID"], "a1b2c3");
    /// ```
    pub fn instantiate(&self, args: impl Into<ErrorArgs>) -> Result<ErrorInstance> {
        let (message, explanation, response, options) = args.into().into_parts();

        if let Some(key) = PROTECTED_KEYS.iter().find(|key| options.contains_key(**key)) {
            tracing::debug!(
                type_name = self.name(),
                key = *key,
                "rejected protected option"
            );
            return Err(FactoryError::ProtectedOverride {
                key: (*key).to_string(),
            });
        }

        Ok(self.install(message, explanation, response, options))
    }

    /// Construct an instance with every field at its default
    pub fn default_instance(&self) -> ErrorInstance {
        self.install(None, None, None, Options::new())
    }

    fn install(
        &self,
        message: Option<String>,
        explanation: Option<String>,
        response: Option<String>,
        options: Options,
    ) -> ErrorInstance {
        // Frames are always captured; the toggle only decides whether they print
        let backtrace = Backtrace::force_capture();

        let message = message
            .or_else(|| text_option(&options, "msg", "message"))
            .unwrap_or_else(|| self.default_message().to_string());
        let explanation = explanation
            .or_else(|| text_option(&options, "expl", "explanation"))
            .or_else(|| self.default_explanation().map(str::to_string));
        let response = response
            .or_else(|| text_option(&options, "fix", "response"))
            .or_else(|| self.default_response().map(str::to_string));
        let status = status_option(&options)
            .or(self.status_code())
            .unwrap_or_else(|| status_for_code(self.code()));

        let extra = options
            .into_iter()
            .filter(|(key, _)| !CONSUMED_KEYS.contains(&key.as_str()))
            .collect();

        let instance = ErrorInstance {
            error_type: self.clone(),
            message,
            explanation,
            response,
            code: self.code(),
            status,
            extra,
            backtrace,
            stack: OnceLock::new(),
        };

        let displaced = registry::register(self.name(), self.code(), self.clone());
        if !displaced.is_empty() {
            tracing::debug!(
                type_name = self.name(),
                type_code = self.code(),
                "instance reclaimed its registry entries"
            );
        }
        instance
    }
}

fn text_option(options: &Options, short: &str, long: &str) -> Option<String> {
    [short, long]
        .iter()
        .find_map(|key| options.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

fn status_option(options: &Options) -> Option<u16> {
    options
        .get("status")
        .and_then(Value::as_u64)
        .and_then(|status| u16::try_from(status).ok())
}

/// Derive an HTTP status from an error code: the code itself when it is a
/// recognised status, otherwise [`FALLBACK_STATUS`]
pub fn status_for_code(code: u32) -> u16 {
    u16::try_from(code)
        .ok()
        .filter(|_| is_known_status(code))
        .unwrap_or(FALLBACK_STATUS)
}

impl ErrorInstance {
    /// Get the type this instance was built from
    pub fn error_type(&self) -> &ErrorType {
        &self.error_type
    }

    /// Get the type name
    pub fn name(&self) -> &str {
        self.error_type.name()
    }

    /// Get the message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the explanation, if any
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    /// Get the response, if any
    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    /// Get the error code
    pub fn code(&self) -> u32 {
        self.code
    }

    /// Get the HTTP status to report
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Get the caller-supplied extra fields, in insertion order
    pub fn extra(&self) -> &Options {
        &self.extra
    }

    /// Get the stack text: a `<name>: <message>` header followed by the
    /// captured frames, when frames were captured
    pub fn stack(&self) -> &str {
        self.stack.get_or_init(|| {
            let header = format!("{}: {}", self.name(), self.message);
            match self.backtrace.status() {
                BacktraceStatus::Captured => format!("{}\n{}", header, self.backtrace),
                _ => header,
            }
        })
    }

    /// Get any property by key, protocol fields and extra fields alike
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            "name" => Some(Value::from(self.name())),
            "message" => Some(Value::from(self.message.as_str())),
            "explanation" => self.explanation.as_deref().map(Value::from),
            "response" => self.response.as_deref().map(Value::from),
            "code" => Some(Value::from(self.code)),
            "status" => Some(Value::from(self.status)),
            "stack" => Some(Value::from(self.stack())),
            _ => self.extra.get(key).cloned(),
        }
    }

    /// Whether this instance's type is `ty` or descends from it
    pub fn is_instance_of(&self, ty: &ErrorType) -> bool {
        self.error_type.is_subtype_of(ty)
    }

    /// Structured copy of the instance, as produced by its type's formatter
    pub fn to_json(&self) -> Value {
        self.error_type.formatter().to_json(self)
    }
}

impl fmt::Display for ErrorInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.error_type.formatter().format(self))
    }
}

impl fmt::Debug for ErrorInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorInstance")
            .field("name", &self.name())
            .field("message", &self.message)
            .field("explanation", &self.explanation)
            .field("response", &self.response)
            .field("code", &self.code)
            .field("status", &self.status)
            .field("extra", &self.extra)
            .finish()
    }
}

impl std::error::Error for ErrorInstance {}

impl Serialize for ErrorInstance {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Anything that can be asked whether it carries a named field
pub trait ErrorShape {
    /// Whether a field named `key` is present
    fn has_field(&self, key: &str) -> bool;
}

impl ErrorShape for Value {
    fn has_field(&self, key: &str) -> bool {
        self.as_object().is_some_and(|fields| fields.contains_key(key))
    }
}

impl ErrorShape for Options {
    fn has_field(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

impl ErrorShape for ErrorInstance {
    fn has_field(&self, key: &str) -> bool {
        matches!(
            key,
            "name" | "message" | "explanation" | "response" | "code" | "status" | "stack"
        ) || self.extra.contains_key(key)
    }
}

/// Structural error check: a value carrying both `explanation` and `code`
pub fn is_error<T: ErrorShape + ?Sized>(value: &T) -> bool {
    value.has_field("explanation") && value.has_field("code")
}
