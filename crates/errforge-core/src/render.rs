//! String and structured representations of error instances
//!
//! Both representations consult the stack-trace toggle when they run.

use serde_json::Value;

use crate::args::Options;
use crate::instance::ErrorInstance;
use crate::stacks::stacks_enabled;

/// Representation of error instances
///
/// Install an implementation on a type with
/// [`ErrorType::set_formatter`](crate::ErrorType::set_formatter) to customise
/// how that type and its descendants print. Both methods default to the
/// standard representation, so an override may replace just one.
pub trait ErrorFormatter: Send + Sync {
    /// Render the instance as text
    fn format(&self, error: &ErrorInstance) -> String {
        format_default(error)
    }

    /// Render the instance as a structured object
    fn to_json(&self, error: &ErrorInstance) -> Value {
        json_default(error)
    }
}

/// The standard representation
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

impl ErrorFormatter for DefaultFormatter {}

/// Standard text form
///
/// ```text
/// <name>: <message>
/// Code: <code>
/// Explanation: <explanation>   (when non-empty)
/// Response: <response>         (when non-empty)
/// <key>: <value>               (one line per extra field)
/// <stack>                      (when stacks are enabled)
/// ```
pub fn format_default(error: &ErrorInstance) -> String {
    let mut out = format!("{}: {}\nCode: {}", error.name(), error.message(), error.code());

    if let Some(explanation) = error.explanation().filter(|e| !e.is_empty()) {
        out.push_str(&format!("\nExplanation: {}", explanation));
    }
    if let Some(response) = error.response().filter(|r| !r.is_empty()) {
        out.push_str(&format!("\nResponse: {}", response));
    }
    for (key, value) in error.extra() {
        out.push_str(&format!("\n{}: {}", key, display_value(value)));
    }
    if stacks_enabled() {
        out.push('\n');
        out.push_str(error.stack());
    }
    out
}

/// Standard structured form
///
/// Protocol fields come first (`explanation` and `response` as `null` when
/// absent), then extra fields in insertion order, then `stack` when stacks
/// are enabled.
pub fn json_default(error: &ErrorInstance) -> Value {
    let mut fields = Options::new();
    fields.insert(
        "explanation".to_string(),
        error.explanation().map_or(Value::Null, Value::from),
    );
    fields.insert(
        "response".to_string(),
        error.response().map_or(Value::Null, Value::from),
    );
    fields.insert("code".to_string(), Value::from(error.code()));
    fields.insert("status".to_string(), Value::from(error.status()));
    fields.insert("name".to_string(), Value::from(error.name()));
    fields.insert("message".to_string(), Value::from(error.message()));
    for (key, value) in error.extra() {
        fields.insert(key.clone(), value.clone());
    }
    if stacks_enabled() {
        fields.insert("stack".to_string(), Value::from(error.stack()));
    }
    Value::Object(fields)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
