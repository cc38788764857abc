//! Instance construction arguments
//!
//! An instance is built either from up to three positional texts (message,
//! explanation, response) plus optional options, or from options alone.
//! [`ErrorArgs`] makes that choice explicit; [`ErrorArgs::normalize`] applies
//! the slot-detection rule for callers that collect arguments positionally.

use serde_json::Value;

/// Options object: insertion-ordered JSON fields
pub type Options = serde_json::Map<String, Value>;

/// One positional slot
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Text(String),
    Options(Options),
}

impl From<&str> for Arg {
    fn from(text: &str) -> Self {
        Arg::Text(text.to_string())
    }
}

impl From<String> for Arg {
    fn from(text: String) -> Self {
        Arg::Text(text)
    }
}

impl From<Options> for Arg {
    fn from(options: Options) -> Self {
        Arg::Options(options)
    }
}

/// Arguments for instantiating an error type
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorArgs {
    /// Positional texts, each optional, followed by optional options
    Positional {
        message: Option<String>,
        explanation: Option<String>,
        response: Option<String>,
        options: Option<Options>,
    },
    /// Options alone
    Options(Options),
}

impl Default for ErrorArgs {
    fn default() -> Self {
        ErrorArgs::none()
    }
}

impl ErrorArgs {
    /// No arguments: every field falls back to the type's defaults
    pub fn none() -> Self {
        ErrorArgs::Positional {
            message: None,
            explanation: None,
            response: None,
            options: None,
        }
    }

    /// A message only
    pub fn message(message: impl Into<String>) -> Self {
        Self::texts(Some(message.into()), None, None)
    }

    /// Any combination of the three positional texts
    pub fn texts(
        message: Option<String>,
        explanation: Option<String>,
        response: Option<String>,
    ) -> Self {
        ErrorArgs::Positional {
            message,
            explanation,
            response,
            options: None,
        }
    }

    /// Attach options after the positional texts
    ///
    /// Applied to [`ErrorArgs::Options`], the new options replace the old.
    pub fn with_options(self, options: Options) -> Self {
        match self {
            ErrorArgs::Positional {
                message,
                explanation,
                response,
                ..
            } => ErrorArgs::Positional {
                message,
                explanation,
                response,
                options: Some(options),
            },
            ErrorArgs::Options(_) => ErrorArgs::Options(options),
        }
    }

    /// Build arguments from positional slots
    ///
    /// The first of the first three slots holding options is taken as the
    /// options, and that slot and every later slot are cleared. A fourth
    /// slot is read only as trailing options after three texts; anything
    /// beyond it is ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use errforge_core::{Arg, ErrorArgs, Options};
    ///
    /// let mut opts = Options::new();
    /// opts.insert("refID".into(), "a1b2c3".into());
    ///
    /// let args = ErrorArgs::normalize(vec![
    ///     Arg::from("disk full"),
    ///     Arg::from(opts.clone()),
    ///     Arg::from("dropped"),
    /// ]);
    /// assert_eq!(args, ErrorArgs::message("disk full").with_options(opts));
    /// ```
    pub fn normalize(slots: impl IntoIterator<Item = Arg>) -> Self {
        let mut texts: [Option<String>; 3] = [None, None, None];
        let mut options = None;

        for (idx, slot) in slots.into_iter().take(4).enumerate() {
            match slot {
                Arg::Options(found) => {
                    options = Some(found);
                    break;
                }
                Arg::Text(text) if idx < 3 => texts[idx] = Some(text),
                Arg::Text(_) => {}
            }
        }

        let [message, explanation, response] = texts;
        match (message, explanation, response, options) {
            (None, None, None, Some(options)) => ErrorArgs::Options(options),
            (message, explanation, response, options) => ErrorArgs::Positional {
                message,
                explanation,
                response,
                options,
            },
        }
    }

    /// Split into positional texts and options
    pub(crate) fn into_parts(self) -> (Option<String>, Option<String>, Option<String>, Options) {
        match self {
            ErrorArgs::Positional {
                message,
                explanation,
                response,
                options,
            } => (message, explanation, response, options.unwrap_or_default()),
            ErrorArgs::Options(options) => (None, None, None, options),
        }
    }
}

impl From<()> for ErrorArgs {
    fn from(_: ()) -> Self {
        ErrorArgs::none()
    }
}

impl From<&str> for ErrorArgs {
    fn from(message: &str) -> Self {
        ErrorArgs::message(message)
    }
}

impl From<String> for ErrorArgs {
    fn from(message: String) -> Self {
        ErrorArgs::message(message)
    }
}

impl From<Options> for ErrorArgs {
    fn from(options: Options) -> Self {
        ErrorArgs::Options(options)
    }
}

impl From<Value> for ErrorArgs {
    /// Objects become options, strings a message; other values carry nothing
    fn from(value: Value) -> Self {
        match value {
            Value::Object(options) => ErrorArgs::Options(options),
            Value::String(message) => ErrorArgs::message(message),
            _ => ErrorArgs::none(),
        }
    }
}

impl From<Vec<Arg>> for ErrorArgs {
    fn from(slots: Vec<Arg>) -> Self {
        ErrorArgs::normalize(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn opts(value: Value) -> Options {
        match value {
            Value::Object(map) => map,
            _ => Options::new(),
        }
    }

    #[test]
    fn test_options_in_first_slot_clears_the_rest() {
        let o = opts(json!({"message": "from options"}));
        let args = ErrorArgs::normalize(vec![
            Arg::from(o.clone()),
            Arg::from("ignored explanation"),
            Arg::from("ignored response"),
        ]);
        assert_eq!(args, ErrorArgs::Options(o));
    }

    #[test]
    fn test_options_in_second_slot_keeps_message() {
        let o = opts(json!({"status": 501}));
        let args = ErrorArgs::normalize(vec![
            Arg::from("msg"),
            Arg::from(o.clone()),
            Arg::from("ignored"),
        ]);
        assert_eq!(args, ErrorArgs::message("msg").with_options(o));
    }

    #[test]
    fn test_options_in_third_slot() {
        let o = opts(json!({"extra": true}));
        let args = ErrorArgs::normalize(vec![Arg::from("m"), Arg::from("e"), Arg::from(o.clone())]);
        assert_eq!(
            args,
            ErrorArgs::texts(Some("m".into()), Some("e".into()), None).with_options(o)
        );
    }

    #[test]
    fn test_trailing_options_after_three_texts() {
        let o = opts(json!({"extra": 1}));
        let args = ErrorArgs::normalize(vec![
            Arg::from("m"),
            Arg::from("e"),
            Arg::from("r"),
            Arg::from(o.clone()),
            Arg::from(opts(json!({"ignored": 2}))),
        ]);
        assert_eq!(
            args,
            ErrorArgs::texts(Some("m".into()), Some("e".into()), Some("r".into())).with_options(o)
        );
    }

    #[test]
    fn test_fourth_text_slot_ignored() {
        let args = ErrorArgs::normalize(vec![
            Arg::from("m"),
            Arg::from("e"),
            Arg::from("r"),
            Arg::from("extra"),
        ]);
        assert_eq!(
            args,
            ErrorArgs::texts(Some("m".into()), Some("e".into()), Some("r".into()))
        );
    }

    #[test]
    fn test_empty_slots_mean_no_arguments() {
        assert_eq!(ErrorArgs::normalize(Vec::new()), ErrorArgs::none());
        assert_eq!(ErrorArgs::from(()), ErrorArgs::default());
    }

    #[test]
    fn test_value_conversion() {
        assert_eq!(ErrorArgs::from(json!("boom")), ErrorArgs::message("boom"));
        assert_eq!(
            ErrorArgs::from(json!({"msg": "x"})),
            ErrorArgs::Options(opts(json!({"msg": "x"})))
        );
        assert_eq!(ErrorArgs::from(json!(42)), ErrorArgs::none());
    }
}
