//! Render command
//!
//! Usage: errforge-cli render <KEY> [--message M] [--explanation E] [--response R]
//!        [--status S] [--field k=v]... [--json] [--stacks]

use clap::Args;
use errforge_core::{find, set_stacks, ErrorArgs, Key, Options};
use serde_json::Value;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Numeric code or type name
    pub key: String,

    /// Instance message (defaults to the type's message)
    #[arg(short, long)]
    pub message: Option<String>,

    /// Instance explanation
    #[arg(short, long)]
    pub explanation: Option<String>,

    /// Instance response
    #[arg(short, long)]
    pub response: Option<String>,

    /// HTTP status override
    #[arg(short, long)]
    pub status: Option<u16>,

    /// Extra field; the value is read as JSON when it parses, else as text
    #[arg(short, long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, Value)>,

    /// Print the structured form instead of text
    #[arg(long)]
    pub json: bool,

    /// Include the captured stack
    #[arg(long)]
    pub stacks: bool,
}

/// Execute render command
pub fn execute(args: RenderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let key = Key::parse(&args.key);
    let ty = find(key.clone()).ok_or_else(|| format!("No error type registered for {}", key))?;

    if args.stacks {
        set_stacks(true);
    }

    let mut options: Options = args.fields.into_iter().collect();
    if let Some(status) = args.status {
        options.insert("status".to_string(), Value::from(status));
    }

    let instance = ty.instantiate(
        ErrorArgs::texts(args.message, args.explanation, args.response).with_options(options),
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&instance.to_json())?);
    } else {
        println!("{}", instance);
    }
    Ok(())
}

fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{}'", raw));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_field_json_and_text_values() {
        assert_eq!(parse_field("count=3"), Ok(("count".to_string(), json!(3))));
        assert_eq!(
            parse_field("user=alice"),
            Ok(("user".to_string(), json!("alice")))
        );
        assert_eq!(
            parse_field("tags=[\"a\"]"),
            Ok(("tags".to_string(), json!(["a"])))
        );
        assert_eq!(parse_field("eq=a=b"), Ok(("eq".to_string(), json!("a=b"))));
    }

    #[test]
    fn test_parse_field_rejects_malformed_input() {
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=1").is_err());
    }
}
