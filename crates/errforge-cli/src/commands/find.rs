//! Find command
//!
//! Usage: errforge-cli find <KEY> [--json]

use clap::Args;
use errforge_core::{find, Key};

use super::{effective_status, lineage};

#[derive(Debug, Args)]
pub struct FindArgs {
    /// Numeric code or type name
    pub key: String,

    /// Print the type summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute find command
pub fn execute(args: FindArgs) -> Result<(), Box<dyn std::error::Error>> {
    let key = Key::parse(&args.key);
    let ty = find(key.clone()).ok_or_else(|| format!("No error type registered for {}", key))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ty.summary())?);
        return Ok(());
    }

    println!("Name: {}", ty.name());
    println!("Code: {}", ty.code());
    println!("Status: {}", effective_status(&ty));
    println!("Lineage: {}", lineage(&ty));
    println!("Default message: {}", ty.default_message());
    if let Some(explanation) = ty.default_explanation() {
        println!("Default explanation: {}", explanation);
    }
    if let Some(response) = ty.default_response() {
        println!("Default response: {}", response);
    }
    Ok(())
}
