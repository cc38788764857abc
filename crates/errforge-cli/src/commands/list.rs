//! List command
//!
//! Usage: errforge-cli list [--json]

use clap::Args;
use errforge_core::{registered_types, TypeSummary};

use super::{effective_status, lineage};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Print a JSON array of type summaries
    #[arg(long)]
    pub json: bool,
}

/// Execute list command
pub fn execute(args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let types = registered_types();

    if args.json {
        let summaries: Vec<TypeSummary> = types.iter().map(|ty| ty.summary()).collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    for ty in &types {
        println!(
            "{:>6}  {:<36} {:>3}  {}",
            ty.code(),
            ty.name(),
            effective_status(ty),
            lineage(ty)
        );
    }
    Ok(())
}
