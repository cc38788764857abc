//! errforge CLI
//!
//! Command-line interface for inspecting and rendering registered error types

use clap::{Parser, Subcommand};
use errforge_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "errforge-cli")]
#[command(about = "errforge - hierarchical error type registry", long_about = None)]
struct Cli {
    /// Emit debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Logging profile for stderr output: dev, prod (JSON) or test
    #[arg(long, global = true, value_name = "PROFILE", value_parser = parse_profile)]
    log_profile: Option<Profile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List every registered error type by code
    List(commands::list::ListArgs),
    /// Describe one error type by code or name
    Find(commands::find::FindArgs),
    /// Construct an instance and print it
    Render(commands::render::RenderArgs),
}

fn main() {
    let cli = Cli::parse();

    // An explicit profile wins over --verbose
    if let Some(profile) = cli
        .log_profile
        .or_else(|| cli.verbose.then_some(Profile::Development))
    {
        init(profile);
    }
    errforge_core::stacks::init_from_env();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn parse_profile(raw: &str) -> Result<Profile, String> {
    Profile::parse(raw).ok_or_else(|| format!("unknown log profile '{}'", raw))
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    // Lookups and listings always see the HTTP types
    errforge_http::install()?;

    match command {
        Commands::List(args) => commands::list::execute(args),
        Commands::Find(args) => commands::find::execute(args),
        Commands::Render(args) => commands::render::execute(args),
    }
}
