//! Trellis CLI - platform families and target resolution

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("trellis=debug")
    } else {
        EnvFilter::new("trellis=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Platforms => commands::platforms::execute(),
        Commands::Family(args) => commands::family::execute(args),
        Commands::Resolve(args) => commands::resolve::execute(args),
        Commands::Plugins => commands::plugins::execute(),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
