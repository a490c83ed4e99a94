//! vplcfg CLI - Property-path configuration for video acceleration parameter records

use std::io::IsTerminal;

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
        EnvFilter::new("vplcfg=debug")
    } else {
        EnvFilter::new("vplcfg=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let color = !cli.no_color && std::io::stderr().is_terminal();

    // Execute command
    match cli.command {
        Commands::Set(args) => commands::set::execute(args, color),
        Commands::Schema(args) => commands::schema::execute(args),
        Commands::Match(args) => commands::matches::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
