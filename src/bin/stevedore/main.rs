//! Stevedore CLI - stages a missing native dependency before a build runs

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use stevedore::VendorError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);

        // Surface the failing tool's own output for diagnosis
        if let Some(output) = e
            .downcast_ref::<VendorError>()
            .and_then(VendorError::output)
        {
            let output = output.trim_end();
            if !output.is_empty() {
                eprintln!("{output}");
            }
        }

        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("stevedore=debug")
    } else {
        EnvFilter::new("stevedore=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Ensure(args) => commands::ensure::execute(args),
        Commands::Probe(args) => commands::probe::execute(args),
        Commands::Flags(args) => commands::flags::execute(args),
        Commands::Detect(args) => commands::detect::execute(args),
    }
}
