//! distload - Distributed Load Driver
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use distload::cluster::{HttpJobConnector, HttpMetadataClient};
use distload::config::{CliArgs, LoadConfig};
use distload::dispatch::LoadDriver;
use distload::progress::{print_header, print_summary};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging(args.verbose)?;

    // Validate and create config
    let config = LoadConfig::from_args(args).context("Invalid configuration")?;

    if !config.quiet {
        print_header(
            config.endpoint.as_str(),
            &config.path,
            config.active_jobs,
        );
    }

    // Construct the remote-side clients
    let meta = HttpMetadataClient::new(config.endpoint.clone(), config.timeout)
        .context("Failed to create metadata client")?;
    let connector = HttpJobConnector::new(config.endpoint.clone(), config.timeout)
        .context("Failed to create job service connector")?;

    // Run the dispatch
    let mut driver = LoadDriver::new(&config, Box::new(meta), Box::new(connector));
    let stats = driver.run().context("Load failed")?;

    if !config.quiet {
        print_summary(&stats);
    }

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("distload=debug,warn")
    } else {
        EnvFilter::new("distload=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
