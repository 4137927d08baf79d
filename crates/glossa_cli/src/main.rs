//! Glossa CLI
//!
//! Resolves label references from the command line using the same catalog,
//! loader and cache stack a host application would wire up.

mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::GlossaConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = GlossaConfig::load(cli.config.as_deref())?;
    let output = commands::run(&cli, config)?;
    println!("{output}");
    Ok(())
}

/// `RUST_LOG` wins; otherwise `-v` flags raise the level from `warn`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
