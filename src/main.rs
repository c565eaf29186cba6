//! apiref - API directive preprocessor and symbol link resolver for Markdown docs.

mod cli;
mod config;
mod directive;
mod logger;
mod model;
mod page;
mod pipeline;
mod render;
mod resolve;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::ApiRefConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = ApiRefConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { build_args } => {
            cli::build::build_pages(&config, build_args)?;
            Ok(())
        }
        Commands::Symbols { args } => cli::symbols::run_symbols(&config, args),
    }
}
