//! Unembed - extract embedded resources from a static HTML document.

#![allow(dead_code)]

mod cli;
mod config;
mod document;
mod extract;
mod logger;
mod pipeline;
mod rewrite;
mod scan;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::Config;
use scan::ResourceKind;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.verbose);

    let config = Config::load(&cli.config)?;

    match &cli.command {
        Commands::Extract { args } => cli::extract::extract_all(args, &config),
        Commands::Styles { args } => cli::extract::extract_kind(args, &config, ResourceKind::Style),
        Commands::Images { args } => cli::extract::extract_kind(args, &config, ResourceKind::Image),
        Commands::Fonts { args } => cli::extract::extract_kind(args, &config, ResourceKind::Font),
        Commands::Consolidate { args } => cli::consolidate::run(args, &config),
    }
}
