//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Unembed CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: unembed.toml)
    #[arg(short = 'C', long, default_value = "unembed.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Show per-resource diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Extract inline styles, embedded images and fonts in one run
    #[command(visible_alias = "x")]
    Extract {
        #[command(flatten)]
        args: ExtractArgs,
    },

    /// Extract inline <style> blocks only
    Styles {
        #[command(flatten)]
        args: ExtractArgs,
    },

    /// Extract base64 image data URIs only
    Images {
        #[command(flatten)]
        args: ExtractArgs,
    },

    /// Extract base64 fonts from @font-face rules only
    Fonts {
        #[command(flatten)]
        args: ExtractArgs,
    },

    /// Replace generated per-block stylesheet links with one consolidated link
    ///
    /// Assumes the consolidated stylesheet has already been produced
    /// externally by concatenating the numbered files; this command only
    /// rewrites the document.
    #[command(visible_alias = "c")]
    Consolidate {
        #[command(flatten)]
        args: ConsolidateArgs,
    },
}

/// Shared arguments for the extraction commands
#[derive(clap::Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Input HTML document
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output path for the rewritten document (default: rewrite input in place)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Write an unmodified backup copy of the input first
    #[arg(short, long)]
    pub backup: bool,

    /// Override the configured assets root directory name
    #[arg(long, value_name = "DIR")]
    pub assets_dir: Option<String>,
}

/// Consolidation command arguments
#[derive(clap::Args, Debug, Clone)]
pub struct ConsolidateArgs {
    /// Input HTML document
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output path for the rewritten document (default: rewrite input in place)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Override the configured assets root directory name
    #[arg(long, value_name = "DIR")]
    pub assets_dir: Option<String>,
}
