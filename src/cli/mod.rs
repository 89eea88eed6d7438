//! Command-line interface module.

mod args;
pub mod consolidate;
pub mod extract;

pub use args::{Cli, Commands, ConsolidateArgs, ExtractArgs};
