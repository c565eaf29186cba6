//! Command-line interface module.

mod args;
pub mod build;
pub mod symbols;

pub use args::{BuildArgs, Cli, Commands, SymbolsArgs};
