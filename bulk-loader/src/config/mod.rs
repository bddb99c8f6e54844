//! Command-line arguments and dependency wiring.

mod cli;
mod dependencies;

pub use cli::Cli;
pub use dependencies::Dependencies;
