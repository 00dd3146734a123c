//! Tooling & Integration Layer
//!
//! Command-line entry points and terminal rendering for the content tree.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands, OutputFormat};
