//! Presentation layer for imitation-game
//!
//! This crate contains the CLI definition and console output.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use output::console::{ConsoleAnnouncer, ConsoleFormatter};
