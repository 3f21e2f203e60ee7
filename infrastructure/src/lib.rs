//! Infrastructure layer for imitation-game
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod providers;
pub mod transport;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileConsoleConfig, FileGameConfig,
    FileProviderConfig,
};
pub use providers::{ProviderBuildError, remote_provider};
pub use transport::{ConsoleTransport, classify_line};
