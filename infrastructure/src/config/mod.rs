//! Configuration loading for imitation-game
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. `IMITATION_*` environment variables (`__` separates sections)
//! 3. Project root: `./imitation.toml` or `./.imitation.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/imitation-game/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileConsoleConfig, FileGameConfig, FileProviderConfig,
};
pub use loader::ConfigLoader;
