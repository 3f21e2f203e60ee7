//! Application-level configuration.
//!
//! - [`GameParams`]: round timing, command prefix and the prompt sequence

pub mod game_params;

pub use game_params::{GameParams, GameParamsError};
