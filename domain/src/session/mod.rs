//! Game session domain.
//!
//! - [`entities::Session`]: the single owned game state (roster, labels, votes)
//! - [`phase::Phase`]: coarse state machine position
//! - [`command::Command`]: chat commands players can issue

pub mod command;
pub mod entities;
pub mod phase;

pub use command::{Command, CommandParseError};
pub use entities::{Reveal, Session};
pub use phase::Phase;
