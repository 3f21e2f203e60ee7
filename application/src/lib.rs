//! Application layer for imitation-game
//!
//! This crate contains use cases, port definitions, and game parameters.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{GameParams, GameParamsError};
pub use ports::{
    completion_provider::{CompletionProvider, FallbackAnswers, ProviderError},
    message_bus::{AnnounceError, Announcer, ChannelId, InboundMessage, MemoryAnnouncer},
};
pub use use_cases::automated_player::AutomatedPlayer;
pub use use_cases::collect_round::AnswerCollector;
pub use use_cases::run_session::{SessionCoordinator, SessionError};
