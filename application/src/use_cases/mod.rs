//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod automated_player;
pub mod collect_round;
pub mod run_session;
