//! Inbound message transports
//!
//! A transport turns some external source of chat lines into
//! [`InboundMessage`](imitation_application::InboundMessage)s on the
//! coordinator's inbox.

pub mod console;

pub use console::{ConsoleLine, ConsoleTransport, classify_line};
