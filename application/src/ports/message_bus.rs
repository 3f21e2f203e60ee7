//! Message bus port
//!
//! Inbound chat messages arrive on a `tokio::sync::mpsc` channel of
//! [`InboundMessage`]; outbound text goes through an [`Announcer`].

use async_trait::async_trait;
use imitation_domain::UserId;
use std::sync::Mutex;
use thiserror::Error;

/// A chat channel (or any conversation context) on the transport
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A message delivered by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub author: UserId,
    pub channel: ChannelId,
    pub text: String,
}

impl InboundMessage {
    pub fn new(author: impl Into<String>, channel: &ChannelId, text: impl Into<String>) -> Self {
        Self {
            author: UserId::new(author),
            channel: channel.clone(),
            text: text.into(),
        }
    }
}

/// Errors that can occur while sending outbound text
#[derive(Error, Debug)]
pub enum AnnounceError {
    #[error("Transport closed")]
    Closed,

    #[error("Send failed: {0}")]
    Failed(String),
}

/// Outbound half of the message bus
#[async_trait]
pub trait Announcer: Send + Sync {
    /// Send plain text to everyone in `channel`
    async fn announce(&self, channel: &ChannelId, text: &str) -> Result<(), AnnounceError>;
}

/// Announcer that keeps everything in memory
///
/// Useful for embedding the game in another transport and for tests.
#[derive(Default)]
pub struct MemoryAnnouncer {
    sent: Mutex<Vec<(ChannelId, String)>>,
}

impl MemoryAnnouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts sent so far, oldest first
    pub fn texts(&self) -> Vec<String> {
        self.lock().iter().map(|(_, text)| text.clone()).collect()
    }

    /// Remove and return everything sent so far
    pub fn drain(&self) -> Vec<String> {
        self.lock().drain(..).map(|(_, text)| text).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(ChannelId, String)>> {
        self.sent.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Announcer for MemoryAnnouncer {
    async fn announce(&self, channel: &ChannelId, text: &str) -> Result<(), AnnounceError> {
        self.lock().push((channel.clone(), text.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_announcer_records_in_order() {
        let channel = ChannelId::new("lobby");
        let announcer = MemoryAnnouncer::new();
        announcer.announce(&channel, "first").await.unwrap();
        announcer.announce(&channel, "second").await.unwrap();

        assert_eq!(announcer.texts(), vec!["first", "second"]);
        assert_eq!(announcer.drain().len(), 2);
        assert!(announcer.texts().is_empty());
    }

    #[test]
    fn test_channel_display() {
        assert_eq!(ChannelId::new("lobby").to_string(), "#lobby");
    }
}
