//! Line-based console transport for local play.
//!
//! Every stdin line of the form `name: text` becomes an inbound message
//! from user `name` in the configured channel, so several people can share
//! one terminal.

use imitation_application::{ChannelId, InboundMessage};
use std::io::BufRead;
use std::thread::JoinHandle;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Classification of one console line.
#[derive(Debug, PartialEq, Eq)]
pub enum ConsoleLine<'a> {
    /// `name: text`, both parts trimmed and non-empty
    Message { author: &'a str, text: &'a str },
    /// Whitespace only
    Blank,
    /// Anything without an author prefix
    Unattributed,
}

/// Split a console line into author and text.
pub fn classify_line(line: &str) -> ConsoleLine<'_> {
    let line = line.trim();
    if line.is_empty() {
        return ConsoleLine::Blank;
    }
    match line.split_once(':') {
        Some((author, text)) => {
            let author = author.trim();
            let text = text.trim();
            if author.is_empty() || text.is_empty() || author.contains(char::is_whitespace) {
                ConsoleLine::Unattributed
            } else {
                ConsoleLine::Message { author, text }
            }
        }
        None => ConsoleLine::Unattributed,
    }
}

/// Reads console lines and forwards them to the coordinator's inbox.
///
/// Reading happens on a dedicated thread so a blocked terminal read never
/// holds up runtime shutdown.
pub struct ConsoleTransport {
    channel: ChannelId,
}

impl ConsoleTransport {
    pub fn new(channel: ChannelId) -> Self {
        Self { channel }
    }

    /// Start reading process stdin.
    pub fn spawn_stdin(self, inbox: mpsc::Sender<InboundMessage>) -> JoinHandle<()> {
        self.spawn_reader(std::io::BufReader::new(std::io::stdin()), inbox)
    }

    /// Forward lines from `reader` until EOF, a read error, or the inbox closes.
    ///
    /// The sender is dropped when the thread ends, which closes the inbox.
    pub fn spawn_reader<R>(self, reader: R, inbox: mpsc::Sender<InboundMessage>) -> JoinHandle<()>
    where
        R: BufRead + Send + 'static,
    {
        std::thread::spawn(move || {
            for line in reader.lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("Console read error: {}", e);
                        break;
                    }
                };
                let Some(message) = self.to_message(&line) else {
                    continue;
                };
                if inbox.blocking_send(message).is_err() {
                    debug!("Inbox closed, console transport stopping");
                    break;
                }
            }
            debug!("Console input closed");
        })
    }

    fn to_message(&self, line: &str) -> Option<InboundMessage> {
        match classify_line(line) {
            ConsoleLine::Message { author, text } => {
                Some(InboundMessage::new(author, &self.channel, text))
            }
            ConsoleLine::Blank => None,
            ConsoleLine::Unattributed => {
                eprintln!("(type messages as `name: text`, e.g. `alice: !join`)");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_message() {
        assert_eq!(
            classify_line("alice: !join\n"),
            ConsoleLine::Message {
                author: "alice",
                text: "!join"
            }
        );
        assert_eq!(
            classify_line("  bob :  pizza: obviously "),
            ConsoleLine::Message {
                author: "bob",
                text: "pizza: obviously"
            }
        );
    }

    #[test]
    fn test_classify_rejects_unattributed() {
        assert_eq!(classify_line("   \n"), ConsoleLine::Blank);
        assert_eq!(classify_line("!join"), ConsoleLine::Unattributed);
        assert_eq!(classify_line(": hello"), ConsoleLine::Unattributed);
        assert_eq!(classify_line("alice:   "), ConsoleLine::Unattributed);
        assert_eq!(classify_line("the answer is: pizza"), ConsoleLine::Unattributed);
    }

    #[test]
    fn test_reader_forwards_messages() {
        let transport = ConsoleTransport::new(ChannelId::new("lobby"));
        let input = std::io::Cursor::new("alice: !join\nnot a message\n\nbob: Blue\n");
        let (tx, mut rx) = mpsc::channel(8);

        transport.spawn_reader(input, tx).join().unwrap();

        let first = rx.try_recv().unwrap();
        assert_eq!(first.author.as_str(), "alice");
        assert_eq!(first.channel, ChannelId::new("lobby"));
        assert_eq!(first.text, "!join");
        let second = rx.try_recv().unwrap();
        assert_eq!(second.author.as_str(), "bob");
        assert_eq!(second.text, "Blue");
        // Sender dropped at EOF
        assert!(matches!(
            rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
    }

    #[test]
    fn test_reader_stops_when_inbox_closes() {
        let transport = ConsoleTransport::new(ChannelId::new("lobby"));
        let input = std::io::Cursor::new("alice: one\nalice: two\n");
        let (tx, rx) = mpsc::channel(8);
        drop(rx);

        // Returns instead of blocking on the closed inbox
        transport.spawn_reader(input, tx).join().unwrap();
    }
}
