//! Console announcer for local games

use async_trait::async_trait;
use colored::Colorize;
use imitation_application::{AnnounceError, Announcer, ChannelId};
use std::io::Write;
use std::sync::Mutex;

/// Formats channel announcements for a terminal
#[derive(Debug, Clone, Copy)]
pub struct ConsoleFormatter {
    color: bool,
}

impl ConsoleFormatter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// One announcement, every line prefixed with the channel
    pub fn format(&self, channel: &ChannelId, text: &str) -> String {
        let prefix = format!("[{}]", channel);
        text.lines()
            .map(|line| {
                let line = self.format_line(line);
                if self.color {
                    format!("{} {}", prefix.dimmed(), line)
                } else {
                    format!("{} {}", prefix, line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Only lines opening with `**` are headers; answer text is never restyled
    fn format_line(&self, line: &str) -> String {
        if line.starts_with("**") {
            let plain = line.replace("**", "");
            return if self.color {
                plain.cyan().bold().to_string()
            } else {
                plain
            };
        }
        if !self.color {
            return line.to_string();
        }
        if let Some((label, answer)) = line.split_once(": ") {
            let numbered = label
                .strip_prefix("Player ")
                .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()));
            if numbered {
                return format!("{}: {}", label.yellow().bold(), answer);
            }
        }
        line.to_string()
    }
}

/// [`Announcer`] that prints to a terminal (or any writer)
pub struct ConsoleAnnouncer<W: Write + Send> {
    formatter: ConsoleFormatter,
    out: Mutex<W>,
}

impl ConsoleAnnouncer<std::io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(std::io::stdout(), color)
    }
}

impl<W: Write + Send> ConsoleAnnouncer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            formatter: ConsoleFormatter::new(color),
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|p| p.into_inner())
    }
}

#[async_trait]
impl<W: Write + Send> Announcer for ConsoleAnnouncer<W> {
    async fn announce(&self, channel: &ChannelId, text: &str) -> Result<(), AnnounceError> {
        let rendered = self.formatter.format(channel, text);
        let mut out = self.out.lock().map_err(|_| AnnounceError::Closed)?;
        writeln!(out, "{}", rendered).map_err(|e| AnnounceError::Failed(e.to_string()))?;
        out.flush().map_err(|e| AnnounceError::Failed(e.to_string()))
    }
}
