//! Chat command parsing

use thiserror::Error;

/// A command issued by a chat user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Join,
    StartGame,
    Play,
    Vote(u32),
    Reveal,
    NewGame,
    Players,
    Help,
}

/// A prefixed message that names a known command but is malformed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("missing player number")]
    MissingVoteTarget,

    #[error("'{0}' is not a player number")]
    InvalidVoteTarget(String),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Join => "join",
            Command::StartGame => "startgame",
            Command::Play => "play",
            Command::Vote(_) => "vote",
            Command::Reveal => "reveal",
            Command::NewGame => "newgame",
            Command::Players => "players",
            Command::Help => "help",
        }
    }

    /// Parse a chat message
    ///
    /// Returns `None` when the message is not a command at all: no prefix, or
    /// an unknown command word (other bots may share the prefix).
    pub fn parse(text: &str, prefix: &str) -> Option<Result<Command, CommandParseError>> {
        let body = text.trim().strip_prefix(prefix)?;
        let mut words = body.split_whitespace();
        let word = words.next()?.to_lowercase();

        let command = match word.as_str() {
            "join" => Command::Join,
            "startgame" => Command::StartGame,
            "play" => Command::Play,
            "reveal" => Command::Reveal,
            "newgame" => Command::NewGame,
            "players" => Command::Players,
            "help" => Command::Help,
            "vote" => {
                return Some(match words.next() {
                    None => Err(CommandParseError::MissingVoteTarget),
                    Some(arg) => arg
                        .parse::<u32>()
                        .map(Command::Vote)
                        .map_err(|_| CommandParseError::InvalidVoteTarget(arg.to_string())),
                });
            }
            _ => return None,
        };
        Some(Ok(command))
    }

    /// Whether `text` is addressed to this game at all
    pub fn is_command(text: &str, prefix: &str) -> bool {
        Self::parse(text, prefix).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("!join", "!"), Some(Ok(Command::Join)));
        assert_eq!(Command::parse("!startgame", "!"), Some(Ok(Command::StartGame)));
        assert_eq!(Command::parse("  !PLAY ", "!"), Some(Ok(Command::Play)));
        assert_eq!(Command::parse("!reveal now", "!"), Some(Ok(Command::Reveal)));
        assert_eq!(Command::parse("!newgame", "!"), Some(Ok(Command::NewGame)));
    }

    #[test]
    fn test_parse_vote() {
        assert_eq!(Command::parse("!vote 3", "!"), Some(Ok(Command::Vote(3))));
        assert_eq!(
            Command::parse("!vote", "!"),
            Some(Err(CommandParseError::MissingVoteTarget))
        );
        assert_eq!(
            Command::parse("!vote three", "!"),
            Some(Err(CommandParseError::InvalidVoteTarget("three".to_string())))
        );
        assert_eq!(
            Command::parse("!vote -1", "!"),
            Some(Err(CommandParseError::InvalidVoteTarget("-1".to_string())))
        );
    }

    #[test]
    fn test_non_commands() {
        assert_eq!(Command::parse("pizza", "!"), None);
        assert_eq!(Command::parse("!", "!"), None);
        assert_eq!(Command::parse("!dance", "!"), None);
        assert_eq!(Command::parse("join", "!"), None);
        assert!(!Command::is_command("I'd join a band", "!"));
    }

    #[test]
    fn test_custom_prefix() {
        assert_eq!(Command::parse("/join", "/"), Some(Ok(Command::Join)));
        assert_eq!(Command::parse("!join", "/"), None);
    }
}
