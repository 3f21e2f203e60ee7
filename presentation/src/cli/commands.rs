//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for imitation-game
#[derive(Parser, Debug)]
#[command(name = "imitation-game")]
#[command(author, version, about = "The Imitation Game - spot the bot among the players")]
#[command(long_about = r#"
The Imitation Game is a party game played in a chat channel.

Players join, get anonymous numbers, and answer a series of questions.
One extra player is a bot pretending to be human. After the last question
everyone votes on which number is the bot.

This binary plays a local game on the console. Type each message as
`name: text`, for example:

  alice: !join
  bob: !join
  alice: !startgame
  alice: !play
  alice: pizza
  bob: tacos
  alice: !vote 2
  alice: !reveal

Configuration files are loaded from (in priority order):
1. --config <path>        Explicit config file
2. IMITATION_* env vars   e.g. IMITATION_GAME__ROUND_DEADLINE_SECS=20
3. ./imitation.toml       Project-level config
4. ~/.config/imitation-game/config.toml   Global config
"#)]
pub struct Cli {
    /// Channel name the console plays in
    #[arg(long, value_name = "NAME")]
    pub channel: Option<String>,

    /// Seconds each question stays open
    #[arg(long, value_name = "SECS")]
    pub deadline: Option<u64>,

    /// Seed for reproducible label and answer shuffles
    #[arg(long)]
    pub seed: Option<u64>,

    /// Never call the remote provider; the bot uses canned answers
    #[arg(long)]
    pub offline: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
