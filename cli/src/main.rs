//! CLI entrypoint for the Imitation Game
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use imitation_application::{AutomatedPlayer, ChannelId, SessionCoordinator};
use imitation_infrastructure::{ConfigLoader, ConsoleTransport, FileConfig, remote_provider};
use imitation_presentation::{Cli, ConsoleAnnouncer};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const INBOX_CAPACITY: usize = 256;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("failed to load configuration: {}", e))?
    };
    apply_overrides(&mut config, &cli);
    config.validate().context("invalid configuration")?;

    let params = config.to_game_params()?;
    let fallback = config.fallback_answers()?;

    // === Dependency Injection ===
    let mut automated = AutomatedPlayer::new(fallback).with_timeout(params.provider_timeout);
    match remote_provider(&config.provider) {
        Ok(provider) => {
            info!("Automated player answers through {}", provider.name());
            automated = automated.with_provider(provider);
        }
        Err(e) => warn!("Remote provider unavailable, using canned answers only: {}", e),
    }
    info!(remote = automated.has_provider(), "Automated player ready");

    let channel = ChannelId::new(config.console.channel.clone());
    let announcer = Arc::new(ConsoleAnnouncer::stdout(!cli.no_color));
    let (inbox_tx, inbox_rx) = mpsc::channel(INBOX_CAPACITY);
    let cancel = CancellationToken::new();

    let _reader = ConsoleTransport::new(channel.clone()).spawn_stdin(inbox_tx);
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupted, shutting down");
                cancel.cancel();
            }
        }
    });

    println!("The Imitation Game in {}", channel);
    println!(
        "Type messages as `name: text`. Try `alice: {}join` or `alice: {}help`.",
        params.command_prefix, params.command_prefix
    );

    let mut coordinator = SessionCoordinator::new(channel, params, automated, announcer);
    // A round in progress only sees the token once it finishes
    tokio::select! {
        _ = coordinator.run(inbox_rx, cancel.clone()) => {}
        _ = cancel.cancelled() => {}
    }

    Ok(())
}

/// Command-line flags take precedence over every config source
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(channel) = &cli.channel {
        config.console.channel = channel.clone();
    }
    if let Some(deadline) = cli.deadline {
        config.game.round_deadline_secs = deadline;
    }
    if let Some(seed) = cli.seed {
        config.game.seed = Some(seed);
    }
    if cli.offline {
        config.provider.enabled = false;
    }
}
