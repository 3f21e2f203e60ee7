//! Run Session use case
//!
//! The session coordinator: owns the [`Session`], turns chat commands into
//! state transitions, drives rounds through [`AnswerCollector`], and
//! announces every outcome on the channel.

use crate::config::GameParams;
use crate::ports::message_bus::{Announcer, ChannelId, InboundMessage};
use crate::use_cases::automated_player::AutomatedPlayer;
use crate::use_cases::collect_round::AnswerCollector;
use imitation_domain::{
    Command, CommandParseError, DomainError, Phase, Reveal, Session, UserId,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Errors that abort the current session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session invariant violated: {0}")]
    Invariant(DomainError),
}

/// Single-writer coordinator for one game in one channel
///
/// All state lives in the owned [`Session`] and is only mutated from
/// [`handle_message`](Self::handle_message); a round in progress holds the
/// coordinator, so commands can never interleave with it.
pub struct SessionCoordinator {
    channel: ChannelId,
    params: GameParams,
    session: Session,
    automated: AutomatedPlayer,
    announcer: Arc<dyn Announcer>,
    rng: StdRng,
}

impl SessionCoordinator {
    pub fn new(
        channel: ChannelId,
        params: GameParams,
        automated: AutomatedPlayer,
        announcer: Arc<dyn Announcer>,
    ) -> Self {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            channel,
            session: Session::new(params.prompts.clone()),
            params,
            automated,
            announcer,
            rng,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Process inbound messages until the inbox closes or `cancel` fires
    ///
    /// Cancellation is only observed between commands.
    pub async fn run(&mut self, mut inbox: mpsc::Receiver<InboundMessage>, cancel: CancellationToken) {
        info!("Coordinating game in {}", self.channel);
        loop {
            let message = tokio::select! {
                _ = cancel.cancelled() => break,
                message = inbox.recv() => match message {
                    Some(message) => message,
                    None => break,
                },
            };

            if let Err(e) = self.handle_message(message, &mut inbox).await {
                self.abort_session(e).await;
            }
        }
        info!("Coordinator for {} stopped", self.channel);
    }

    /// Handle one inbound message
    ///
    /// User-input rejections are announced and return `Ok`; an `Err` means
    /// the session is inconsistent and must be discarded.
    pub async fn handle_message(
        &mut self,
        message: InboundMessage,
        inbox: &mut mpsc::Receiver<InboundMessage>,
    ) -> Result<(), SessionError> {
        if message.channel != self.channel {
            return Ok(());
        }
        let command = match Command::parse(&message.text, &self.params.command_prefix) {
            None => return Ok(()),
            Some(Ok(command)) => command,
            Some(Err(e)) => {
                self.reject_usage(&message.author, e).await;
                return Ok(());
            }
        };
        debug!("{} issued {:?} during {}", message.author, command, self.session.phase());

        match self.dispatch(&message.author, command, inbox).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_rejection() => {
                debug!("Rejected {}: {}", command.name(), e);
                let text = self.rejection_text(&message.author, command, &e);
                self.announce(&text).await;
                Ok(())
            }
            Err(e) => Err(SessionError::Invariant(e)),
        }
    }

    async fn dispatch(
        &mut self,
        author: &UserId,
        command: Command,
        inbox: &mut mpsc::Receiver<InboundMessage>,
    ) -> Result<(), DomainError> {
        match command {
            Command::Join => self.join(author).await,
            Command::StartGame => self.start_game().await,
            Command::Play => self.play(inbox).await,
            Command::Vote(number) => self.vote(author, number).await,
            Command::Reveal => self.reveal().await,
            Command::NewGame => self.new_game().await,
            Command::Players => self.players().await,
            Command::Help => self.help().await,
        }
    }

    // ==================== Commands ====================

    async fn join(&mut self, author: &UserId) -> Result<(), DomainError> {
        self.session.join(author.clone())?;
        info!("{} joined ({} players)", author, self.session.registry().roster().len());
        self.announce(&format!("{}: you have joined the game!", author))
            .await;
        Ok(())
    }

    async fn start_game(&mut self) -> Result<(), DomainError> {
        let seats = self.session.start(&mut self.rng)?;
        info!("Game started with {} labelled participants", seats);
        self.announce("🎭 The Imitation Game is starting!").await;
        self.announce(&format!(
            "{} players have been assigned anonymous numbers.",
            seats
        ))
        .await;
        self.announce(&format!(
            "Use {} to start the questions!",
            self.params.command("play")
        ))
        .await;
        Ok(())
    }

    /// Active(i) → … → Voting, one round per remaining prompt
    async fn play(&mut self, inbox: &mut mpsc::Receiver<InboundMessage>) -> Result<(), DomainError> {
        self.session.ensure_playing()?;

        while let Some((index, prompt)) = self.session.current_prompt() {
            let prompt = prompt.clone();
            info!("Round {} started", index + 1);
            self.announce(&format!("**Question {}:** {}", index + 1, prompt))
                .await;
            self.announce(&format!(
                "Players, type your answers now! You have {} seconds.",
                self.params.round_deadline.as_secs()
            ))
            .await;

            let deadline = Instant::now() + self.params.round_deadline;
            let result = {
                let registry = self.session.registry();
                let channel = &self.channel;
                let collector = AnswerCollector::new(
                    registry,
                    &self.automated,
                    self.announcer.as_ref(),
                    channel,
                    &self.params,
                );
                collector
                    .collect_round(&prompt, registry.roster(), deadline, inbox, |m| {
                        m.channel == *channel && registry.is_registered(&m.author)
                    })
                    .await?
            };

            if result.timed_out() {
                self.announce("⏰ Time's up!").await;
            }
            let revealed = result.into_answers().into_shuffled(&mut self.rng);
            let lines = revealed
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n");
            self.announce("📝 Revealed answers for this question:").await;
            self.announce(&lines).await;

            let phase = self.session.complete_round()?;
            debug!("Round {} complete, now {}", index + 1, phase);
        }

        info!("All rounds played, voting open");
        self.announce(&format!(
            "🗳️ Time to vote! Use {} to guess the bot. You get 1 vote each.",
            self.params.command("vote <player#>")
        ))
        .await;
        Ok(())
    }

    async fn vote(&mut self, author: &UserId, number: u32) -> Result<(), DomainError> {
        let label = self.session.cast_vote(author, number)?;
        info!(
            "Vote recorded ({}/{})",
            self.session.tally().len(),
            self.session.registry().roster().len()
        );
        self.announce(&format!("{}: you voted for {}!", author, label))
            .await;
        Ok(())
    }

    async fn reveal(&mut self) -> Result<(), DomainError> {
        let Reveal { automated, winners } = self.session.reveal()?;
        info!("Revealed {} with {} correct guess(es)", automated, winners.len());

        self.announce(&format!("The bot was {}!", automated)).await;
        if winners.is_empty() {
            self.announce("Nobody guessed correctly!").await;
        } else {
            let names = winners
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            self.announce(&format!("🎉 Correct guessers: {}", names))
                .await;
        }
        Ok(())
    }

    async fn new_game(&mut self) -> Result<(), DomainError> {
        self.session.reset();
        info!("Session reset");
        self.announce(&format!(
            "🆕 New game! Use {} to join, then {} to begin.",
            self.params.command("join"),
            self.params.command("startgame")
        ))
        .await;
        Ok(())
    }

    async fn players(&mut self) -> Result<(), DomainError> {
        let text = if self.session.phase().has_started() {
            let labels = self
                .session
                .registry()
                .labels()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("In this game: {}", labels)
        } else {
            format!(
                "{} player(s) joined so far.",
                self.session.registry().roster().len()
            )
        };
        self.announce(&text).await;
        Ok(())
    }

    async fn help(&mut self) -> Result<(), DomainError> {
        let p = &self.params;
        let text = [
            format!("{} join the next game", p.command("join")),
            format!("{} assign anonymous numbers and start", p.command("startgame")),
            format!("{} play all the questions", p.command("play")),
            format!("{} guess which player is the bot", p.command("vote <player#>")),
            format!("{} unmask the bot", p.command("reveal")),
            format!("{} discard this game and start over", p.command("newgame")),
            format!("{} show who is playing", p.command("players")),
        ]
        .join("\n");
        self.announce(&text).await;
        Ok(())
    }

    // ==================== Helpers ====================

    fn rejection_text(&self, author: &UserId, command: Command, error: &DomainError) -> String {
        let p = &self.params;
        let reason = match (command, error) {
            (Command::Join, DomainError::AlreadyStarted) => {
                "Game already started! Wait for the next round.".to_string()
            }
            (_, DomainError::AlreadyStarted) => "Game already running!".to_string(),
            (_, DomainError::DuplicateParticipant) => "You already joined the game!".to_string(),
            (_, DomainError::EmptyRoster) => format!(
                "No players joined yet! Players must use {} first.",
                p.command("join")
            ),
            (_, DomainError::NotStarted) => {
                format!("No game running. Use {} first.", p.command("startgame"))
            }
            (_, DomainError::NotAParticipant) => "You are not in the game!".to_string(),
            (_, DomainError::AlreadyVoted) => "You already voted!".to_string(),
            (_, DomainError::InvalidTarget(_)) => "Invalid player number.".to_string(),
            (_, DomainError::WrongPhase { phase: Phase::Active { .. }, .. }) => format!(
                "The questions aren't finished yet. Use {} to play them.",
                p.command("play")
            ),
            (_, DomainError::WrongPhase { phase: Phase::Voting, .. }) => format!(
                "All questions have been played. Use {} or {}.",
                p.command("vote <player#>"),
                p.command("reveal")
            ),
            (_, DomainError::WrongPhase { phase: Phase::Revealed, .. }) => format!(
                "This game is over. Use {} to play again.",
                p.command("newgame")
            ),
            (_, other) => other.to_string(),
        };
        format!("{}: {}", author, reason)
    }

    async fn reject_usage(&self, author: &UserId, error: CommandParseError) {
        debug!("Malformed command from {}: {}", author, error);
        let text = format!(
            "{}: {}. Usage: {}",
            author,
            error,
            self.params.command("vote <player#>")
        );
        self.announce(&text).await;
    }

    async fn abort_session(&mut self, error: SessionError) {
        error!("Aborting session: {}", error);
        self.session.reset();
        self.announce(&format!(
            "⚠️ Something went wrong and this game was cancelled. Use {} to start over.",
            self.params.command("join")
        ))
        .await;
    }

    async fn announce(&self, text: &str) {
        if let Err(e) = self.announcer.announce(&self.channel, text).await {
            warn!("Failed to announce to {}: {}", self.channel, e);
        }
    }
}
