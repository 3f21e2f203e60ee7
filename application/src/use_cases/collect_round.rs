//! Collect Round use case
//!
//! Gathers at most one answer per human for a single prompt, paces in the
//! automated player's answer after the first human replies, and resolves
//! within a hard deadline measured from the round start.

use crate::config::GameParams;
use crate::ports::message_bus::{Announcer, ChannelId, InboundMessage};
use crate::use_cases::automated_player::AutomatedPlayer;
use futures::future::BoxFuture;
use imitation_domain::{
    CollectResult, Command, DomainError, IdentityRegistry, Label, Participant, Prompt,
    RoundAnswers, UserId,
};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep, sleep_until};
use tracing::{debug, info, warn};

/// What an inbound message means for the round in progress
enum Incoming {
    Ignored,
    Command,
    Answer(Label),
}

/// Collects the answers for one prompt
///
/// Borrows the session's identities for the duration of the round; the
/// returned answers are keyed by [`Label`] only.
pub struct AnswerCollector<'a> {
    registry: &'a IdentityRegistry,
    automated: &'a AutomatedPlayer,
    announcer: &'a dyn Announcer,
    channel: &'a ChannelId,
    params: &'a GameParams,
}

impl<'a> AnswerCollector<'a> {
    pub fn new(
        registry: &'a IdentityRegistry,
        automated: &'a AutomatedPlayer,
        announcer: &'a dyn Announcer,
        channel: &'a ChannelId,
        params: &'a GameParams,
    ) -> Self {
        Self {
            registry,
            automated,
            announcer,
            channel,
            params,
        }
    }

    /// Run one round
    ///
    /// `accept` decides whose plain messages count as answers. Commands seen
    /// in the channel while collecting are rejected with a notice. Returns
    /// [`CollectResult::Completed`] once every human has answered and the
    /// automated answer is in; on deadline, missing humans get the
    /// placeholder and the automated entry is taken from the fallback
    /// answers so it is always present and the deadline is never exceeded.
    ///
    /// Entries are keyed and ordered by label; reveal them through
    /// [`RoundAnswers::into_shuffled`].
    ///
    /// Fails only if a participant has no label, which is a coordinator bug.
    pub async fn collect_round<F>(
        &self,
        prompt: &Prompt,
        humans: &[UserId],
        deadline: Instant,
        inbox: &mut mpsc::Receiver<InboundMessage>,
        accept: F,
    ) -> Result<CollectResult, DomainError>
    where
        F: Fn(&InboundMessage) -> bool,
    {
        let human_labels = humans
            .iter()
            .map(|user| {
                let label = self.registry.label_for(&Participant::Human(user.clone()))?;
                Ok((user.clone(), label))
            })
            .collect::<Result<HashMap<UserId, Label>, DomainError>>()?;
        let automated_label = self.registry.automated_label()?;

        let mut answers = RoundAnswers::new();
        let mut answered = 0usize;
        let mut automated_done = false;
        let mut pending: Option<BoxFuture<'_, String>> = None;
        let mut inbox_open = true;

        let expired = sleep_until(deadline);
        tokio::pin!(expired);

        let timed_out = loop {
            if answered == human_labels.len() && automated_done {
                break false;
            }

            tokio::select! {
                biased;

                _ = &mut expired => break true,

                answer = next_pending(&mut pending) => {
                    pending = None;
                    automated_done = true;
                    answers.record(automated_label, answer);
                    debug!("Automated answer recorded");
                }

                received = inbox.recv(), if inbox_open => match received {
                    None => {
                        debug!("Inbox closed, waiting for the round to finish");
                        inbox_open = false;
                    }
                    Some(message) => match self.classify(&message, &accept, &human_labels) {
                        Incoming::Ignored => {}
                        Incoming::Command => self.reject_command(&message).await,
                        Incoming::Answer(label) => {
                            if answers.record(label, message.text.trim()) {
                                answered += 1;
                                debug!("{} answered ({}/{})", label, answered, human_labels.len());
                                if pending.is_none() && !automated_done {
                                    pending = Some(Box::pin(self.paced_answer(prompt)));
                                }
                            } else {
                                debug!("Ignoring repeat answer from {}", label);
                            }
                        }
                    },
                },
            }
        };

        if !automated_done {
            // The deadline is hard: no provider call may outlive it
            drop(pending);
            info!("Deadline reached before the automated answer, using a fallback answer");
            answers.record(automated_label, self.automated.fallback_answer());
        }

        let all_answered = answered == human_labels.len();
        let filled = answers.fill_missing(human_labels.values(), &self.params.no_answer_text);
        if filled > 0 {
            info!("{} player(s) did not answer in time", filled);
        }
        debug!(timed_out, "Round collected with {} answers", answers.len());

        Ok(if all_answered {
            CollectResult::Completed(answers)
        } else {
            CollectResult::TimedOut(answers)
        })
    }

    fn classify<F>(
        &self,
        message: &InboundMessage,
        accept: &F,
        human_labels: &HashMap<UserId, Label>,
    ) -> Incoming
    where
        F: Fn(&InboundMessage) -> bool,
    {
        if message.channel != *self.channel {
            return Incoming::Ignored;
        }
        if Command::is_command(&message.text, &self.params.command_prefix) {
            return Incoming::Command;
        }
        if message.text.trim().is_empty() || !accept(message) {
            return Incoming::Ignored;
        }
        match human_labels.get(&message.author) {
            Some(label) => Incoming::Answer(*label),
            None => Incoming::Ignored,
        }
    }

    async fn paced_answer(&self, prompt: &Prompt) -> String {
        sleep(self.params.pacing_delay).await;
        self.automated.answer(prompt).await
    }

    async fn reject_command(&self, message: &InboundMessage) {
        debug!("Rejecting command from {} during a round", message.author);
        let text = format!(
            "{}: answers are being collected, commands are paused until this question is revealed.",
            message.author
        );
        if let Err(e) = self.announcer.announce(self.channel, &text).await {
            warn!("Failed to announce rejection: {}", e);
        }
    }
}

/// Resolve the scheduled automated answer, or never if none is scheduled
async fn next_pending(pending: &mut Option<BoxFuture<'_, String>>) -> String {
    match pending.as_mut() {
        Some(answer) => answer.await,
        None => std::future::pending().await,
    }
}
