//! Automated player
//!
//! Wraps the remote completion provider and the deterministic fallback
//! behind one infallible call, so callers never branch on which source
//! produced the answer.

use crate::ports::completion_provider::{CompletionProvider, FallbackAnswers, ProviderError};
use imitation_domain::Prompt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// The disguised participant's answer source
pub struct AutomatedPlayer {
    primary: Option<Arc<dyn CompletionProvider>>,
    fallback: FallbackAnswers,
    timeout: Duration,
}

impl AutomatedPlayer {
    /// An automated player that only uses the fallback answers
    pub fn new(fallback: FallbackAnswers) -> Self {
        Self {
            primary: None,
            fallback,
            timeout: Duration::from_secs(5),
        }
    }

    /// Try `provider` first on every answer
    pub fn with_provider(mut self, provider: Arc<dyn CompletionProvider>) -> Self {
        self.primary = Some(provider);
        self
    }

    /// Upper bound on a single provider call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// A canned answer, available instantly
    pub fn fallback_answer(&self) -> String {
        self.fallback.pick()
    }

    pub fn has_provider(&self) -> bool {
        self.primary.is_some()
    }

    /// Answer `prompt`; never empty and never fails
    ///
    /// Provider errors, timeouts and blank completions are logged and
    /// replaced by a fallback answer. Players never see the failure.
    pub async fn answer(&self, prompt: &Prompt) -> String {
        let Some(provider) = &self.primary else {
            return self.fallback.pick();
        };

        match self.ask(provider.as_ref(), prompt).await {
            Ok(answer) => {
                debug!("{} answered {:?}", provider.name(), answer);
                answer
            }
            Err(e) => {
                warn!("{} failed, using fallback answer: {}", provider.name(), e);
                self.fallback.pick()
            }
        }
    }

    async fn ask(
        &self,
        provider: &dyn CompletionProvider,
        prompt: &Prompt,
    ) -> Result<String, ProviderError> {
        let answer = tokio::time::timeout(self.timeout, provider.generate_answer(prompt))
            .await
            .map_err(|_| ProviderError::Timeout)??;

        let answer = answer.trim();
        if answer.is_empty() {
            return Err(ProviderError::EmptyCompletion);
        }
        Ok(answer.to_string())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted provider behaviour
    pub(crate) enum Script {
        Reply(&'static str),
        Fail,
        Hang,
    }

    pub(crate) struct ScriptedProvider {
        script: Script,
        pub(crate) calls: AtomicUsize,
    }

    impl ScriptedProvider {
        pub(crate) fn new(script: Script) -> Self {
            Self {
                script,
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate_answer(&self, _prompt: &Prompt) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.script {
                Script::Reply(text) => Ok(text.to_string()),
                Script::Fail => Err(ProviderError::RequestFailed("quota exceeded".to_string())),
                Script::Hang => std::future::pending().await,
            }
        }
    }

    pub(crate) fn only_fallback(answer: &str) -> FallbackAnswers {
        FallbackAnswers::new(vec![answer.to_string()], Some(0))
    }
}
