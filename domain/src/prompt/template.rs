//! Built-in game texts

use crate::core::prompt::Prompt;

/// Default questions and persona for the automated player
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt that keeps the automated answers short and human-sounding
    pub fn automated_persona() -> &'static str {
        "You are a teenage human in a party game. Give very short, casual answers, mostly 1–2 words."
    }

    /// Questions played when none are configured
    pub fn default_questions() -> &'static [&'static str] {
        &[
            "If you had to eat one food forever, what would it be?",
            "What’s your dream vacation?",
            "If you won the lottery, what’s the first thing you’d buy?",
            "If you could have any superpower, what would it be?",
            "What is your favorite movie of all time?",
        ]
    }

    pub fn default_prompts() -> Vec<Prompt> {
        Self::default_questions()
            .iter()
            .map(|q| Prompt::new(*q))
            .collect()
    }

    /// Short informal answers used when no completion is available
    pub fn fallback_answers() -> &'static [&'static str] {
        &[
            "Pizza", "Beach", "Car", "Fly", "Inception", "Cat", "Chill", "Gaming", "Da Vinci",
            "Guitar", "Park", "Paris",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = PromptTemplate::default_prompts();
        assert_eq!(prompts.len(), 5);
        assert!(prompts[0].content().contains("eat one food forever"));
    }

    #[test]
    fn test_fallback_answers_are_short() {
        let answers = PromptTemplate::fallback_answers();
        assert_eq!(answers.len(), 12);
        assert!(answers.iter().all(|a| !a.is_empty() && a.len() <= 10));
    }
}
