//! Prompt domain
//!
//! Built-in question list and the persona given to the automated player.

mod template;

pub use template::PromptTemplate;
