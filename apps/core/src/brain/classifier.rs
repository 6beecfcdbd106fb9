//! Topic Classifier seam.
//!
//! The language model that guesses a topic lives outside this crate. This
//! module defines what it is asked (prompt + sampling parameters), how it
//! can fail, and how its answer becomes the resolver's query.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Defines errors the external classifier can report.
#[derive(Debug, thiserror::Error, Serialize, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    /// Transport failure; the request may be retried.
    #[error("classifier unavailable: {0}")]
    Unavailable(String),
    /// The classifier answered but produced no candidate text.
    #[error("classifier returned an empty response")]
    Empty,
}

/// Sampling parameters sent along with the prompt.
///
/// Kept low so the model repeats a listed topic instead of paraphrasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierRequest {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
}

impl Default for ClassifierRequest {
    fn default() -> Self {
        Self {
            temperature: 0.25,
            top_k: 3,
            top_p: 0.3,
        }
    }
}

/// Defines the public interface for a topic classifier.
///
/// Implementations receive the user's text and the candidate topic names and
/// return their best guess. The guess is not trusted to be a valid topic.
#[async_trait]
pub trait TopicClassifier: Send + Sync + 'static {
    async fn classify(
        &self,
        request: &ClassifierRequest,
        user_text: &str,
        candidates: &[&str],
    ) -> Result<String, ClassifierError>;
}

/// Classifier that answers with the user's own text.
///
/// Used when no model is wired in: resolution then runs directly on the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoClassifier;

#[async_trait]
impl TopicClassifier for EchoClassifier {
    async fn classify(
        &self,
        _request: &ClassifierRequest,
        user_text: &str,
        _candidates: &[&str],
    ) -> Result<String, ClassifierError> {
        Ok(user_text.to_string())
    }
}

/// Render the instruction asking the model to pick exactly one listed topic.
pub fn build_prompt(user_text: &str, candidates: &[&str]) -> String {
    let topics = candidates
        .iter()
        .map(|c| format!("- {}", c))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Your task is to pick the topic that best matches the user's message from this list:\n\
         {topics}\n\n\
         Do not write new text, do not rephrase, and do not answer with anything other than \
         one of the topic names listed above.\n\n\
         User message: \"{user_text}\"\n\n\
         Answer with the topic name only."
    )
}

/// The string to resolve: the trimmed classifier guess, or the user text when
/// the guess is missing or blank.
pub fn select_query<'a>(guess: Option<&'a str>, user_text: &'a str) -> &'a str {
    match guess.map(str::trim) {
        Some(g) if !g.is_empty() => g,
        _ => user_text,
    }
}
