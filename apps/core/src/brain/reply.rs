//! Chat Reply - the structured answer handed to the transport layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::knowledge::{Action, TopicEntry};
use super::resolver::{MatchMethod, MatchResult};

/// Shown by the transport when a request fails.
pub const APOLOGY_TEXT: &str = "ขออภัยครับ มีข้อผิดพลาด กรุณาลองใหม่อีกครั้ง";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Bot message with its follow-up buttons
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub sender: Sender,

    /// Text to render
    #[serde(rename = "response")]
    pub text: String,

    /// Follow-up buttons, in the order the topic lists them
    pub buttons: Vec<Action>,

    /// Topic this reply was built from (None for generic messages)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_key: Option<String>,

    /// Similarity of the query to `matched_key`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<MatchMethod>,

    pub timestamp: DateTime<Utc>,
}

impl ChatReply {
    pub fn from_match(matched: &MatchResult, entry: &TopicEntry) -> Self {
        Self {
            sender: Sender::Bot,
            text: entry.response.clone(),
            buttons: entry.actions.clone(),
            matched_key: Some(matched.key.clone()),
            score: Some(matched.score),
            method: Some(matched.method),
            timestamp: Utc::now(),
        }
    }

    /// Plain bot text with no topic attached.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            buttons: Vec::new(),
            matched_key: None,
            score: None,
            method: None,
            timestamp: Utc::now(),
        }
    }

    pub fn apology() -> Self {
        Self::text(APOLOGY_TEXT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let entry = TopicEntry::new("hello").with_actions(vec![Action::topic("Claim", "claim")]);
        let matched = MatchResult {
            key: "greeting".to_string(),
            score: 1.0,
            method: MatchMethod::Exact,
        };

        let json = serde_json::to_value(ChatReply::from_match(&matched, &entry)).unwrap();
        assert_eq!(json["sender"], "bot");
        assert_eq!(json["response"], "hello");
        assert_eq!(json["buttons"][0]["label"], "Claim");
        assert_eq!(json["buttons"][0]["action"], "claim");
        assert_eq!(json["method"], "exact");
    }

    #[test]
    fn test_apology_has_no_topic() {
        let json = serde_json::to_value(ChatReply::apology()).unwrap();
        assert_eq!(json["response"], APOLOGY_TEXT);
        assert!(json.get("matched_key").is_none());
    }
}
