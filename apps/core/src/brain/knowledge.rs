//! Knowledge Base - the topic → response table the resolver matches against.
//!
//! Parsed from the FAQ JSON document. Topic order is preserved from the
//! document because it decides which topic wins a similarity tie.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use url::Url;
use validator::Validate;

use crate::error::{AppError, ResolveError};

/// Canonical identifier of one FAQ topic.
pub type TopicKey = String;

/// Where a follow-up button leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionTarget {
    /// Re-enter the bot with this topic key as the next query.
    Topic(TopicKey),
    /// Open an external page.
    Link(Url),
}

/// A follow-up button attached to a topic response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAction", into = "RawAction")]
pub struct Action {
    pub label: String,
    pub target: ActionTarget,
}

impl Action {
    pub fn topic(label: impl Into<String>, key: impl Into<TopicKey>) -> Self {
        Self {
            label: label.into(),
            target: ActionTarget::Topic(key.into()),
        }
    }

    pub fn link(label: impl Into<String>, url: &str) -> Result<Self, AppError> {
        Ok(Self {
            label: label.into(),
            target: ActionTarget::Link(Url::parse(url)?),
        })
    }
}

/// Button as it appears in the FAQ document: `link` wins over `action` when set.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
struct RawAction {
    #[validate(length(min = 1))]
    label: String,
    #[serde(default)]
    action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    link: Option<String>,
}

impl TryFrom<RawAction> for Action {
    type Error = AppError;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        raw.validate()?;

        let target = match raw.link {
            Some(link) => ActionTarget::Link(Url::parse(&link)?),
            None if raw.action.trim().is_empty() => {
                return Err(AppError::Validation(format!(
                    "button '{}' has neither an action nor a link",
                    raw.label
                )))
            }
            None => ActionTarget::Topic(raw.action),
        };

        Ok(Action {
            label: raw.label,
            target,
        })
    }
}

impl From<Action> for RawAction {
    fn from(action: Action) -> Self {
        match action.target {
            ActionTarget::Topic(key) => RawAction {
                label: action.label,
                action: key,
                link: None,
            },
            ActionTarget::Link(url) => RawAction {
                action: action.label.clone(),
                label: action.label,
                link: Some(url.to_string()),
            },
        }
    }
}

/// Response text plus follow-up buttons for one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicEntry {
    #[serde(alias = "answer")]
    pub response: String,
    #[serde(default, rename = "buttons")]
    pub actions: Vec<Action>,
}

impl TopicEntry {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            actions: Vec::new(),
        }
    }

    pub fn with_actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = actions;
        self
    }
}

/// Immutable, ordered topic table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "IndexMap<TopicKey, TopicEntry>",
    into = "IndexMap<TopicKey, TopicEntry>"
)]
pub struct KnowledgeBase {
    entries: IndexMap<TopicKey, TopicEntry>,
}

impl KnowledgeBase {
    /// Build from `(key, entry)` pairs, keeping their order.
    ///
    /// Rejects empty and duplicate keys.
    pub fn from_entries<K, I>(entries: I) -> Result<Self, AppError>
    where
        K: Into<TopicKey>,
        I: IntoIterator<Item = (K, TopicEntry)>,
    {
        let mut map = IndexMap::new();
        for (key, entry) in entries {
            let key = key.into();
            if key.is_empty() {
                return Err(AppError::Validation("topic key must not be empty".to_string()));
            }
            if map.contains_key(&key) {
                return Err(AppError::Validation(format!("duplicate topic key '{}'", key)));
            }
            map.insert(key, entry);
        }
        Ok(Self { entries: map })
    }

    /// Parse the FAQ JSON document (an object of topic → entry).
    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        let entries: IndexMap<TopicKey, TopicEntry> = serde_json::from_str(json)?;
        Self::try_from(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-sensitive membership test.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&TopicEntry> {
        self.entries.get(key)
    }

    /// Topic keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TopicEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Check that the fallback topic is present.
    pub fn validate(&self, fallback_key: &str) -> Result<(), ResolveError> {
        if self.contains(fallback_key) {
            Ok(())
        } else {
            Err(ResolveError::MissingFallback(fallback_key.to_string()))
        }
    }
}

impl TryFrom<IndexMap<TopicKey, TopicEntry>> for KnowledgeBase {
    type Error = AppError;

    fn try_from(entries: IndexMap<TopicKey, TopicEntry>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl From<KnowledgeBase> for IndexMap<TopicKey, TopicEntry> {
    fn from(kb: KnowledgeBase) -> Self {
        kb.entries
    }
}
