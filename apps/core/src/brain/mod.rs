//! # Brain Module
//!
//! Deterministic intent resolution for the FAQ bot.
//! Maps a classifier's topic guess onto exactly one knowledge base entry.
//!
//! ## Components
//! - `similarity`: Levenshtein-based similarity scoring
//! - `knowledge`: Ordered topic → response table
//! - `resolver`: Exact match, then best similarity, then fallback topic
//! - `store`: Versioned knowledge base snapshots for hot reload
//! - `classifier`: Seam to the external topic classifier
//! - `reply`: Output data structure
//! - `responder`: Main orchestrator

pub mod classifier;
pub mod knowledge;
pub mod reply;
pub mod resolver;
pub mod responder;
pub mod similarity;
pub mod store;

// Re-export main types for convenience
pub use classifier::{
    build_prompt, select_query, ClassifierError, ClassifierRequest, EchoClassifier,
    TopicClassifier,
};
pub use knowledge::{Action, ActionTarget, KnowledgeBase, TopicEntry, TopicKey};
pub use reply::{ChatReply, Sender};
pub use resolver::{resolve, IntentResolver, MatchMethod, MatchResult, DEFAULT_FALLBACK_KEY};
pub use responder::FaqResponder;
pub use similarity::{levenshtein, similarity, EditDistanceScorer, Scorer};
pub use store::{KnowledgeStore, Snapshot};
