//! Intent Resolver - maps a classifier guess onto one knowledge base topic.
//!
//! Three tiers, first hit wins:
//! 1. Exact key match (no scoring at all)
//! 2. Highest edit-distance similarity, earliest topic on ties
//! 3. The fallback topic when nothing scores above zero

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::knowledge::{KnowledgeBase, TopicKey};
use super::similarity::{EditDistanceScorer, Scorer};
use crate::error::ResolveError;

/// The "return to start" topic.
pub const DEFAULT_FALLBACK_KEY: &str = "กลับหน้าเริ่มต้น";

/// Which tier produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    Exact,
    Fuzzy,
    Fallback,
}

/// Result of resolving a query, before the entry lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Topic key, always present in the knowledge base it was resolved against
    pub key: TopicKey,
    /// Similarity score (0.0 - 1.0)
    pub score: f64,
    pub method: MatchMethod,
}

/// Resolver configured with a fallback topic and a scorer.
#[derive(Debug, Clone)]
pub struct IntentResolver<S = EditDistanceScorer> {
    fallback_key: TopicKey,
    scorer: S,
}

impl Default for IntentResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentResolver {
    /// Resolver using [`DEFAULT_FALLBACK_KEY`] and edit-distance scoring.
    pub fn new() -> Self {
        Self::with_fallback(DEFAULT_FALLBACK_KEY)
    }

    pub fn with_fallback(fallback_key: impl Into<TopicKey>) -> Self {
        Self::with_scorer(fallback_key, EditDistanceScorer)
    }
}

impl<S: Scorer> IntentResolver<S> {
    pub fn with_scorer(fallback_key: impl Into<TopicKey>, scorer: S) -> Self {
        Self {
            fallback_key: fallback_key.into(),
            scorer,
        }
    }

    pub fn fallback_key(&self) -> &str {
        &self.fallback_key
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Resolve `query` against a knowledge base snapshot.
    ///
    /// Never fails for lack of a match; the only error is a knowledge base
    /// that lacks the fallback topic when the fallback is needed.
    pub fn resolve(&self, query: &str, kb: &KnowledgeBase) -> Result<MatchResult, ResolveError> {
        if kb.contains(query) {
            debug!(query, "Exact topic match");
            return Ok(MatchResult {
                key: query.to_string(),
                score: 1.0,
                method: MatchMethod::Exact,
            });
        }

        let mut best: Option<(&str, f64)> = None;
        for key in kb.keys() {
            let score = self.scorer.score(query, key);
            // Strictly greater: the earliest topic keeps a tie.
            if score > best.map_or(0.0, |(_, s)| s) {
                best = Some((key, score));
            }
        }

        match best {
            Some((key, score)) => {
                debug!(
                    query,
                    matched = key,
                    "Similarity match ({:.2}%)",
                    score * 100.0
                );
                Ok(MatchResult {
                    key: key.to_string(),
                    score,
                    method: MatchMethod::Fuzzy,
                })
            }
            None => self.fallback(query, kb),
        }
    }

    fn fallback(&self, query: &str, kb: &KnowledgeBase) -> Result<MatchResult, ResolveError> {
        if let Err(err) = kb.validate(&self.fallback_key) {
            warn!(query, fallback = %self.fallback_key, "Fallback topic missing from knowledge base");
            return Err(err);
        }

        debug!(query, fallback = %self.fallback_key, "No similar topic, using fallback");
        Ok(MatchResult {
            key: self.fallback_key.clone(),
            score: 0.0,
            method: MatchMethod::Fallback,
        })
    }
}

/// Resolve with the default fallback topic and edit-distance scoring.
pub fn resolve(query: &str, kb: &KnowledgeBase) -> Result<MatchResult, ResolveError> {
    IntentResolver::new().resolve(query, kb)
}
