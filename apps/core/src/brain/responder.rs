//! FAQ Responder - main orchestrator for one chat turn.
//!
//! Classifier guess → query selection → resolution → entry lookup → reply.
//! The knowledge base snapshot is taken once per turn.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::classifier::{select_query, ClassifierError, ClassifierRequest, TopicClassifier};
use super::knowledge::{Action, ActionTarget, KnowledgeBase};
use super::reply::ChatReply;
use super::resolver::{IntentResolver, MatchMethod, MatchResult};
use super::store::KnowledgeStore;
use crate::config::EngineConfig;
use crate::error::{AppError, ResolveError};

pub struct FaqResponder<C> {
    store: Arc<KnowledgeStore>,
    classifier: C,
    resolver: IntentResolver,
    request: ClassifierRequest,
    welcome_text: String,
}

impl<C: TopicClassifier> FaqResponder<C> {
    /// The resolver's fallback topic is always the store's.
    pub fn new(store: Arc<KnowledgeStore>, classifier: C, config: &EngineConfig) -> Self {
        let resolver = IntentResolver::with_fallback(store.fallback_key());
        Self {
            store,
            classifier,
            resolver,
            request: config.classifier.clone(),
            welcome_text: config.welcome_text.clone(),
        }
    }

    pub fn store(&self) -> &Arc<KnowledgeStore> {
        &self.store
    }

    /// Answer one user message.
    ///
    /// An empty classifier response falls back to the user's text; an
    /// unreachable classifier is an error for the transport to report.
    pub async fn answer(&self, user_text: &str) -> Result<ChatReply, AppError> {
        let snapshot = self.store.snapshot();
        let kb = snapshot.knowledge();
        let candidates: Vec<&str> = kb.keys().collect();

        let guess = match self
            .classifier
            .classify(&self.request, user_text, &candidates)
            .await
        {
            Ok(guess) => Some(guess),
            Err(ClassifierError::Empty) => {
                warn!(user_text, "Classifier gave no topic, resolving on user text");
                None
            }
            Err(e) => {
                error!(user_text, "Classifier failed: {}", e);
                return Err(e.into());
            }
        };

        let query = select_query(guess.as_deref(), user_text);
        let matched = self.resolver.resolve(query, kb)?;

        info!(
            user_text,
            query,
            matched = %matched.key,
            method = ?matched.method,
            score = matched.score,
            version = snapshot.version(),
            "Resolved topic"
        );

        reply_for(&matched, kb)
    }

    /// The opening message: the fallback topic's own entry.
    pub fn welcome(&self) -> Result<ChatReply, AppError> {
        let snapshot = self.store.snapshot();
        let kb = snapshot.knowledge();
        let key = self.resolver.fallback_key();

        let entry = kb
            .get(key)
            .ok_or_else(|| ResolveError::MissingFallback(key.to_string()))?;
        let matched = MatchResult {
            key: key.to_string(),
            score: 1.0,
            method: MatchMethod::Exact,
        };
        let mut reply = ChatReply::from_match(&matched, entry);
        if reply.text.trim().is_empty() {
            reply.text = self.welcome_text.clone();
        }
        Ok(reply)
    }

    /// Handle a pressed button. Links are opened by the transport and get no reply.
    pub async fn follow(&self, action: &Action) -> Result<Option<ChatReply>, AppError> {
        match &action.target {
            ActionTarget::Topic(key) => self.answer(key).await.map(Some),
            ActionTarget::Link(_) => Ok(None),
        }
    }
}

fn reply_for(matched: &MatchResult, kb: &KnowledgeBase) -> Result<ChatReply, AppError> {
    let entry = kb.get(&matched.key).ok_or_else(|| {
        AppError::Internal(format!(
            "resolved topic '{}' is not in the knowledge base",
            matched.key
        ))
    })?;
    Ok(ChatReply::from_match(matched, entry))
}
