//! Knowledge Store - versioned, hot-swappable knowledge base snapshots.
//!
//! Every resolution takes one `Arc<Snapshot>` up front and works on it to the
//! end, so a concurrent reload is either fully visible or not at all.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use super::knowledge::{KnowledgeBase, TopicKey};
use crate::error::ResolveError;

/// One published version of the knowledge base
#[derive(Debug)]
pub struct Snapshot {
    version: u64,
    knowledge: KnowledgeBase,
}

impl Snapshot {
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }
}

/// Holds the current snapshot and the fallback topic every snapshot must carry.
#[derive(Debug)]
pub struct KnowledgeStore {
    fallback_key: TopicKey,
    current: RwLock<Arc<Snapshot>>,
}

impl KnowledgeStore {
    /// Create a store at version 1. Fails if `knowledge` lacks the fallback topic.
    pub fn new(knowledge: KnowledgeBase, fallback_key: impl Into<TopicKey>) -> Result<Self, ResolveError> {
        let fallback_key = fallback_key.into();
        knowledge.validate(&fallback_key)?;

        info!(topics = knowledge.len(), "Knowledge base loaded (version 1)");
        Ok(Self {
            fallback_key,
            current: RwLock::new(Arc::new(Snapshot {
                version: 1,
                knowledge,
            })),
        })
    }

    pub fn fallback_key(&self) -> &str {
        &self.fallback_key
    }

    /// The snapshot to use for one whole request.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the knowledge base, returning the new version.
    ///
    /// The current snapshot is left untouched if validation fails.
    pub fn publish(&self, knowledge: KnowledgeBase) -> Result<u64, ResolveError> {
        knowledge.validate(&self.fallback_key)?;

        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let version = guard.version + 1;
        info!(topics = knowledge.len(), version, "Knowledge base reloaded");
        *guard = Arc::new(Snapshot { version, knowledge });
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::knowledge::TopicEntry;

    fn kb(keys: &[&str]) -> KnowledgeBase {
        KnowledgeBase::from_entries(keys.iter().map(|k| (*k, TopicEntry::new(*k))))
            .expect("valid fixture")
    }

    #[test]
    fn test_new_requires_fallback() {
        let err = KnowledgeStore::new(kb(&["battery"]), "home").unwrap_err();
        assert_eq!(err, ResolveError::MissingFallback("home".to_string()));
    }

    #[test]
    fn test_publish_bumps_version() {
        let store = KnowledgeStore::new(kb(&["home"]), "home").unwrap();
        assert_eq!(store.snapshot().version(), 1);

        let version = store.publish(kb(&["home", "battery"])).unwrap();
        assert_eq!(version, 2);
        assert_eq!(store.snapshot().version(), 2);
        assert!(store.snapshot().knowledge().contains("battery"));
    }

    #[test]
    fn test_rejected_publish_keeps_current() {
        let store = KnowledgeStore::new(kb(&["home"]), "home").unwrap();
        assert!(store.publish(kb(&["battery"])).is_err());

        let snapshot = store.snapshot();
        assert_eq!(snapshot.version(), 1);
        assert!(snapshot.knowledge().contains("home"));
    }

    #[test]
    fn test_held_snapshot_survives_reload() {
        let store = KnowledgeStore::new(kb(&["home", "old"]), "home").unwrap();
        let before = store.snapshot();

        store.publish(kb(&["home", "new"])).unwrap();

        assert!(before.knowledge().contains("old"));
        assert!(!before.knowledge().contains("new"));
        assert!(store.snapshot().knowledge().contains("new"));
    }
}
