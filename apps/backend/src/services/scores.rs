//! Score service: routes every operation to the store that is active at
//! call time.
//!
//! The document store is preferred whenever it reports itself available;
//! otherwise the in-process fallback serves the request. The choice is made
//! per call, so a reconnect takes effect on the next request without a
//! restart. The two stores are never merged or reconciled.

use std::sync::Arc;

use tracing::debug;

use crate::adapters::MemoryScoreStore;
use crate::domain::{Issue, IssueCode, Limit, NewScore, ScorePatch, ScoreRecord};
use crate::errors::domain::DomainError;
use crate::repos::scores::{DbMode, ScoreStore};

#[derive(Clone)]
pub struct ScoreService {
    primary: Option<Arc<dyn ScoreStore>>,
    fallback: Arc<MemoryScoreStore>,
}

impl ScoreService {
    pub fn new(primary: Option<Arc<dyn ScoreStore>>, fallback: Arc<MemoryScoreStore>) -> Self {
        Self { primary, fallback }
    }

    /// Service backed only by a fresh fallback store.
    pub fn memory_only() -> Self {
        Self::new(None, Arc::new(MemoryScoreStore::new()))
    }

    /// The single connectivity check deciding which store serves a call.
    fn active(&self) -> &dyn ScoreStore {
        match &self.primary {
            Some(primary) if primary.is_available() => primary.as_ref(),
            _ => self.fallback.as_ref(),
        }
    }

    pub fn db_mode(&self) -> DbMode {
        self.active().mode()
    }

    pub fn fallback(&self) -> &Arc<MemoryScoreStore> {
        &self.fallback
    }

    pub async fn list(&self, limit: Limit) -> Result<Vec<ScoreRecord>, DomainError> {
        let store = self.active();
        debug!(db_mode = store.mode().as_str(), limit = limit.get(), "scores.list");
        store.list(limit).await
    }

    pub async fn create(&self, new: NewScore) -> Result<ScoreRecord, DomainError> {
        let store = self.active();
        debug!(db_mode = store.mode().as_str(), "scores.create");
        store.create(new).await
    }

    pub async fn update(&self, id: &str, patch: ScorePatch) -> Result<ScoreRecord, DomainError> {
        if patch.is_empty() {
            return Err(DomainError::validation(vec![Issue::root(
                IssueCode::Custom,
                "At least one of name or score is required",
            )]));
        }
        let store = self.active();
        debug!(db_mode = store.mode().as_str(), id, "scores.update");
        store.update(id, patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let store = self.active();
        debug!(db_mode = store.mode().as_str(), id, "scores.delete");
        store.delete(id).await
    }
}

impl std::fmt::Debug for ScoreService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreService")
            .field("has_primary", &self.primary.is_some())
            .field("db_mode", &self.db_mode())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Points, ScoreName};
    use crate::test_support::SwitchableStore;

    fn new_score(name: &str, score: u32) -> NewScore {
        NewScore {
            name: ScoreName::parse(name).unwrap(),
            score: Points::new(score).unwrap(),
        }
    }

    #[tokio::test]
    async fn selection_follows_connectivity_per_call() {
        let primary = Arc::new(SwitchableStore::new(false));
        let service = ScoreService::new(
            Some(primary.clone() as Arc<dyn ScoreStore>),
            Arc::new(MemoryScoreStore::new()),
        );

        assert_eq!(service.db_mode(), DbMode::Memory);
        service.create(new_score("degraded", 1)).await.unwrap();

        primary.set_up(true);
        assert_eq!(service.db_mode(), DbMode::Mongo);

        // Records written while degraded are not carried over.
        assert!(service.list(Limit::DEFAULT).await.unwrap().is_empty());
        service.create(new_score("durable", 2)).await.unwrap();
        assert_eq!(primary.len(), 1);
        assert_eq!(service.fallback().len(), 1);

        primary.set_up(false);
        let listed = service.list(Limit::DEFAULT).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "degraded");
    }

    #[tokio::test]
    async fn empty_patch_is_rejected_before_the_store() {
        let service = ScoreService::memory_only();
        let err = service
            .update("anything", ScorePatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
