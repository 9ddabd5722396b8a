use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::adapters::MemoryScoreStore;
use crate::domain::{Limit, NewScore, ScorePatch, ScoreRecord};
use crate::errors::domain::DomainError;
use crate::repos::scores::{DbMode, ScoreStore};

/// Stand-in for the document store whose reachability a test flips by hand.
///
/// Reports itself as [`DbMode::Mongo`] and keeps its records in memory,
/// separate from the service's fallback store.
#[derive(Debug, Default)]
pub struct SwitchableStore {
    inner: MemoryScoreStore,
    up: AtomicBool,
    hex_ids: bool,
}

impl SwitchableStore {
    pub fn new(up: bool) -> Self {
        Self {
            inner: MemoryScoreStore::new(),
            up: AtomicBool::new(up),
            hex_ids: false,
        }
    }

    /// Reject ids that are not hex digits with `InvalidId`, the way the
    /// document store rejects anything that is not an ObjectId. Ids this
    /// store hands out are hex, so they still resolve.
    pub fn with_hex_ids(mut self) -> Self {
        self.hex_ids = true;
        self
    }

    fn check_id(&self, id: &str) -> Result<(), DomainError> {
        if self.hex_ids && (id.is_empty() || !id.bytes().all(|b| b.is_ascii_hexdigit())) {
            return Err(DomainError::invalid_id(id));
        }
        Ok(())
    }

    pub fn set_up(&self, up: bool) {
        self.up.store(up, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl ScoreStore for SwitchableStore {
    fn mode(&self) -> DbMode {
        DbMode::Mongo
    }

    fn is_available(&self) -> bool {
        self.up.load(Ordering::SeqCst)
    }

    async fn list(&self, limit: Limit) -> Result<Vec<ScoreRecord>, DomainError> {
        self.inner.list(limit).await
    }

    async fn create(&self, new: NewScore) -> Result<ScoreRecord, DomainError> {
        self.inner.create(new).await
    }

    async fn update(&self, id: &str, patch: ScorePatch) -> Result<ScoreRecord, DomainError> {
        self.check_id(id)?;
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.check_id(id)?;
        self.inner.delete(id).await
    }
}
