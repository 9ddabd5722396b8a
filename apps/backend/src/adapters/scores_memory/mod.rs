//! In-process fallback store for scores.
//!
//! A single ordered sequence: append on create, linear scan by id for
//! update/delete, full sort-and-slice for list. Contents live only as long
//! as the process.

use async_trait::async_trait;
use parking_lot::RwLock;
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{top_n, Limit, NewScore, ScoreId, ScorePatch, ScoreRecord};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::scores::{DbMode, ScoreStore};

#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    records: RwLock<Vec<ScoreRecord>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn next_id() -> ScoreId {
        ScoreId::new(Uuid::new_v4().simple().to_string())
    }
}

fn not_found(id: &str) -> DomainError {
    DomainError::not_found(NotFoundKind::Score, format!("score {id}"))
}

#[async_trait]
impl ScoreStore for MemoryScoreStore {
    fn mode(&self) -> DbMode {
        DbMode::Memory
    }

    async fn list(&self, limit: Limit) -> Result<Vec<ScoreRecord>, DomainError> {
        let snapshot = self.records.read().clone();
        Ok(top_n(snapshot, limit))
    }

    async fn create(&self, new: NewScore) -> Result<ScoreRecord, DomainError> {
        let record = ScoreRecord::from_new(Self::next_id(), new, OffsetDateTime::now_utc());
        self.records.write().push(record.clone());
        debug!(id = %record.id, "memory_store.created");
        Ok(record)
    }

    async fn update(&self, id: &str, patch: ScorePatch) -> Result<ScoreRecord, DomainError> {
        let mut records = self.records.write();
        let record = records
            .iter_mut()
            .find(|r| r.id.as_str() == id)
            .ok_or_else(|| not_found(id))?;
        patch.apply_to(record, OffsetDateTime::now_utc());
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| r.id.as_str() != id);
        if records.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}
