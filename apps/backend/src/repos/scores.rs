//! Score repository contract shared by the document store and the
//! in-memory fallback.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Limit, NewScore, ScorePatch, ScoreRecord};
use crate::errors::domain::DomainError;

/// Which backing store is serving requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbMode {
    Mongo,
    Memory,
}

impl DbMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DbMode::Mongo => "mongo",
            DbMode::Memory => "memory",
        }
    }
}

/// Uniform list/create/update/delete over one backing store.
///
/// Inputs are already validated; implementations only enforce identity
/// (`InvalidId`, `NotFound`) and report infrastructure failures as
/// `DomainError::Infra`.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Mode reported by the health probe while this store is active.
    fn mode(&self) -> DbMode;

    /// Whether the store can serve requests right now.
    fn is_available(&self) -> bool {
        true
    }

    /// Up to `limit` records in rank order.
    async fn list(&self, limit: Limit) -> Result<Vec<ScoreRecord>, DomainError>;

    async fn create(&self, new: NewScore) -> Result<ScoreRecord, DomainError>;

    async fn update(&self, id: &str, patch: ScorePatch) -> Result<ScoreRecord, DomainError>;

    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}
