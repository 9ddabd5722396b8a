//! MongoDB adapter for the scores repository.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, DateTime, Document};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection, Database, IndexModel};
use tracing::{info, warn};

use crate::domain::{Limit, NewScore, ScorePatch, ScoreRecord};
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::repos::scores::{DbMode, ScoreStore};

pub mod dto;

pub use dto::ScoreDocument;

pub const COLLECTION: &str = "scores";

#[derive(Debug)]
pub struct MongoScoreStore {
    client: Client,
    collection: Collection<ScoreDocument>,
    connected: AtomicBool,
}

impl MongoScoreStore {
    /// Wrap a driver client. The store starts disconnected until the first
    /// successful [`refresh_connectivity`](Self::refresh_connectivity).
    pub fn new(client: Client, database: Database) -> Self {
        Self {
            client,
            collection: database.collection(COLLECTION),
            connected: AtomicBool::new(false),
        }
    }

    pub async fn ping(&self) -> Result<(), MongoError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Ping the server and record the outcome. Logs connectivity transitions.
    pub async fn refresh_connectivity(&self) -> bool {
        let reachable = match self.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "mongo.ping_failed");
                false
            }
        };

        let previous = self.connected.swap(reachable, Ordering::AcqRel);
        match (previous, reachable) {
            (false, true) => info!(db_mode = "mongo", "mongo.connected"),
            (true, false) => warn!(db_mode = "memory", "mongo.disconnected"),
            _ => {}
        }
        reachable
    }

    /// Index backing the canonical rank order.
    pub async fn ensure_indexes(&self) -> Result<(), DomainError> {
        let index = IndexModel::builder()
            .keys(doc! { "score": -1, "createdAt": 1 })
            .build();
        self.collection
            .create_index(index)
            .await
            .map(|_| ())
            .map_err(|e| self.map_err(e))
    }

    fn parse_id(id: &str) -> Result<ObjectId, DomainError> {
        ObjectId::parse_str(id).map_err(|_| DomainError::invalid_id(id))
    }

    /// Map a driver error, marking the store disconnected when the server
    /// could not be reached at all.
    fn map_err(&self, e: MongoError) -> DomainError {
        match *e.kind {
            ErrorKind::ServerSelection { .. } => {
                if self.connected.swap(false, Ordering::AcqRel) {
                    warn!(db_mode = "memory", "mongo.disconnected");
                }
                DomainError::infra(InfraErrorKind::DbUnavailable, e.to_string())
            }
            ErrorKind::Io(_) => DomainError::infra(InfraErrorKind::DbUnavailable, e.to_string()),
            _ => DomainError::infra(InfraErrorKind::Other("mongo".into()), e.to_string()),
        }
    }
}

fn not_found(id: &str) -> DomainError {
    DomainError::not_found(NotFoundKind::Score, format!("score {id}"))
}

#[async_trait]
impl ScoreStore for MongoScoreStore {
    fn mode(&self) -> DbMode {
        DbMode::Mongo
    }

    fn is_available(&self) -> bool {
        self.is_connected()
    }

    async fn list(&self, limit: Limit) -> Result<Vec<ScoreRecord>, DomainError> {
        let docs: Vec<ScoreDocument> = self
            .collection
            .find(doc! {})
            .sort(doc! { "score": -1, "createdAt": 1, "_id": 1 })
            .limit(limit.get() as i64)
            .await
            .map_err(|e| self.map_err(e))?
            .try_collect()
            .await
            .map_err(|e| self.map_err(e))?;

        docs.into_iter().map(ScoreRecord::try_from).collect()
    }

    async fn create(&self, new: NewScore) -> Result<ScoreRecord, DomainError> {
        let doc = ScoreDocument::from_new(new);
        self.collection
            .insert_one(&doc)
            .await
            .map_err(|e| self.map_err(e))?;
        ScoreRecord::try_from(doc)
    }

    async fn update(&self, id: &str, patch: ScorePatch) -> Result<ScoreRecord, DomainError> {
        let oid = Self::parse_id(id)?;

        let mut set = Document::new();
        if let Some(name) = &patch.name {
            set.insert("name", name.as_str());
        }
        if let Some(score) = patch.score {
            set.insert("score", score.get() as i64);
        }
        set.insert("updatedAt", DateTime::now());

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| self.map_err(e))?
            .ok_or_else(|| not_found(id))?;

        ScoreRecord::try_from(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let oid = Self::parse_id(id)?;
        let result = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(|e| self.map_err(e))?;
        if result.deleted_count == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
