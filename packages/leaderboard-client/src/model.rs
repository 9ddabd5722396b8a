//! Wire types shared with the leaderboard API.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Inclusive upper bound on a score, mirrored from the server's rules.
pub const SCORE_MAX: u32 = 1_000_000;
pub const NAME_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub id: String,
    pub name: String,
    pub score: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewScore {
    pub name: String,
    pub score: u32,
}

/// Partial update; absent fields are omitted from the request body.
/// `score` is wider than a valid score so out-of-range input reaches the
/// server's validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScorePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u64>,
}

impl ScorePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.score.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbMode {
    Mongo,
    Memory,
}

impl DbMode {
    /// Label shown next to the leaderboard.
    pub fn label(self) -> &'static str {
        match self {
            DbMode::Mongo => "MongoDB",
            DbMode::Memory => "Memory (temp)",
        }
    }
}

impl fmt::Display for DbMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub ok: bool,
    pub db_mode: DbMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiIssue {
    pub path: Vec<String>,
    pub code: String,
    pub message: String,
}

/// Error body returned by the API on any non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub issues: Vec<ApiIssue>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn patch_omits_absent_fields() {
        let patch = ScorePatch {
            name: None,
            score: Some(5),
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "score": 5 }));
    }

    #[test]
    fn record_reads_server_shape() {
        let record: ScoreRecord = serde_json::from_value(json!({
            "id": "abc",
            "name": "Ann",
            "score": 10,
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(record.name, "Ann");
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn health_reads_db_mode() {
        let health: Health = serde_json::from_value(json!({ "ok": true, "dbMode": "memory" })).unwrap();
        assert_eq!(health.db_mode, DbMode::Memory);
        assert_eq!(health.db_mode.label(), "Memory (temp)");
    }
}
