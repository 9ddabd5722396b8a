//! Score record model shared by every backing store.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use super::validation::{json_kind, Issue, IssueCode};

/// Maximum length of a display name, in characters, after trimming.
pub const NAME_MAX_CHARS: usize = 50;
/// Highest accepted score.
pub const SCORE_MAX: u32 = 1_000_000;

/// Opaque record identifier. Its format is owned by the store that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreId(String);

impl ScoreId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ScoreId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// A trimmed, non-empty display name of at most [`NAME_MAX_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreName(String);

impl ScoreName {
    pub fn parse(raw: &str) -> Result<Self, Issue> {
        let trimmed = raw.trim();
        let len = trimmed.chars().count();
        if len == 0 {
            return Err(Issue::new(
                &["name"],
                IssueCode::TooSmall,
                "String must contain at least 1 character(s)",
            ));
        }
        if len > NAME_MAX_CHARS {
            return Err(Issue::new(
                &["name"],
                IssueCode::TooBig,
                format!("String must contain at most {NAME_MAX_CHARS} character(s)"),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// An integer score in `0..=SCORE_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Points(u32);

impl Points {
    pub fn new(value: u32) -> Result<Self, Issue> {
        if value > SCORE_MAX {
            return Err(Issue::new(
                &["score"],
                IssueCode::TooBig,
                format!("Number must be less than or equal to {SCORE_MAX}"),
            ));
        }
        Ok(Self(value))
    }

    /// Accepts JSON integers, and floats with no fractional part.
    pub fn from_json(value: &Value) -> Result<Self, Issue> {
        let Value::Number(number) = value else {
            return Err(Issue::new(
                &["score"],
                IssueCode::InvalidType,
                format!("Expected number, received {}", json_kind(value)),
            ));
        };

        let whole = if let Some(i) = number.as_i64() {
            i as f64
        } else if let Some(u) = number.as_u64() {
            u as f64
        } else {
            let f = number.as_f64().unwrap_or(f64::NAN);
            if !f.is_finite() || f.fract() != 0.0 {
                return Err(Issue::new(
                    &["score"],
                    IssueCode::NotInteger,
                    "Expected integer, received float",
                ));
            }
            f
        };

        if whole < 0.0 {
            return Err(Issue::new(
                &["score"],
                IssueCode::TooSmall,
                "Number must be greater than or equal to 0",
            ));
        }
        if whole > SCORE_MAX as f64 {
            return Err(Issue::new(
                &["score"],
                IssueCode::TooBig,
                format!("Number must be less than or equal to {SCORE_MAX}"),
            ));
        }
        Ok(Self(whole as u32))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// A validated create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScore {
    pub name: ScoreName,
    pub score: Points,
}

/// A validated partial update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScorePatch {
    pub name: Option<ScoreName>,
    pub score: Option<Points>,
}

impl ScorePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.score.is_none()
    }

    /// Merge the present fields into `record` and refresh `updated_at`.
    pub fn apply_to(&self, record: &mut ScoreRecord, now: OffsetDateTime) {
        if let Some(name) = &self.name {
            record.name = name.as_str().to_string();
        }
        if let Some(score) = self.score {
            record.score = score.get();
        }
        record.updated_at = now;
    }
}

/// A persisted leaderboard entry, in its wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub id: ScoreId,
    pub name: String,
    pub score: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl ScoreRecord {
    /// Build a fresh record from a validated create request.
    pub fn from_new(id: ScoreId, new: NewScore, now: OffsetDateTime) -> Self {
        Self {
            id,
            name: new.name.into_inner(),
            score: new.score.get(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use super::*;

    #[test]
    fn name_length_counts_characters_not_bytes() {
        let fifty = "é".repeat(50);
        assert!(ScoreName::parse(&fifty).is_ok());
        let fifty_one = "é".repeat(51);
        assert_eq!(
            ScoreName::parse(&fifty_one).unwrap_err().code,
            IssueCode::TooBig
        );
    }

    #[test]
    fn points_bounds_are_inclusive() {
        assert_eq!(Points::from_json(&json!(0)).unwrap().get(), 0);
        assert_eq!(Points::from_json(&json!(SCORE_MAX)).unwrap().get(), SCORE_MAX);
        assert!(Points::new(SCORE_MAX + 1).is_err());
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let created = datetime!(2024-01-01 00:00 UTC);
        let later = datetime!(2024-01-02 00:00 UTC);
        let mut record = ScoreRecord {
            id: ScoreId::new("a"),
            name: "Ann".into(),
            score: 10,
            created_at: created,
            updated_at: created,
        };

        let patch = ScorePatch {
            name: None,
            score: Some(Points::new(20).unwrap()),
        };
        patch.apply_to(&mut record, later);

        assert_eq!(record.name, "Ann");
        assert_eq!(record.score, 20);
        assert_eq!(record.created_at, created);
        assert_eq!(record.updated_at, later);
    }

    #[test]
    fn record_serializes_camel_case_rfc3339() {
        let at = datetime!(2024-05-06 07:08:09 UTC);
        let record = ScoreRecord {
            id: ScoreId::new("abc"),
            name: "Bo".into(),
            score: 80,
            created_at: at,
            updated_at: at,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["createdAt"], "2024-05-06T07:08:09Z");
        assert!(value.get("updatedAt").is_some());
    }
}
