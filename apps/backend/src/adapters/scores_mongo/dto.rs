//! Document shape of the `scores` collection.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::{NewScore, ScoreId, ScoreRecord};
use crate::errors::domain::{DomainError, InfraErrorKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub score: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl ScoreDocument {
    pub fn from_new(new: NewScore) -> Self {
        let now = DateTime::now();
        Self {
            id: ObjectId::new(),
            name: new.name.into_inner(),
            score: new.score.get() as i64,
            created_at: now,
            updated_at: now,
        }
    }
}

fn to_offset(value: DateTime) -> Result<OffsetDateTime, DomainError> {
    let nanos = value.timestamp_millis() as i128 * 1_000_000;
    OffsetDateTime::from_unix_timestamp_nanos(nanos).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("timestamp out of range: {e}"),
        )
    })
}

impl TryFrom<ScoreDocument> for ScoreRecord {
    type Error = DomainError;

    fn try_from(doc: ScoreDocument) -> Result<Self, Self::Error> {
        let score = u32::try_from(doc.score).map_err(|_| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("score {} out of range for {}", doc.score, doc.id),
            )
        })?;

        Ok(Self {
            id: ScoreId::new(doc.id.to_hex()),
            name: doc.name,
            score,
            created_at: to_offset(doc.created_at)?,
            updated_at: to_offset(doc.updated_at)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Points, ScoreName};

    #[test]
    fn document_converts_to_record() {
        let doc = ScoreDocument::from_new(NewScore {
            name: ScoreName::parse(" Bo ").unwrap(),
            score: Points::new(80).unwrap(),
        });
        let hex = doc.id.to_hex();
        let millis = doc.created_at.timestamp_millis();

        let record = ScoreRecord::try_from(doc).unwrap();
        assert_eq!(record.id.as_str(), hex);
        assert_eq!(record.name, "Bo");
        assert_eq!(record.score, 80);
        assert_eq!(
            (record.created_at.unix_timestamp_nanos() / 1_000_000) as i64,
            millis
        );
    }

    #[test]
    fn negative_stored_score_is_data_corruption() {
        let mut doc = ScoreDocument::from_new(NewScore {
            name: ScoreName::parse("Bo").unwrap(),
            score: Points::new(1).unwrap(),
        });
        doc.score = -5;
        let err = ScoreRecord::try_from(doc).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Infra(InfraErrorKind::DataCorruption, _)
        ));
    }
}
