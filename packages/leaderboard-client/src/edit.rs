//! Client-side form checks for submitting and editing scores.
//!
//! These run before any request is made; the server validates again.

use std::fmt;

use crate::model::{NewScore, ScorePatch, ScoreRecord, NAME_MAX_CHARS, SCORE_MAX};

/// All-digit input as a number. Values too large for `u64` saturate, so an
/// oversized score is still present and fails the range check.
fn parse_digits(text: &str) -> Option<u64> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(text.parse().unwrap_or(u64::MAX))
}

/// Parse the submit form. `None` means the submit action is unavailable:
/// blank name, a score that is not all digits, or a score out of range.
pub fn parse_submission(name: &str, score: &str) -> Option<NewScore> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > NAME_MAX_CHARS {
        return None;
    }
    let score = parse_digits(score)
        .filter(|s| *s <= u64::from(SCORE_MAX))
        .and_then(|s| u32::try_from(s).ok())?;
    Some(NewScore {
        name: name.to_string(),
        score,
    })
}

/// Why a draft edit was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditRejection {
    NothingToUpdate,
    NoChanges,
}

impl fmt::Display for EditRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EditRejection::NothingToUpdate => "Nothing to update",
            EditRejection::NoChanges => "No changes",
        })
    }
}

/// In-progress inline edit of one record. Both fields start as the
/// record's current values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: String,
    pub name: String,
    pub score: String,
}

impl EditDraft {
    pub fn from_record(record: &ScoreRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            score: record.score.to_string(),
        }
    }

    /// Build the patch to send. A blank name or a non-numeric score is
    /// left out; if nothing remains, or everything left equals `current`,
    /// the edit is rejected. Out-of-range digits are sent as typed and left
    /// for the server to reject.
    pub fn build_patch(&self, current: Option<&ScoreRecord>) -> Result<ScorePatch, EditRejection> {
        let name = Some(self.name.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        let score = parse_digits(&self.score);

        let patch = ScorePatch { name, score };
        if patch.is_empty() {
            return Err(EditRejection::NothingToUpdate);
        }

        if let Some(current) = current {
            let same_name = patch.name.as_deref().map_or(true, |n| n == current.name);
            let same_score = patch.score.map_or(true, |s| s == u64::from(current.score));
            if same_name && same_score {
                return Err(EditRejection::NoChanges);
            }
        }

        Ok(patch)
    }
}
