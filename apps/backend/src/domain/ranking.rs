//! Canonical leaderboard ordering and list sizing.

use std::cmp::Ordering;
use std::num::IntErrorKind;

use super::score::ScoreRecord;

/// Total order used for every list: higher score first, earlier submission
/// first among equal scores.
pub fn rank_order(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.created_at.cmp(&b.created_at))
}

/// Sort by [`rank_order`] and keep the first `limit` entries.
///
/// The sort is stable, so records that tie on both keys keep their
/// insertion order.
pub fn top_n(mut records: Vec<ScoreRecord>, limit: Limit) -> Vec<ScoreRecord> {
    records.sort_by(rank_order);
    records.truncate(limit.get());
    records
}

/// Number of records a list request may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit(u16);

impl Limit {
    pub const DEFAULT: Limit = Limit(10);
    pub const MAX: u16 = 100;

    /// Clamp any integer into `1..=MAX`.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(1, Self::MAX as i64) as u16)
    }

    /// Interpret the raw `limit` query value. Missing or non-numeric input
    /// yields the default; integers too large for `i64` saturate.
    pub fn from_query(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::DEFAULT;
        };
        match raw.trim().parse::<i64>() {
            Ok(n) => Self::clamped(n),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Self::clamped(i64::MAX),
                IntErrorKind::NegOverflow => Self::clamped(i64::MIN),
                _ => Self::DEFAULT,
            },
        }
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self::DEFAULT
    }
}
