//! Domain layer: the score record model, its validation rules, and the
//! canonical leaderboard ordering. Independent of HTTP and of the backing store.

pub mod ranking;
pub mod score;
pub mod validation;

pub use ranking::{rank_order, top_n, Limit};
pub use score::{NewScore, Points, ScoreId, ScoreName, ScorePatch, ScoreRecord};
pub use validation::{Issue, IssueCode, RawField};
