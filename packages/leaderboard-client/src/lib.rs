//! Client for the leaderboard API plus the presentation logic a frontend
//! needs: ranking for display, edit and submit checks, export, and a
//! session type that ties the flows together.

pub mod api;
pub mod celebration;
pub mod edit;
pub mod error;
pub mod export;
pub mod health;
pub mod model;
pub mod retry;
pub mod session;
pub mod view;

pub use api::{LeaderboardClient, DEFAULT_API_URL};
pub use edit::{parse_submission, EditDraft, EditRejection};
pub use error::{Action, ClientError};
pub use health::HealthPoller;
pub use model::{DbMode, Health, NewScore, ScorePatch, ScoreRecord};
pub use retry::RetryPolicy;
pub use session::{Confirm, DeleteOutcome, LeaderboardSession, SaveOutcome, SubmitOutcome};
pub use view::{displayed, Medal, RankedRow, SortDir};

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
