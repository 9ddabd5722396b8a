//! Client-side leaderboard state and the user flows that drive it.
//!
//! A session holds the last successfully loaded scores plus the UI state
//! around them. Failed requests record an error message and otherwise
//! leave the state as it was, including any edit in progress.

use tracing::{debug, info};

use crate::api::LeaderboardClient;
use crate::celebration::{is_new_top, top_score};
use crate::edit::{EditDraft, EditRejection};
use crate::error::ClientError;
use crate::export::{to_csv, top3_summary};
use crate::model::{NewScore, ScoreRecord};
use crate::retry::RetryPolicy;
use crate::view::{displayed, RankedRow, SortDir};

pub const DEFAULT_LIMIT: u16 = 10;

/// Asks the user to approve a destructive or mutating action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub record: ScoreRecord,
    /// The submission took the top spot.
    pub new_top: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    NotEditing,
    Rejected(EditRejection),
    Declined,
    Saved(ScoreRecord),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Declined,
    Deleted,
}

#[derive(Debug)]
pub struct LeaderboardSession {
    client: LeaderboardClient,
    retry: RetryPolicy,
    limit: u16,
    scores: Vec<ScoreRecord>,
    top_snapshot: Option<ScoreRecord>,
    filter: String,
    sort: SortDir,
    editing: Option<EditDraft>,
    error: Option<String>,
    notice: Option<String>,
    pending: bool,
    celebrating: bool,
}

impl LeaderboardSession {
    pub fn new(client: LeaderboardClient) -> Self {
        Self {
            client,
            retry: RetryPolicy::default(),
            limit: DEFAULT_LIMIT,
            scores: Vec::new(),
            top_snapshot: None,
            filter: String::new(),
            sort: SortDir::default(),
            editing: None,
            error: None,
            notice: None,
            pending: false,
            celebrating: false,
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_limit(mut self, limit: u16) -> Self {
        self.limit = limit;
        self
    }

    pub fn client(&self) -> &LeaderboardClient {
        &self.client
    }

    pub fn scores(&self) -> &[ScoreRecord] {
        &self.scores
    }

    /// Leader as of the last load that returned rows.
    pub fn top_snapshot(&self) -> Option<&ScoreRecord> {
        self.top_snapshot.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// The leader to celebrate, once, after a submission took the top spot.
    pub fn take_celebration(&mut self) -> Option<ScoreRecord> {
        if std::mem::take(&mut self.celebrating) {
            self.top_snapshot.clone()
        } else {
            None
        }
    }

    /// Fetch the top scores, retrying on failure. On success the loaded
    /// rows replace the session's scores; once retries are exhausted the
    /// previous scores stay and an empty list is returned.
    pub async fn load(&mut self) -> Vec<ScoreRecord> {
        self.error = None;
        let client = self.client.clone();
        let limit = self.limit;
        let error = &mut self.error;

        let result = self
            .retry
            .run(|| client.list_scores(limit), |e| *error = Some(e.to_string()))
            .await;

        match result {
            Ok(data) => {
                self.error = None;
                if let Some(first) = data.first() {
                    self.top_snapshot = Some(first.clone());
                }
                self.scores = data.clone();
                data
            }
            Err(_) => Vec::new(),
        }
    }

    /// Submit a validated score, reload, and decide whether it is a new top.
    pub async fn submit(&mut self, new: NewScore) -> Result<SubmitOutcome, ClientError> {
        self.error = None;
        self.pending = true;
        let created = self.client.create_score(&new).await;
        let record = match created {
            Ok(record) => record,
            Err(e) => {
                self.pending = false;
                self.error = Some(e.to_string());
                return Err(e);
            }
        };

        let before = top_score(&self.scores);
        let reloaded = self.load().await;
        let after = top_score(&reloaded);
        let new_top = is_new_top(new.score, before, after);
        debug!(score = new.score, ?before, ?after, new_top, "submission ranked");

        if new_top {
            info!(name = %record.name, score = record.score, "new top score");
            self.celebrating = true;
        }
        self.notice = Some("Score submitted".to_string());
        self.pending = false;
        Ok(SubmitOutcome { record, new_top })
    }

    /// Begin editing a loaded record. Returns false for an unknown id.
    pub fn start_edit(&mut self, id: &str) -> bool {
        match self.scores.iter().find(|r| r.id == id) {
            Some(record) => {
                self.editing = Some(EditDraft::from_record(record));
                true
            }
            None => false,
        }
    }

    pub fn editing(&self) -> Option<&EditDraft> {
        self.editing.as_ref()
    }

    pub fn editing_mut(&mut self) -> Option<&mut EditDraft> {
        self.editing.as_mut()
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Validate the draft, confirm, then send it. Rejected and declined
    /// edits make no request.
    pub async fn save_edit(&mut self, confirm: &mut impl Confirm) -> Result<SaveOutcome, ClientError> {
        let Some(draft) = self.editing.clone() else {
            return Ok(SaveOutcome::NotEditing);
        };
        let current = self.scores.iter().find(|r| r.id == draft.id);

        let patch = match draft.build_patch(current) {
            Ok(patch) => patch,
            Err(rejection) => {
                self.notice = Some(rejection.to_string());
                return Ok(SaveOutcome::Rejected(rejection));
            }
        };

        let prompt = match current {
            Some(current) => format!("Save changes for {}?", current.name),
            None => "Save changes for this score?".to_string(),
        };
        if !confirm.confirm(&prompt) {
            return Ok(SaveOutcome::Declined);
        }

        self.pending = true;
        let result = self.client.update_score(&draft.id, &patch).await;
        let outcome = match result {
            Ok(updated) => {
                self.load().await;
                self.notice = Some("Updated".to_string());
                self.cancel_edit();
                Ok(SaveOutcome::Saved(updated))
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        };
        self.pending = false;
        outcome
    }

    /// Confirm, then delete. Only a 204 response counts as success.
    pub async fn delete(&mut self, id: &str, confirm: &mut impl Confirm) -> Result<DeleteOutcome, ClientError> {
        let prompt = match self.scores.iter().find(|r| r.id == id) {
            Some(row) => format!("Delete {} ({})?", row.name, row.score),
            None => "Delete this score?".to_string(),
        };
        if !confirm.confirm(&prompt) {
            return Ok(DeleteOutcome::Declined);
        }

        self.pending = true;
        let result = self.client.delete_score(id).await;
        let outcome = match result {
            Ok(()) => {
                self.load().await;
                self.notice = Some("Deleted".to_string());
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        };
        self.pending = false;
        outcome
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    pub fn sort(&self) -> SortDir {
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortDir) {
        self.sort = sort;
    }

    pub fn toggle_sort(&mut self) -> SortDir {
        self.sort = self.sort.toggled();
        self.sort
    }

    pub fn displayed(&self) -> Vec<RankedRow<'_>> {
        displayed(&self.scores, &self.filter, self.sort)
    }

    pub fn export_csv(&mut self) -> Result<String, ClientError> {
        let csv = to_csv(&self.displayed())?;
        self.notice = Some("Exported CSV".to_string());
        Ok(csv)
    }

    pub fn copy_top3(&mut self) -> Option<String> {
        let summary = top3_summary(&self.displayed());
        self.notice = Some(match summary {
            Some(_) => "Copied top 3".to_string(),
            None => "No data".to_string(),
        });
        summary
    }
}
