//! HTTP client for the leaderboard API.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Action, ClientError};
use crate::model::{ApiErrorBody, Health, NewScore, ScorePatch, ScoreRecord};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:4000";

/// Thin wrapper over `reqwest::Client`. Cheap to clone.
#[derive(Debug, Clone)]
pub struct LeaderboardClient {
    base_url: String,
    http: reqwest::Client,
}

impl LeaderboardClient {
    /// A trailing `/` on `base_url` is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn list_scores(&self, limit: u16) -> Result<Vec<ScoreRecord>, ClientError> {
        let action = Action::Load;
        let response = self
            .http
            .get(self.url("/api/scores"))
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(|source| ClientError::Transport { action, source })?;
        decode(action, expect_success(action, response).await?).await
    }

    pub async fn create_score(&self, new: &NewScore) -> Result<ScoreRecord, ClientError> {
        let action = Action::Submit;
        debug!(name = %new.name, score = new.score, "submitting score");
        let response = self
            .http
            .post(self.url("/api/scores"))
            .json(new)
            .send()
            .await
            .map_err(|source| ClientError::Transport { action, source })?;
        decode(action, expect_success(action, response).await?).await
    }

    pub async fn update_score(&self, id: &str, patch: &ScorePatch) -> Result<ScoreRecord, ClientError> {
        let action = Action::Update;
        let response = self
            .http
            .patch(self.url(&format!("/api/scores/{id}")))
            .json(patch)
            .send()
            .await
            .map_err(|source| ClientError::Transport { action, source })?;
        decode(action, expect_success(action, response).await?).await
    }

    /// Succeeds only on `204 No Content`; any other status is a failure.
    pub async fn delete_score(&self, id: &str) -> Result<(), ClientError> {
        let action = Action::Delete;
        let response = self
            .http
            .delete(self.url(&format!("/api/scores/{id}")))
            .send()
            .await
            .map_err(|source| ClientError::Transport { action, source })?;

        if response.status() == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            Err(status_error(action, response).await)
        }
    }

    pub async fn health(&self) -> Result<Health, ClientError> {
        let action = Action::Health;
        let response = self
            .http
            .get(self.url("/api/health"))
            .send()
            .await
            .map_err(|source| ClientError::Transport { action, source })?;
        decode(action, expect_success(action, response).await?).await
    }
}

async fn expect_success(action: Action, response: Response) -> Result<Response, ClientError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(status_error(action, response).await)
    }
}

async fn status_error(action: Action, response: Response) -> ClientError {
    let status = response.status().as_u16();
    let body = response.json::<ApiErrorBody>().await.ok();
    debug!(%action, status, error = ?body.as_ref().map(|b| &b.error), "request rejected");
    ClientError::Status { action, status, body }
}

async fn decode<T: DeserializeOwned>(action: Action, response: Response) -> Result<T, ClientError> {
    response
        .json::<T>()
        .await
        .map_err(|source| ClientError::Decode { action, source })
}
