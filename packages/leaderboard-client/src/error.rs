use std::fmt;

use thiserror::Error;

use crate::model::ApiErrorBody;

/// The user-facing operation a request belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Load,
    Submit,
    Update,
    Delete,
    Health,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Load => "load",
            Action::Submit => "submit",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Health => "check health",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    /// The server answered with a status the operation does not accept.
    #[error("Failed to {action}: {status}")]
    Status {
        action: Action,
        status: u16,
        body: Option<ApiErrorBody>,
    },
    /// The request never produced a response.
    #[error("Failed to {action}: {source}")]
    Transport {
        action: Action,
        #[source]
        source: reqwest::Error,
    },
    /// The response arrived but its body was not the expected JSON.
    #[error("Failed to {action}: unreadable response ({source})")]
    Decode {
        action: Action,
        #[source]
        source: reqwest::Error,
    },
    #[error("Export failed: {0}")]
    Export(String),
}

impl ClientError {
    /// HTTP status, when the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-side error summary, e.g. "Invalid payload".
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Status { body: Some(body), .. } => Some(body.error.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_read_like_the_failed_action() {
        let err = ClientError::Status {
            action: Action::Load,
            status: 503,
            body: None,
        };
        assert_eq!(err.to_string(), "Failed to load: 503");
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.server_message(), None);
    }
}
