//! Assertions on the API's JSON error body, independent of backend types.

use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct IssueLike {
    pub path: Vec<String>,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBodyLike {
    pub error: String,
    pub code: String,
    pub status: u16,
    pub trace_id: String,
    #[serde(default)]
    pub issues: Option<Vec<IssueLike>>,
}

impl ErrorBodyLike {
    /// Paths of all issues, joined with `.`; empty for root-level issues.
    pub fn issue_paths(&self) -> Vec<String> {
        self.issues
            .iter()
            .flatten()
            .map(|issue| issue.path.join("."))
            .collect()
    }
}

/// Assert status, error message and code, and that the `x-trace-id`
/// header matches the body. Returns the parsed body for further checks.
pub fn assert_error_body(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_status: StatusCode,
    expected_error: &str,
    expected_code: &str,
) -> ErrorBodyLike {
    assert_eq!(status, expected_status, "unexpected status");

    let parsed: ErrorBodyLike = serde_json::from_slice(body).unwrap_or_else(|e| {
        panic!(
            "error body is not valid JSON ({e}): {}",
            String::from_utf8_lossy(body)
        )
    });

    assert_eq!(parsed.error, expected_error);
    assert_eq!(parsed.code, expected_code);
    assert_eq!(parsed.status, expected_status.as_u16());

    let header = headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header present");
    assert_eq!(header, parsed.trace_id, "trace id header/body mismatch");

    parsed
}
