use std::ops::{Deref, DerefMut};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Error as JsonError;
use tracing::{debug, warn};

use crate::domain::validation::{Issue, IssueCode};
use crate::error::AppError;
use crate::errors::ErrorCode;

/// Largest request body accepted, matching common JSON body-parser defaults.
pub const MAX_BODY_BYTES: usize = 100 * 1024;

/// JSON body extractor whose failures use the API's validation error shape.
///
/// An empty body is read as `{}` so that missing fields surface as
/// per-field "Required" issues rather than a parse failure.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();

        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("")
            .to_string();

        Box::pin(async move {
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(error = %e, "Failed to read request body chunk");
                    AppError::bad_request(
                        ErrorCode::BadRequest,
                        "Failed to read request body".to_string(),
                    )
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    return Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        "Request body too large".to_string(),
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            let parsed = parse_body::<T>(&body).map_err(|e| {
                debug!(
                    error = %e,
                    content_type = %content_type,
                    body_size = body.len(),
                    "JSON parsing failed"
                );
                AppError::invalid(vec![classify_json_error(&e)])
            })?;

            Ok(ValidatedJson(parsed))
        })
    }
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, JsonError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_slice(b"{}")
    } else {
        serde_json::from_slice(body)
    }
}

/// Turn a parse failure into a single root-level issue without echoing
/// the body back.
fn classify_json_error(error: &JsonError) -> Issue {
    use serde_json::error::Category;

    match error.classify() {
        Category::Syntax => Issue::root(
            IssueCode::InvalidJson,
            format!("Invalid JSON at line {}", error.line()),
        ),
        Category::Eof => Issue::root(IssueCode::InvalidJson, "Invalid JSON: unexpected end of input"),
        Category::Data => Issue::root(IssueCode::InvalidType, "Expected object"),
        Category::Io => Issue::root(IssueCode::InvalidJson, "Invalid JSON: I/O error while reading body"),
    }
}
