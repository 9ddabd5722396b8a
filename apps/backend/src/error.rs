use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::domain::validation::Issue;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::errors::ErrorCode;
use crate::trace_ctx;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
    pub status: u16,
    pub trace_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<Issue>>,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation {
        code: ErrorCode,
        detail: String,
        issues: Vec<Issue>,
    },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Error code carried by this variant
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::BadRequest { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Db { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing summary. Server-side failures never expose their detail.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation { .. } => "Invalid payload".to_string(),
            AppError::BadRequest { detail, .. } => detail.clone(),
            AppError::NotFound { .. } => "Not found".to_string(),
            AppError::Db { .. } | AppError::Config { .. } => {
                "Internal Server Error".to_string()
            }
        }
    }

    pub fn invalid(issues: Vec<Issue>) -> Self {
        Self::Validation {
            code: ErrorCode::ValidationError,
            detail: format!("{} issue(s)", issues.len()),
            issues,
        }
    }

    pub fn invalid_id() -> Self {
        Self::BadRequest {
            code: ErrorCode::InvalidId,
            detail: "Invalid id".to_string(),
        }
    }

    pub fn bad_request(code: ErrorCode, detail: String) -> Self {
        Self::BadRequest { code, detail }
    }

    pub fn not_found(detail: String) -> Self {
        Self::NotFound {
            code: ErrorCode::NotFound,
            detail,
        }
    }

    pub fn db(detail: String) -> Self {
        Self::Db { detail }
    }

    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }

    fn issues(&self) -> Option<Vec<Issue>> {
        match self {
            AppError::Validation { issues, .. } => Some(issues.clone()),
            _ => None,
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(issues) => AppError::invalid(issues),
            DomainError::InvalidId(_) => AppError::invalid_id(),
            DomainError::NotFound(_, detail) => AppError::not_found(detail),
            DomainError::Infra(InfraErrorKind::DbUnavailable, detail) => {
                AppError::db(format!("store unavailable: {detail}"))
            }
            DomainError::Infra(kind, detail) => AppError::db(format!("{kind:?}: {detail}")),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            error!(trace_id = %trace_id, error = %self, "request_failed");
        }

        let body = ErrorBody {
            error: self.public_message(),
            code: self.code().as_str().to_string(),
            status: status.as_u16(),
            trace_id: trace_id.clone(),
            issues: self.issues(),
        };

        HttpResponse::build(status)
            .insert_header(("x-trace-id", trace_id))
            .json(body)
    }
}
