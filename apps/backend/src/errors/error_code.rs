//! Error codes for the leaderboard API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the leaderboard API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Payload failed schema validation
    ValidationError,
    /// Request body could not be read or parsed
    BadRequest,
    /// Identifier is malformed for the active store
    InvalidId,

    // Resource Not Found
    /// Score record not found
    NotFound,

    // System Errors
    /// Backing store failed mid-request
    DbError,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidId => "INVALID_ID",
            Self::NotFound => "NOT_FOUND",
            Self::DbError => "DB_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_strings() {
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::BadRequest.as_str(), "BAD_REQUEST");
        assert_eq!(ErrorCode::InvalidId.as_str(), "INVALID_ID");
        assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
        assert_eq!(ErrorCode::DbError.as_str(), "DB_ERROR");
        assert_eq!(ErrorCode::ConfigError.as_str(), "CONFIG_ERROR");
    }

    #[test]
    fn test_display_trait() {
        assert_eq!(format!("{}", ErrorCode::InvalidId), "INVALID_ID");
        assert_eq!(format!("{}", ErrorCode::NotFound), "NOT_FOUND");
    }
}
