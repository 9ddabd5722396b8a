//! Application configuration loaded once from environment variables.
//!
//! Everything here is read at process start. A missing or unreachable
//! database is not a configuration error; the server degrades to the
//! in-memory store instead.

use std::env;
use std::path::Path;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_MONGODB_URI: &str = "mongodb://127.0.0.1:27017/leaderboard";
pub const DEFAULT_DATABASE: &str = "leaderboard";

/// Document store settings.
#[derive(Debug, Clone, PartialEq)]
pub struct MongoSettings {
    pub uri: String,
    /// Overrides the database named in the URI.
    pub database: Option<String>,
    pub connect_timeout: Duration,
    pub monitor_interval: Duration,
}

/// Which origins the browser client may call from.
#[derive(Debug, Clone, PartialEq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server in memory-only mode.
    pub mongo: Option<MongoSettings>,
    pub cors_origins: AllowedOrigins,
}

impl AppConfig {
    /// Read `.env` from the working directory when present, then load from
    /// the environment. Variables already set in the process take precedence.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Like [`load`](Self::load) with an explicit env file. A missing file is ignored.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        dotenvy::from_path(path.as_ref()).ok();
        Self::from_env()
    }

    /// Load and validate all configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_var::<u16>("BACKEND_PORT", 4000)?;

        let mongo = if flag("DISABLE_MONGO") {
            None
        } else {
            Some(MongoSettings {
                uri: env::var("MONGODB_URI").unwrap_or_else(|_| DEFAULT_MONGODB_URI.to_string()),
                database: env::var("MONGODB_DATABASE")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
                connect_timeout: Duration::from_millis(parse_var(
                    "MONGODB_CONNECT_TIMEOUT_MS",
                    2000,
                )?),
                monitor_interval: Duration::from_millis(parse_var(
                    "MONGODB_MONITOR_INTERVAL_MS",
                    5000,
                )?),
            })
        };

        let cors_origins = parse_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default())?;

        Ok(Self {
            host,
            port,
            mongo,
            cors_origins,
        })
    }

    /// Memory-only configuration on an ephemeral port, for tests.
    pub fn memory_only() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            mongo: None,
            cors_origins: AllowedOrigins::Any,
        }
    }
}

/// Comma-separated origins. Empty input or `*` allows any origin.
/// Entries that are not http(s) URLs are dropped; a list with nothing
/// usable left is a configuration error rather than a silent `Any`.
pub fn parse_origins(raw: &str) -> Result<AllowedOrigins, AppError> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "*" {
        return Ok(AllowedOrigins::Any);
    }

    let origins: Vec<String> = raw
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.trim_end_matches('/').to_string())
        .collect();

    if origins.is_empty() {
        return Err(AppError::config(format!(
            "CORS_ALLOWED_ORIGINS has no http(s) origins, got '{raw}'"
        )));
    }
    Ok(AllowedOrigins::List(origins))
}

fn flag(name: &str) -> bool {
    matches!(
        env::var(name).map(|v| v.to_ascii_lowercase()).as_deref(),
        Ok("1" | "true" | "yes")
    )
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| {
            AppError::config(format!("{name} must be a valid number, got '{raw}'"))
        }),
        Err(_) => Ok(default),
    }
}
