#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod test_support;
pub mod trace_ctx;

#[cfg(test)]
pub mod test_bootstrap;

pub use config::AppConfig;
pub use error::AppError;
pub use errors::ErrorCode;
pub use middleware::{cors_middleware, RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan};
pub use repos::DbMode;
pub use services::ScoreService;
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
