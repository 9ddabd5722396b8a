use actix_web::web;

use crate::error::AppError;

pub mod health;
pub mod scores;

/// Register every application route. Shared by `main.rs` and the test app
/// builder so both serve identical paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::root));

    // Health check: /api/health
    cfg.service(web::scope("/api/health").configure(health::configure_routes));

    // Scores: /api/scores/**
    cfg.service(web::scope("/api/scores").configure(scores::configure_routes));

    // Anything else gets a JSON 404 instead of an empty body
    cfg.default_service(web::to(unknown_route));
}

async fn unknown_route() -> Result<actix_web::HttpResponse, AppError> {
    Err(AppError::not_found("route".to_string()))
}

