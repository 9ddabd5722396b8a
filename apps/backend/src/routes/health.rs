use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;
use crate::repos::DbMode;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct ServiceInfo {
    service: &'static str,
    endpoints: [&'static str; 2],
}

pub async fn root() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(ServiceInfo {
        service: "leaderboard-api",
        endpoints: ["/api/health", "/api/scores"],
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    ok: bool,
    db_mode: DbMode,
}

/// Liveness plus the store that would serve a request right now.
async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(HealthResponse {
        ok: true,
        db_mode: app_state.scores.db_mode(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(health));
}
