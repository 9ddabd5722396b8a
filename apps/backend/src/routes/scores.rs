//! `/api/scores` endpoints.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::Value;
use serde_with::rust::double_option;

use crate::domain::validation::{validate_create, validate_patch};
use crate::domain::Limit;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Create/patch body. Fields are kept as raw JSON so validation can report
/// type mismatches per field, and `null` stays distinct from absent.
#[derive(Debug, Default, Deserialize)]
pub struct ScoreBody {
    #[serde(default, with = "double_option")]
    pub name: Option<Option<Value>>,
    #[serde(default, with = "double_option")]
    pub score: Option<Option<Value>>,
}

/// Raw query pairs. Read as a list so repeated or unexpected keys never
/// reject the request; the first `limit` wins.
type ListQuery = web::Query<Vec<(String, String)>>;

fn first_limit(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(key, _)| key == "limit")
        .map(|(_, value)| value.as_str())
}

async fn list_scores(
    query: ListQuery,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let limit = Limit::from_query(first_limit(&query));
    let records = app_state.scores.list(limit).await?;
    Ok(HttpResponse::Ok().json(records))
}

async fn create_score(
    body: ValidatedJson<ScoreBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let new = validate_create((&body.name).into(), (&body.score).into())
        .map_err(AppError::invalid)?;
    let record = app_state.scores.create(new).await?;
    Ok(HttpResponse::Created().json(record))
}

async fn update_score(
    path: web::Path<String>,
    body: ValidatedJson<ScoreBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let patch = validate_patch((&body.name).into(), (&body.score).into())
        .map_err(AppError::invalid)?;
    let record = app_state.scores.update(&id, patch).await?;
    Ok(HttpResponse::Ok().json(record))
}

async fn delete_score(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state.scores.delete(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_scores))
        .route("", web::post().to(create_score))
        .route("/{id}", web::patch().to(update_score))
        .route("/{id}", web::delete().to(delete_score));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_distinguishes_null_from_absent() {
        let body: ScoreBody = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(body.name, Some(None));
        assert_eq!(body.score, None);
    }

    #[test]
    fn first_limit_wins_when_repeated() {
        let pairs = vec![
            ("sort".to_string(), "asc".to_string()),
            ("limit".to_string(), "5".to_string()),
            ("limit".to_string(), "7".to_string()),
        ];
        assert_eq!(first_limit(&pairs), Some("5"));
        assert_eq!(first_limit(&[]), None);
    }

    #[test]
    fn body_ignores_unknown_fields() {
        let body: ScoreBody =
            serde_json::from_str(r#"{"name": "Ann", "score": 5, "rank": 1}"#).unwrap();
        assert!(matches!(body.name, Some(Some(Value::String(ref s))) if s == "Ann"));
    }
}
