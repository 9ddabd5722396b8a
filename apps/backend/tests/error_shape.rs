mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, HttpResponse};
use backend_test_support::assert_error_body;
use leaderboard_backend::test_support::create_test_app_builder;
use leaderboard_backend::AppError;

async fn failing_store() -> Result<HttpResponse, AppError> {
    Err(AppError::db("connection reset by peer at 10.0.0.5".to_string()))
}

#[actix_web::test]
async fn server_errors_hide_detail_and_carry_trace_id() {
    let app = create_test_app_builder(common::memory_state())
        .with_routes(|cfg| {
            cfg.route("/_test/error", web::get().to(failing_store));
        })
        .build()
        .await;

    let req = test::TestRequest::get().uri("/_test/error").to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;

    let parsed = assert_error_body(
        status,
        &headers,
        &body,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error",
        "DB_ERROR",
    );
    assert!(parsed.issues.is_none());
    assert!(!String::from_utf8_lossy(&body).contains("10.0.0.5"));

    // Same id the request middleware assigned.
    let request_id = headers.get("x-request-id").unwrap().to_str().unwrap();
    assert_eq!(parsed.trace_id, request_id);
}

#[actix_web::test]
async fn responses_carry_security_headers() {
    let app = create_test_app_builder(common::memory_state()).build().await;

    let req = test::TestRequest::get().uri("/api/scores").to_request();
    let resp = test::call_service(&app, req).await;
    let headers = resp.headers();

    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("cache-control").unwrap(), "no-store");
    assert!(headers.contains_key("content-security-policy"));
}

#[actix_web::test]
async fn cors_preflight_allows_patch_from_any_origin() {
    let app = create_test_app_builder(common::memory_state()).build().await;

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/scores/abc")
        .insert_header(("origin", "http://localhost:5173"))
        .insert_header(("access-control-request-method", "PATCH"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
}
