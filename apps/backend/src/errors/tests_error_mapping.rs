// Unit tests for error mapping - pure domain logic without HTTP or store dependencies
use crate::domain::validation::{Issue, IssueCode};
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_400_with_issues() {
    let de = DomainError::validation(vec![Issue::new(
        &["score"],
        IssueCode::TooBig,
        "too big",
    )]);
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.status().as_u16(), 400);
    assert_eq!(app.public_message(), "Invalid payload");
    assert!(matches!(app, AppError::Validation { ref issues, .. } if issues.len() == 1));
}

#[test]
fn maps_invalid_id_to_400() {
    let app: AppError = DomainError::invalid_id("xyz").into();
    assert_eq!(app.code(), ErrorCode::InvalidId);
    assert_eq!(app.status().as_u16(), 400);
    assert_eq!(app.public_message(), "Invalid id");
}

#[test]
fn maps_not_found() {
    let nf = DomainError::not_found(NotFoundKind::Score, "score abc");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);
    assert_eq!(app.public_message(), "Not found");
}

#[test]
fn maps_infra_without_leaking_detail() {
    let down = DomainError::infra(InfraErrorKind::DbUnavailable, "connection refused on 10.0.0.5");
    let app: AppError = down.into();
    assert_eq!(app.status().as_u16(), 500);
    assert_eq!(app.public_message(), "Internal Server Error");
    assert!(app.to_string().contains("connection refused"));

    let driver = DomainError::infra(InfraErrorKind::Other("mongo".into()), "write conflict");
    let app: AppError = driver.into();
    assert_eq!(app.code(), ErrorCode::DbError);
    assert_eq!(app.public_message(), "Internal Server Error");
}
