// Error mapping from domain errors to HTTP statuses and websocket error codes
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::ErrorCode;
use crate::ws::protocol::ErrorCode as WsErrorCode;
use crate::AppError;

#[test]
fn maps_infra_failures() {
    let unavailable: AppError =
        DomainError::infra(InfraErrorKind::DbUnavailable, "pool exhausted").into();
    assert_eq!(unavailable.code(), ErrorCode::DbUnavailable);
    assert_eq!(unavailable.status().as_u16(), 503);

    let timeout: AppError = DomainError::infra(InfraErrorKind::Timeout, "slow insert").into();
    assert_eq!(timeout.code(), ErrorCode::DbError);
    assert_eq!(timeout.status().as_u16(), 500);
}

#[test]
fn maps_generic_not_found() {
    let app: AppError =
        DomainError::not_found(NotFoundKind::Other("row".into()), "no such row").into();
    assert_eq!(app.code(), ErrorCode::NotFound);
    assert_eq!(app.status().as_u16(), 404);
}

#[test]
fn unauthorized_hides_detail() {
    let app = AppError::unauthorized(ErrorCode::UnauthorizedExpiredJwt);
    assert_eq!(app.status().as_u16(), 401);
    assert_eq!(app.detail(), "Authentication required");
}

#[test]
fn websocket_codes_follow_app_codes() {
    let unknown: AppError =
        DomainError::not_found(NotFoundKind::Category, "unknown category 'pair'").into();
    assert_eq!(WsErrorCode::from(&unknown), WsErrorCode::UnknownCategory);

    let invalid: AppError = DomainError::validation("die face must be 1..=6").into();
    assert_eq!(WsErrorCode::from(&invalid), WsErrorCode::BadRequest);

    let malformed = AppError::bad_request(ErrorCode::BadRequest, "Malformed JSON");
    assert_eq!(WsErrorCode::from(&malformed), WsErrorCode::BadRequest);

    let db = AppError::internal("boom");
    assert_eq!(WsErrorCode::from(&db), WsErrorCode::Internal);
}
