use axum::{http::StatusCode, response::IntoResponse};

use crate::server::error::{auth::AuthError, internal::InternalError, AppError};

/// Tests the status codes of the message-carrying variants.
///
/// Expected: 404, 400, 409 and 503 respectively
#[test]
fn message_variants_map_to_status() {
    let cases = [
        (AppError::NotFound("Booking not found".into()), StatusCode::NOT_FOUND),
        (AppError::BadRequest("bad".into()), StatusCode::BAD_REQUEST),
        (AppError::Conflict("taken".into()), StatusCode::CONFLICT),
        (
            AppError::ServiceUnavailable("Google login is not configured".into()),
            StatusCode::SERVICE_UNAVAILABLE,
        ),
    ];

    for (err, expected) in cases {
        assert_eq!(err.into_response().status(), expected);
    }
}

/// Tests that authentication errors keep their own status mapping.
///
/// Expected: 401 for token and credential problems, 403 for access problems, 400 for codes
#[test]
fn auth_errors_map_to_status() {
    let cases = [
        (AuthError::MissingToken, StatusCode::UNAUTHORIZED),
        (AuthError::InvalidToken("expired".into()), StatusCode::UNAUTHORIZED),
        (AuthError::UserNotInDatabase(7), StatusCode::UNAUTHORIZED),
        (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
        (AuthError::AccountDisabled(7), StatusCode::FORBIDDEN),
        (
            AuthError::AccessDenied(7, "not an admin".into()),
            StatusCode::FORBIDDEN,
        ),
        (AuthError::InvalidCode, StatusCode::BAD_REQUEST),
        (AuthError::CsrfValidationFailed, StatusCode::BAD_REQUEST),
    ];

    for (err, expected) in cases {
        assert_eq!(AppError::from(err).into_response().status(), expected);
    }
}

/// Tests that internal failures are hidden behind a 500.
///
/// Expected: 500 for database and stored-value errors
#[test]
fn internal_errors_map_to_500() {
    let db_err = AppError::DbErr(sea_orm::DbErr::Custom("disk full".into()));
    assert_eq!(
        db_err.into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );

    let stored = AppError::from(InternalError::InvalidStoredValue {
        kind: "booking status",
        value: "lost".into(),
    });
    assert_eq!(
        stored.into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

/// Tests a row that vanished between a write and its read-back.
///
/// Expected: 500, with the entity and id kept in the logged message
#[test]
fn missing_after_write_maps_to_500() {
    let err = InternalError::MissingAfterWrite {
        entity: "feedback",
        id: 3,
    };
    assert_eq!(err.to_string(), "feedback 3 missing after write");

    assert_eq!(
        AppError::from(err).into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}
