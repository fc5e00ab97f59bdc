use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Request carried no `Authorization: Bearer` header.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Missing bearer token")]
    MissingToken,

    /// Bearer token failed signature or expiry validation.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Invalid bearer token: {0}")]
    InvalidToken(String),

    /// Token referenced a user that no longer exists.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("User {0} referenced by token not found in database")]
    UserNotInDatabase(i32),

    /// User exists but an admin has deactivated the account.
    ///
    /// Results in a 403 Forbidden response.
    #[error("User {0} is deactivated")]
    AccountDisabled(i32),

    /// User lacks the role or ownership required for the operation.
    ///
    /// The second field is a diagnostic logged server-side only.
    /// Results in a 403 Forbidden response.
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),

    /// Email/password combination did not match.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Verification or reset code missing, wrong, or expired.
    ///
    /// Results in a 400 Bad Request response.
    #[error("Invalid or expired code")]
    InvalidCode,

    /// CSRF state validation failed during OAuth callback.
    ///
    /// The CSRF state token in the OAuth callback URL does not match the token stored
    /// in the session, indicating a potential CSRF attack or an invalid callback request.
    /// Results in a 400 Bad Request response.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// Authorization code exchange or profile fetch with the identity provider failed.
    ///
    /// Results in a 400 Bad Request response.
    #[error("OAuth exchange failed: {0}")]
    OAuthExchangeFailed(String),
}

/// Converts authentication errors into HTTP responses.
///
/// Maps authentication errors to appropriate HTTP status codes and user-friendly error messages:
/// - `MissingToken` / `InvalidToken` / `UserNotInDatabase` → 401 Unauthorized
/// - `InvalidCredentials` → 401 Unauthorized with "Invalid email or password"
/// - `AccountDisabled` / `AccessDenied` → 403 Forbidden
/// - `InvalidCode` → 400 Bad Request
/// - `CsrfValidationFailed` / `OAuthExchangeFailed` → 400 Bad Request with "There was an issue logging you in"
///
/// All errors are logged at debug level for diagnostics while keeping client-facing messages
/// generic to avoid information leakage.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::MissingToken | Self::InvalidToken(_) | Self::UserNotInDatabase(_) => {
                (StatusCode::UNAUTHORIZED, "Authentication required")
            }
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid email or password"),
            Self::AccountDisabled(_) => (StatusCode::FORBIDDEN, "Account is deactivated"),
            Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                "You do not have permission to perform this action",
            ),
            Self::InvalidCode => (StatusCode::BAD_REQUEST, "Invalid or expired code"),
            Self::CsrfValidationFailed | Self::OAuthExchangeFailed(_) => (
                StatusCode::BAD_REQUEST,
                "There was an issue logging you in, please try again.",
            ),
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
