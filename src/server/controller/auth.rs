use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        auth::{
            AuthResponseDto, ChangePasswordDto, ForgotPasswordDto, LoginDto, RegisterDto,
            ResetPasswordDto, VerifyEmailDto,
        },
        user::UserDto,
    },
    server::{
        error::{auth::AuthError, AppError},
        middleware::{auth::AuthGuard, session::CsrfSession},
        model::user::{RegisterParams, User},
        service::{auth::AuthService, oauth::GoogleAuthService},
        state::AppState,
    },
};

/// Tag for grouping authentication endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Query parameters for the OAuth callback endpoint.
///
/// # Fields
/// - `state` - CSRF protection token that must match the value stored in the session
/// - `code` - Authorization code used to exchange for access tokens
#[derive(Deserialize)]
pub struct CallbackParams {
    /// CSRF state token to be validated against the session value.
    pub state: String,
    /// Authorization code from Google for token exchange.
    pub code: String,
}

fn auth_response(token: String, user: User) -> AuthResponseDto {
    AuthResponseDto {
        token,
        user: user.into_dto(),
    }
}

/// Register a new account.
///
/// Creates a house owner or technician account and emails a verification code. The
/// response carries a bearer token so the client is signed in straight away.
///
/// # Returns
/// - `201 Created` - Account created
/// - `400 Bad Request` - Invalid email, role or password
/// - `409 Conflict` - Email already registered
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = AuthResponseDto),
        (status = 400, description = "Invalid registration data", body = ErrorDto),
        (status = 409, description = "Email already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = RegisterParams::from_dto(payload)?;
    let (token, user) = AuthService::new(&state.db, &state.http_client, &state.config, &state.tokens)
        .register(params)
        .await?;

    Ok((StatusCode::CREATED, Json(auth_response(token, user))))
}

/// Sign in with email and password.
///
/// # Returns
/// - `200 OK` - Credentials accepted
/// - `401 Unauthorized` - Unknown email or wrong password
/// - `403 Forbidden` - Account deactivated
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Signed in", body = AuthResponseDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 403, description = "Account deactivated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let (token, user) = AuthService::new(&state.db, &state.http_client, &state.config, &state.tokens)
        .login(&payload.email, payload.password)
        .await?;

    Ok((StatusCode::OK, Json(auth_response(token, user))))
}

/// Get the signed-in user.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = AUTH_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Verify the caller's email with the code sent at registration.
///
/// # Returns
/// - `200 OK` - Email verified (or already verified)
/// - `400 Bad Request` - Code wrong or expired
/// - `401 Unauthorized` - Not authenticated
#[utoipa::path(
    post,
    path = "/api/auth/verify-email",
    tag = AUTH_TAG,
    security(("bearer" = [])),
    request_body = VerifyEmailDto,
    responses(
        (status = 200, description = "Email verified", body = UserDto),
        (status = 400, description = "Invalid or expired code", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn verify_email(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<VerifyEmailDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let user = AuthService::new(&state.db, &state.http_client, &state.config, &state.tokens)
        .verify_email(user.id, payload.code.trim())
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Send a fresh verification code to the caller's email.
#[utoipa::path(
    post,
    path = "/api/auth/resend-verification",
    tag = AUTH_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Verification code sent", body = MessageDto),
        (status = 400, description = "Email already verified", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn resend_verification(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    AuthService::new(&state.db, &state.http_client, &state.config, &state.tokens)
        .resend_verification(&user)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Verification code sent"))))
}

/// Request a password reset code.
///
/// Always answers 200 so the endpoint cannot be used to discover registered emails.
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    tag = AUTH_TAG,
    request_body = ForgotPasswordDto,
    responses(
        (status = 200, description = "Reset code sent if the account exists", body = MessageDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthService::new(&state.db, &state.http_client, &state.config, &state.tokens)
        .forgot_password(&payload.email)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new(
            "If the account exists, a reset code has been sent",
        )),
    ))
}

/// Set a new password using a reset code.
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    tag = AUTH_TAG,
    request_body = ResetPasswordDto,
    responses(
        (status = 200, description = "Password reset", body = MessageDto),
        (status = 400, description = "Invalid code or weak password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthService::new(&state.db, &state.http_client, &state.config, &state.tokens)
        .reset_password(&payload.email, payload.code.trim(), payload.new_password)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Password has been reset"))))
}

/// Change the caller's password.
#[utoipa::path(
    put,
    path = "/api/auth/change-password",
    tag = AUTH_TAG,
    security(("bearer" = [])),
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = MessageDto),
        (status = 400, description = "Current password wrong or new password too weak", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    AuthService::new(&state.db, &state.http_client, &state.config, &state.tokens)
        .change_password(user.id, payload.current_password, payload.new_password)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Password changed"))))
}

/// Start Google sign-in.
///
/// Stores a CSRF state in the session and redirects to Google's consent screen.
///
/// # Returns
/// - `307 Temporary Redirect` - Redirect to Google
/// - `503 Service Unavailable` - Google login is not configured
#[utoipa::path(
    get,
    path = "/api/auth/google",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Redirect to Google"),
        (status = 503, description = "Google login not configured", body = ErrorDto)
    ),
)]
pub async fn google_login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = google_service(&state)?;

    let (url, csrf_token) = auth_service.login_url();

    CsrfSession::new(&session)
        .set_token(csrf_token.secret().clone())
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

/// Finish Google sign-in.
///
/// Validates the CSRF state, exchanges the code and redirects back to the app with a
/// bearer token in the query string.
///
/// # Returns
/// - `307 Temporary Redirect` - Redirect to `{APP_URL}/auth/callback?token=...`
/// - `400 Bad Request` - CSRF state mismatch or code exchange failure
/// - `403 Forbidden` - Matched account is deactivated
/// - `503 Service Unavailable` - Google login is not configured
#[utoipa::path(
    get,
    path = "/api/auth/google/callback",
    tag = AUTH_TAG,
    params(
        ("state" = String, Query, description = "CSRF state returned by Google"),
        ("code" = String, Query, description = "Authorization code")
    ),
    responses(
        (status = 307, description = "Redirect to the app with a token"),
        (status = 400, description = "CSRF validation or code exchange failed", body = ErrorDto),
        (status = 403, description = "Account deactivated", body = ErrorDto),
        (status = 503, description = "Google login not configured", body = ErrorDto)
    ),
)]
pub async fn google_callback(
    State(state): State<AppState>,
    session: Session,
    params: Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = google_service(&state)?;

    validate_csrf(&session, &params.0.state).await?;

    let (token, user) = auth_service.callback(params.0.code).await?;

    tracing::info!(user_id = user.id, "Google sign-in completed");

    let mut url = url::Url::parse(&format!(
        "{}/auth/callback",
        state.config.app_url.trim_end_matches('/')
    ))
    .map_err(|e| AppError::InternalError(format!("Invalid APP_URL: {}", e)))?;
    url.query_pairs_mut().append_pair("token", &token);

    Ok(Redirect::temporary(url.as_str()))
}

fn google_service(state: &AppState) -> Result<GoogleAuthService<'_>, AppError> {
    match (&state.oauth_client, &state.config.google) {
        (Some(oauth_client), Some(google)) => Ok(GoogleAuthService::new(
            &state.db,
            &state.http_client,
            oauth_client,
            google,
            &state.tokens,
        )),
        _ => Err(AppError::ServiceUnavailable(
            "Google login is not configured".to_string(),
        )),
    }
}

async fn validate_csrf(session: &Session, csrf_state: &str) -> Result<(), AppError> {
    let stored_state = CsrfSession::new(session).take_token().await?;

    if let Some(state) = stored_state {
        if state == csrf_state {
            return Ok(());
        }
    }

    Err(AppError::AuthErr(AuthError::CsrfValidationFailed))
}
