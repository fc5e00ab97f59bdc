use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    model::{
        announcement::{AnnouncementDto, CreateAnnouncementDto, UpdateAnnouncementDto},
        api::{ErrorDto, MessageDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::announcement::{CreateAnnouncementParams, UpdateAnnouncementParams},
        service::announcement::AnnouncementService,
        state::AppState,
    },
};

/// Tag for grouping announcement endpoints in OpenAPI documentation
pub static ANNOUNCEMENT_TAG: &str = "announcement";

/// Announcements currently shown to the caller.
///
/// Returns active announcements inside their display window whose audience includes
/// the caller's role, each flagged with whether the caller has read it.
#[utoipa::path(
    get,
    path = "/api/announcements",
    tag = ANNOUNCEMENT_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Announcements for the caller", body = Vec<AnnouncementDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_announcements(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let announcements = AnnouncementService::new(&state.db, &state.realtime)
        .get_for_user(&user, Utc::now())
        .await?;
    let dtos: Vec<AnnouncementDto> = announcements.into_iter().map(|a| a.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Every announcement regardless of audience or window.
#[utoipa::path(
    get,
    path = "/api/announcements/all",
    tag = ANNOUNCEMENT_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All announcements", body = Vec<AnnouncementDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_announcements(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let announcements = AnnouncementService::new(&state.db, &state.realtime)
        .get_all()
        .await?;
    let dtos: Vec<AnnouncementDto> = announcements.into_iter().map(|a| a.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Create an announcement.
///
/// Announcements that are live on creation are pushed to connected users in the
/// audience over the WebSocket stream.
///
/// # Access Control
/// - `Admin` - Only admins can publish announcements
#[utoipa::path(
    post,
    path = "/api/announcements",
    tag = ANNOUNCEMENT_TAG,
    security(("bearer" = [])),
    request_body = CreateAnnouncementDto,
    responses(
        (status = 201, description = "Announcement created", body = AnnouncementDto),
        (status = 400, description = "Invalid announcement data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_announcement(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateAnnouncementDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let params = CreateAnnouncementParams::from_dto(payload, admin.id)?;
    let announcement = AnnouncementService::new(&state.db, &state.realtime)
        .create(params)
        .await?;

    Ok((StatusCode::CREATED, Json(announcement.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/announcements/{id}",
    tag = ANNOUNCEMENT_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Announcement ID")
    ),
    request_body = UpdateAnnouncementDto,
    responses(
        (status = 200, description = "Announcement updated", body = AnnouncementDto),
        (status = 400, description = "Invalid announcement data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Announcement not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_announcement(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAnnouncementDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let params = UpdateAnnouncementParams::from_dto(payload)?;
    let announcement = AnnouncementService::new(&state.db, &state.realtime)
        .update(id, params)
        .await?;

    Ok((StatusCode::OK, Json(announcement.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/announcements/{id}",
    tag = ANNOUNCEMENT_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Announcement ID")
    ),
    responses(
        (status = 204, description = "Announcement deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Announcement not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_announcement(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    AnnouncementService::new(&state.db, &state.realtime)
        .delete(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Record that the caller read an announcement. Repeating the call is harmless.
#[utoipa::path(
    put,
    path = "/api/announcements/{id}/read",
    tag = ANNOUNCEMENT_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Announcement ID")
    ),
    responses(
        (status = 200, description = "Read receipt stored", body = MessageDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Announcement not found or not addressed to the caller", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_announcement_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    AnnouncementService::new(&state.db, &state.realtime)
        .mark_read(id, &user)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Announcement marked read"))))
}
