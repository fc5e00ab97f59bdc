use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        feedback::{
            CreateFeedbackDto, FeedbackDto, PaginatedFeedbackDto, RespondFeedbackDto,
            TechnicianFeedbackDto, UpdateFeedbackStatusDto,
        },
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::feedback::{FeedbackStatus, SubmitFeedbackParams},
        service::feedback::FeedbackService,
        state::AppState,
    },
};

/// Tag for grouping feedback endpoints in OpenAPI documentation
pub static FEEDBACK_TAG: &str = "feedback";

#[derive(Deserialize)]
pub struct FeedbackFilterParams {
    pub status: Option<String>,
}

/// Leave feedback for a completed booking.
///
/// Completing a booking stores placeholder feedback with top ratings; the owner's own
/// feedback replaces it. A second submission from the owner is rejected.
///
/// # Access Control
/// - `HouseOwner` - Only the booking's owner
///
/// # Returns
/// - `201 Created` - Feedback stored, pending moderation
/// - `400 Bad Request` - Ratings out of range or booking not completed
/// - `403 Forbidden` - Booking belongs to another owner
/// - `404 Not Found` - Booking not found
/// - `409 Conflict` - Feedback already submitted
#[utoipa::path(
    post,
    path = "/api/feedback",
    tag = FEEDBACK_TAG,
    security(("bearer" = [])),
    request_body = CreateFeedbackDto,
    responses(
        (status = 201, description = "Feedback stored", body = FeedbackDto),
        (status = 400, description = "Invalid ratings or booking not completed", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the booking owner", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto),
        (status = 409, description = "Feedback already submitted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateFeedbackDto>,
) -> Result<impl IntoResponse, AppError> {
    let owner = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::HouseOwner])
        .await?;

    let params = SubmitFeedbackParams::from_dto(payload);
    let feedback = FeedbackService::new(&state.db, &state.realtime)
        .create(&owner, params)
        .await?;

    Ok((StatusCode::CREATED, Json(feedback.into_dto())))
}

/// List feedback for moderation.
#[utoipa::path(
    get,
    path = "/api/feedback",
    tag = FEEDBACK_TAG,
    security(("bearer" = [])),
    params(
        ("status" = Option<String>, Query, description = "Filter by status: pending, published or hidden"),
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Page of feedback", body = PaginatedFeedbackDto),
        (status = 400, description = "Unknown status filter", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(filter): Query<FeedbackFilterParams>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let status = filter
        .status
        .as_deref()
        .map(str::parse::<FeedbackStatus>)
        .transpose()?;
    let feedback = FeedbackService::new(&state.db, &state.realtime)
        .get_paginated(status, params.page(), params.entries())
        .await?;

    Ok((StatusCode::OK, Json(feedback.into_dto())))
}

/// Published feedback for a technician with their rating summary. Public.
#[utoipa::path(
    get,
    path = "/api/feedback/technician/{id}",
    tag = FEEDBACK_TAG,
    params(
        ("id" = i32, Path, description = "Technician user ID")
    ),
    responses(
        (status = 200, description = "Rating summary and published feedback", body = TechnicianFeedbackDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_technician_feedback(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let (summary, feedback) = FeedbackService::new(&state.db, &state.realtime)
        .get_for_technician(id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(TechnicianFeedbackDto {
            summary: summary.into_dto(),
            feedback: feedback.into_iter().map(|f| f.into_dto()).collect(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/feedback/booking/{booking_id}",
    tag = FEEDBACK_TAG,
    security(("bearer" = [])),
    params(
        ("booking_id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Feedback for the booking", body = FeedbackDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not a participant", body = ErrorDto),
        (status = 404, description = "Booking or feedback not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_booking_feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(booking_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let feedback = FeedbackService::new(&state.db, &state.realtime)
        .get_for_booking(&user, booking_id)
        .await?;

    Ok((StatusCode::OK, Json(feedback.into_dto())))
}

/// Attach an admin response to feedback and notify its author.
#[utoipa::path(
    put,
    path = "/api/feedback/{id}/respond",
    tag = FEEDBACK_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Feedback ID")
    ),
    request_body = RespondFeedbackDto,
    responses(
        (status = 200, description = "Response stored", body = FeedbackDto),
        (status = 400, description = "Empty response", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Feedback not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn respond_to_feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<RespondFeedbackDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let feedback = FeedbackService::new(&state.db, &state.realtime)
        .respond(&admin, id, payload.message)
        .await?;

    Ok((StatusCode::OK, Json(feedback.into_dto())))
}

/// Publish or hide feedback.
#[utoipa::path(
    put,
    path = "/api/feedback/{id}/status",
    tag = FEEDBACK_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Feedback ID")
    ),
    request_body = UpdateFeedbackStatusDto,
    responses(
        (status = 200, description = "Status updated", body = FeedbackDto),
        (status = 400, description = "Unknown status", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Feedback not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_feedback_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateFeedbackStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let status: FeedbackStatus = payload.status.parse()?;
    let feedback = FeedbackService::new(&state.db, &state.realtime)
        .set_status(id, status)
        .await?;

    Ok((StatusCode::OK, Json(feedback.into_dto())))
}
