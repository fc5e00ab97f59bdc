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
        user::{
            CreateAddressDto, PaginatedUsersDto, UpdateProfileDto, UpdateUserRoleDto,
            UpdateUserStatusDto, UserDto,
        },
    },
    server::{
        controller::PaginationParams,
        error::{auth::AuthError, AppError},
        middleware::auth::{AuthGuard, Permission},
        model::user::{CreateAddressParams, Role, UpdateProfileParams},
        service::user::UserService,
        state::AppState,
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

#[derive(Deserialize)]
pub struct UserFilterParams {
    pub role: Option<String>,
}

/// Get a paginated list of users.
///
/// Returns all accounts ordered by creation date, optionally filtered by role. Only
/// accessible by admins.
///
/// # Access Control
/// - `Admin` - Only admins can list users
///
/// # Returns
/// - `200 OK` - Page of users
/// - `400 Bad Request` - Unknown role filter
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - User is not an admin
#[utoipa::path(
    get,
    path = "/api/users",
    tag = USER_TAG,
    security(("bearer" = [])),
    params(
        ("role" = Option<String>, Query, description = "Filter by role: admin, house_owner or technician"),
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Page of users", body = PaginatedUsersDto),
        (status = 400, description = "Unknown role", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(filter): Query<UserFilterParams>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let role = filter.role.as_deref().map(str::parse::<Role>).transpose()?;
    let users = UserService::new(&state.db)
        .get_all(role, params.page(), params.entries())
        .await?;

    Ok((StatusCode::OK, Json(users.into_dto())))
}

/// Get all active technicians, for assigning bookings.
#[utoipa::path(
    get,
    path = "/api/users/technicians",
    tag = USER_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Active technicians", body = Vec<UserDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_technicians(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let technicians = UserService::new(&state.db).get_technicians().await?;
    let dtos: Vec<UserDto> = technicians.into_iter().map(|u| u.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Get a user by id.
///
/// # Access Control
/// - `Admin` - Any user
/// - Any authenticated user - Their own account only
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = USER_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = UserDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin and not the requested user", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    if !actor.is_admin() && actor.id != id {
        return Err(AuthError::AccessDenied(
            actor.id,
            format!("User attempted to view user {} without admin role", id),
        )
        .into());
    }

    let user = UserService::new(&state.db).require_by_id(id).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Update the caller's profile.
#[utoipa::path(
    put,
    path = "/api/users/profile",
    tag = USER_TAG,
    security(("bearer" = [])),
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = UserDto),
        (status = 400, description = "Invalid profile data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let user = UserService::new(&state.db)
        .update_profile(&user, UpdateProfileParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Activate or deactivate an account.
///
/// Deactivated users are rejected on their next request. Admins cannot deactivate
/// themselves.
#[utoipa::path(
    put,
    path = "/api/users/{id}/status",
    tag = USER_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserStatusDto,
    responses(
        (status = 200, description = "Status updated", body = UserDto),
        (status = 400, description = "Admin attempted to deactivate themselves", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db)
        .set_active(admin.id, id, payload.is_active)
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Change a user's role.
#[utoipa::path(
    put,
    path = "/api/users/{id}/role",
    tag = USER_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserRoleDto,
    responses(
        (status = 200, description = "Role updated", body = UserDto),
        (status = 400, description = "Unknown role or admin changing their own role", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let role: Role = payload.role.parse()?;
    let user = UserService::new(&state.db)
        .set_role(admin.id, id, role)
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Add an address to the caller's account.
///
/// Marking the new address as default clears the flag on the others.
#[utoipa::path(
    post,
    path = "/api/users/addresses",
    tag = USER_TAG,
    security(("bearer" = [])),
    request_body = CreateAddressDto,
    responses(
        (status = 201, description = "Address added", body = UserDto),
        (status = 400, description = "Missing address fields", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_address(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateAddressDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let user = UserService::new(&state.db)
        .add_address(user.id, CreateAddressParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// Remove one of the caller's addresses.
#[utoipa::path(
    delete,
    path = "/api/users/addresses/{address_id}",
    tag = USER_TAG,
    security(("bearer" = [])),
    params(
        ("address_id" = i32, Path, description = "Address ID")
    ),
    responses(
        (status = 200, description = "Address removed", body = UserDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Address not found on this account", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_address(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(address_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let user = UserService::new(&state.db)
        .delete_address(user.id, address_id)
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}
