use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        service_offering::{
            CreateServiceOfferingDto, ServiceOfferingDto, UpdateServiceOfferingDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::service_offering::{CreateServiceOfferingParams, UpdateServiceOfferingParams},
        service::service_offering::ServiceOfferingService,
        state::AppState,
    },
};

/// Tag for grouping service catalogue endpoints in OpenAPI documentation
pub static SERVICE_TAG: &str = "service";

#[derive(Deserialize)]
pub struct ServiceFilterParams {
    pub category: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

/// List bookable services.
///
/// Public. Returns active services, optionally filtered by category. Signed-in admins
/// may pass `include_inactive=true` to see deactivated services too; the flag is
/// ignored for everyone else.
#[utoipa::path(
    get,
    path = "/api/services",
    tag = SERVICE_TAG,
    params(
        ("category" = Option<String>, Query, description = "Filter by category"),
        ("include_inactive" = Option<bool>, Query, description = "Admins only: include deactivated services")
    ),
    responses(
        (status = 200, description = "Services", body = Vec<ServiceOfferingDto>),
        (status = 401, description = "Invalid token supplied", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_services(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(filter): Query<ServiceFilterParams>,
) -> Result<impl IntoResponse, AppError> {
    let include_inactive = if filter.include_inactive {
        AuthGuard::new(&state.db, &state.tokens, &headers)
            .optional()
            .await?
            .is_some_and(|user| user.is_admin())
    } else {
        false
    };

    let services = ServiceOfferingService::new(&state.db)
        .get_all(filter.category, include_inactive)
        .await?;
    let dtos: Vec<ServiceOfferingDto> = services.into_iter().map(|s| s.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// List the distinct categories of active services.
#[utoipa::path(
    get,
    path = "/api/services/categories",
    tag = SERVICE_TAG,
    responses(
        (status = 200, description = "Categories", body = Vec<String>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_categories(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let categories = ServiceOfferingService::new(&state.db)
        .get_categories()
        .await?;

    Ok((StatusCode::OK, Json(categories)))
}

#[utoipa::path(
    get,
    path = "/api/services/{id}",
    tag = SERVICE_TAG,
    params(
        ("id" = i32, Path, description = "Service ID")
    ),
    responses(
        (status = 200, description = "Service details", body = ServiceOfferingDto),
        (status = 404, description = "Service not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let service = ServiceOfferingService::new(&state.db).get_by_id(id).await?;

    Ok((StatusCode::OK, Json(service.into_dto())))
}

/// Create a service.
///
/// # Access Control
/// - `Admin` - Only admins can manage the catalogue
#[utoipa::path(
    post,
    path = "/api/services",
    tag = SERVICE_TAG,
    security(("bearer" = [])),
    request_body = CreateServiceOfferingDto,
    responses(
        (status = 201, description = "Service created", body = ServiceOfferingDto),
        (status = 400, description = "Invalid service data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_service(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateServiceOfferingDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let params = CreateServiceOfferingParams::from_dto(payload);
    let service = ServiceOfferingService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(service.into_dto())))
}

/// Update a service. Omitted fields are left unchanged.
#[utoipa::path(
    put,
    path = "/api/services/{id}",
    tag = SERVICE_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Service ID")
    ),
    request_body = UpdateServiceOfferingDto,
    responses(
        (status = 200, description = "Service updated", body = ServiceOfferingDto),
        (status = 400, description = "Invalid service data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Service not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_service(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateServiceOfferingDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let params = UpdateServiceOfferingParams::from_dto(payload);
    let service = ServiceOfferingService::new(&state.db)
        .update(id, params)
        .await?;

    Ok((StatusCode::OK, Json(service.into_dto())))
}

/// Deactivate a service.
///
/// Services are never hard-deleted because existing bookings reference them.
#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    tag = SERVICE_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Service ID")
    ),
    responses(
        (status = 200, description = "Service deactivated", body = MessageDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Service not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_service(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    ServiceOfferingService::new(&state.db).deactivate(id).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Service deactivated"))))
}
