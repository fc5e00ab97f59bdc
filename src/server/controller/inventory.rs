use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        inventory::{CreateInventoryItemDto, InventoryItemDto, RestockDto, UpdateInventoryItemDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::inventory::{CreateInventoryItemParams, UpdateInventoryItemParams},
        service::inventory::InventoryService,
        state::AppState,
    },
};

/// Tag for grouping inventory endpoints in OpenAPI documentation
pub static INVENTORY_TAG: &str = "inventory";

/// List inventory items.
///
/// House owners and technicians see active items for selection while booking; admins
/// see every item including deactivated ones.
#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = INVENTORY_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Inventory items", body = Vec<InventoryItemDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_items(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let items = InventoryService::new(&state.db)
        .get_all(user.is_admin())
        .await?;
    let dtos: Vec<InventoryItemDto> = items.into_iter().map(|i| i.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// List active items at or below their reorder level.
#[utoipa::path(
    get,
    path = "/api/inventory/low-stock",
    tag = INVENTORY_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Low stock items", body = Vec<InventoryItemDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_low_stock(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let items = InventoryService::new(&state.db).get_low_stock().await?;
    let dtos: Vec<InventoryItemDto> = items.into_iter().map(|i| i.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/inventory/{id}",
    tag = INVENTORY_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Inventory item ID")
    ),
    responses(
        (status = 200, description = "Item details", body = InventoryItemDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let item = InventoryService::new(&state.db).get_by_id(id).await?;

    Ok((StatusCode::OK, Json(item.into_dto())))
}

/// Create an inventory item.
///
/// # Access Control
/// - `Admin` - Only admins can manage stock
///
/// # Returns
/// - `201 Created` - Item created
/// - `400 Bad Request` - Missing name or negative quantity, price or reorder level
#[utoipa::path(
    post,
    path = "/api/inventory",
    tag = INVENTORY_TAG,
    security(("bearer" = [])),
    request_body = CreateInventoryItemDto,
    responses(
        (status = 201, description = "Item created", body = InventoryItemDto),
        (status = 400, description = "Invalid item data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateInventoryItemDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let params = CreateInventoryItemParams::from_dto(payload);
    let item = InventoryService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(item.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/inventory/{id}",
    tag = INVENTORY_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Inventory item ID")
    ),
    request_body = UpdateInventoryItemDto,
    responses(
        (status = 200, description = "Item updated", body = InventoryItemDto),
        (status = 400, description = "Invalid item data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateInventoryItemDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let params = UpdateInventoryItemParams::from_dto(payload);
    let item = InventoryService::new(&state.db).update(id, params).await?;

    Ok((StatusCode::OK, Json(item.into_dto())))
}

/// Add stock to an item.
#[utoipa::path(
    put,
    path = "/api/inventory/{id}/restock",
    tag = INVENTORY_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Inventory item ID")
    ),
    request_body = RestockDto,
    responses(
        (status = 200, description = "Item restocked", body = InventoryItemDto),
        (status = 400, description = "Quantity must be positive", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn restock_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<RestockDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let item = InventoryService::new(&state.db)
        .restock(id, payload.quantity)
        .await?;

    Ok((StatusCode::OK, Json(item.into_dto())))
}

/// Deactivate an item so it can no longer be selected for bookings.
#[utoipa::path(
    delete,
    path = "/api/inventory/{id}",
    tag = INVENTORY_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Inventory item ID")
    ),
    responses(
        (status = 200, description = "Item deactivated", body = MessageDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    InventoryService::new(&state.db).deactivate(id).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Inventory item deactivated"))))
}
