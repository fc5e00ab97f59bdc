use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        payment::{ConfirmPaymentDto, CreatePaymentIntentDto, PaymentIntentDto, PaymentStatusDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::payment::PaymentService,
        state::AppState,
    },
};

/// Tag for grouping payment endpoints in OpenAPI documentation
pub static PAYMENT_TAG: &str = "payment";

/// Header carrying the gateway's webhook signature.
static SIGNATURE_HEADER: &str = "stripe-signature";

/// Create a payment intent for one of the caller's bookings.
///
/// # Access Control
/// - `HouseOwner` - Only the booking's owner
///
/// # Returns
/// - `201 Created` - Intent with the client secret used by the payment form
/// - `400 Bad Request` - Booking already paid, cancelled or rejected
/// - `403 Forbidden` - Booking belongs to another owner
/// - `404 Not Found` - Booking not found
#[utoipa::path(
    post,
    path = "/api/payments/create-intent",
    tag = PAYMENT_TAG,
    security(("bearer" = [])),
    request_body = CreatePaymentIntentDto,
    responses(
        (status = 201, description = "Payment intent created", body = PaymentIntentDto),
        (status = 400, description = "Booking cannot be paid", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the booking owner", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreatePaymentIntentDto>,
) -> Result<impl IntoResponse, AppError> {
    let owner = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::HouseOwner])
        .await?;

    let intent = PaymentService::new(&state.db, &state.http_client, &state.config, &state.realtime)
        .create_intent(&owner, payload.booking_id)
        .await?;

    Ok((StatusCode::CREATED, Json(intent.into_dto())))
}

/// Confirm a payment intent and mark the booking paid.
#[utoipa::path(
    post,
    path = "/api/payments/confirm",
    tag = PAYMENT_TAG,
    security(("bearer" = [])),
    request_body = ConfirmPaymentDto,
    responses(
        (status = 200, description = "Booking paid", body = PaymentStatusDto),
        (status = 400, description = "Intent mismatch or payment not succeeded", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the booking owner", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn confirm_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ConfirmPaymentDto>,
) -> Result<impl IntoResponse, AppError> {
    let owner = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::HouseOwner])
        .await?;

    let status = PaymentService::new(&state.db, &state.http_client, &state.config, &state.realtime)
        .confirm(&owner, payload.booking_id, payload.payment_intent_id.trim())
        .await?;

    Ok((
        StatusCode::OK,
        Json(PaymentStatusDto {
            booking_id: payload.booking_id,
            payment_status: status.as_str().to_string(),
        }),
    ))
}

/// Receive a signed event from the payment gateway.
///
/// The raw body is verified against the `Stripe-Signature` header before it is parsed.
///
/// # Returns
/// - `200 OK` - Event accepted
/// - `400 Bad Request` - Missing or invalid signature, or malformed event
/// - `503 Service Unavailable` - No webhook secret configured
#[utoipa::path(
    post,
    path = "/api/payments/webhook",
    tag = PAYMENT_TAG,
    request_body(content = String, description = "Raw gateway event JSON", content_type = "application/json"),
    responses(
        (status = 200, description = "Event accepted", body = MessageDto),
        (status = 400, description = "Invalid signature or payload", body = ErrorDto),
        (status = 503, description = "Webhooks not configured", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    PaymentService::new(&state.db, &state.http_client, &state.config, &state.realtime)
        .handle_webhook(&body, signature)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("received"))))
}
