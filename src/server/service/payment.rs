//! Payment service.
//!
//! Talks to a Stripe-compatible gateway to create and confirm payment intents for
//! bookings, and applies signed webhook events. Without a configured gateway, mock
//! intents are issued and confirm immediately.

use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::Rng;
use sea_orm::DatabaseConnection;
use sha2::Sha256;

use crate::server::{
    config::{Config, StripeConfig},
    data::booking::BookingRepository,
    error::{auth::AuthError, AppError},
    model::{
        booking::{BookingStatus, PaymentStatus},
        notification::{CreateNotificationParams, NotificationKind},
        parse_stored,
        payment::{
            to_minor_units, GatewayIntent, PaymentIntent, WebhookEvent, MOCK_INTENT_PREFIX,
        },
        user::User,
    },
    service::{notification::NotificationService, realtime::RealtimeHub},
};

type HmacSha256 = Hmac<Sha256>;

/// Maximum age, in seconds, of a webhook signature timestamp.
pub const WEBHOOK_TOLERANCE_SECS: i64 = 300;

pub struct PaymentService<'a> {
    db: &'a DatabaseConnection,
    http_client: &'a reqwest::Client,
    config: &'a Config,
    realtime: &'a RealtimeHub,
}

impl<'a> PaymentService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        config: &'a Config,
        realtime: &'a RealtimeHub,
    ) -> Self {
        Self {
            db,
            http_client,
            config,
            realtime,
        }
    }

    /// Creates a payment intent for the owner's unpaid booking and stores its id.
    ///
    /// # Returns
    /// - `Ok(PaymentIntent)` - Intent with the client secret for the front end
    /// - `Err(AppError::NotFound)` - Booking not found
    /// - `Err(AppError::AuthErr)` - Booking belongs to someone else
    /// - `Err(AppError::BadRequest)` - Booking already paid, closed, or has no amount due
    /// - `Err(AppError::ReqwestErr)` - Gateway request failed
    pub async fn create_intent(
        &self,
        owner: &User,
        booking_id: i32,
    ) -> Result<PaymentIntent, AppError> {
        let booking = self.load_owned_booking(owner, booking_id).await?;

        ensure_open(&booking)?;
        let payment_status: PaymentStatus =
            parse_stored("payment status", &booking.payment_status)?;
        if payment_status == PaymentStatus::Paid {
            return Err(AppError::BadRequest("Booking is already paid".to_string()));
        }

        let amount = to_minor_units(booking.total_amount);
        if amount <= 0 {
            return Err(AppError::BadRequest("Booking has no amount due".to_string()));
        }
        let currency = self.config.currency.clone();

        let intent = match &self.config.stripe {
            Some(stripe) => {
                let created: GatewayIntent = self
                    .http_client
                    .post(format!("{}/payment_intents", stripe.api_base.trim_end_matches('/')))
                    .bearer_auth(&stripe.secret_key)
                    .form(&[
                        ("amount", amount.to_string()),
                        ("currency", currency.clone()),
                        ("metadata[booking_id]", booking.id.to_string()),
                    ])
                    .send()
                    .await?
                    .error_for_status()?
                    .json()
                    .await?;

                PaymentIntent {
                    client_secret: created.client_secret.unwrap_or_default(),
                    id: created.id,
                    amount,
                    currency,
                }
            }
            None => {
                let suffix: u32 = rand::rng().random();
                let id = format!("{}{}_{:08x}", MOCK_INTENT_PREFIX, booking.id, suffix);
                PaymentIntent {
                    client_secret: format!("{}_secret_mock", id),
                    id,
                    amount,
                    currency,
                }
            }
        };

        BookingRepository::new(self.db)
            .set_payment_intent(booking.id, &intent.id)
            .await?;

        tracing::info!(booking_id, payment_intent_id = %intent.id, amount, "Payment intent created");

        Ok(intent)
    }

    /// Confirms the booking's payment intent with the gateway and marks the booking paid.
    ///
    /// # Returns
    /// - `Ok(PaymentStatus::Paid)` - Payment succeeded (or the booking was already paid)
    /// - `Err(AppError::BadRequest)` - Booking closed, intent does not belong to it, or payment has not succeeded
    pub async fn confirm(
        &self,
        owner: &User,
        booking_id: i32,
        payment_intent_id: &str,
    ) -> Result<PaymentStatus, AppError> {
        let booking = self.load_owned_booking(owner, booking_id).await?;

        ensure_open(&booking)?;
        if booking.payment_intent_id.as_deref() != Some(payment_intent_id) {
            return Err(AppError::BadRequest(
                "Payment intent does not belong to this booking".to_string(),
            ));
        }
        let payment_status: PaymentStatus =
            parse_stored("payment status", &booking.payment_status)?;
        if payment_status == PaymentStatus::Paid {
            return Ok(PaymentStatus::Paid);
        }

        let succeeded = match &self.config.stripe {
            Some(stripe) => self.fetch_intent(stripe, payment_intent_id).await?.status == "succeeded",
            None => payment_intent_id.starts_with(MOCK_INTENT_PREFIX),
        };
        if !succeeded {
            return Err(AppError::BadRequest("Payment has not succeeded".to_string()));
        }

        self.record_payment(booking.id).await?;

        Ok(PaymentStatus::Paid)
    }

    /// Applies a signed gateway webhook event.
    ///
    /// Handles `payment_intent.succeeded` and `payment_intent.payment_failed`; other
    /// events are acknowledged and ignored.
    ///
    /// # Returns
    /// - `Ok(())` - Event verified and processed
    /// - `Err(AppError::ServiceUnavailable)` - No webhook secret configured
    /// - `Err(AppError::BadRequest)` - Missing or invalid signature, or malformed payload
    pub async fn handle_webhook(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> Result<(), AppError> {
        let Some(secret) = self
            .config
            .stripe
            .as_ref()
            .and_then(|s| s.webhook_secret.as_deref())
        else {
            return Err(AppError::ServiceUnavailable(
                "Payment webhooks are not configured".to_string(),
            ));
        };

        let signature = signature
            .ok_or_else(|| AppError::BadRequest("Missing webhook signature".to_string()))?;
        if !verify_webhook_signature(payload, signature, secret, Utc::now().timestamp()) {
            return Err(AppError::BadRequest("Invalid webhook signature".to_string()));
        }

        let event: WebhookEvent = serde_json::from_slice(payload)
            .map_err(|e| AppError::BadRequest(format!("Malformed webhook payload: {}", e)))?;

        let repo = BookingRepository::new(self.db);
        let intent_id = event.data.object.id.as_str();
        match event.event_type.as_str() {
            "payment_intent.succeeded" => match repo.find_by_payment_intent(intent_id).await? {
                Some(booking) => self.record_payment(booking.id).await?,
                None => tracing::warn!(payment_intent_id = intent_id, "Webhook for unknown payment intent"),
            },
            "payment_intent.payment_failed" => {
                if let Some(booking) = repo.find_by_payment_intent(intent_id).await? {
                    repo.mark_payment_failed(booking.id).await?;
                    tracing::info!(booking_id = booking.id, "Payment failed");
                }
            }
            other => tracing::debug!(event_type = other, "Ignoring webhook event"),
        }

        Ok(())
    }

    async fn fetch_intent(
        &self,
        stripe: &StripeConfig,
        payment_intent_id: &str,
    ) -> Result<GatewayIntent, AppError> {
        Ok(self
            .http_client
            .get(format!(
                "{}/payment_intents/{}",
                stripe.api_base.trim_end_matches('/'),
                payment_intent_id
            ))
            .bearer_auth(&stripe.secret_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    /// Marks a booking paid and notifies the owner and admins the first time only.
    async fn record_payment(&self, booking_id: i32) -> Result<(), AppError> {
        let repo = BookingRepository::new(self.db);
        if !repo.mark_paid(booking_id, Utc::now()).await? {
            return Ok(());
        }

        tracing::info!(booking_id, "Booking paid");

        let Some(booking) = repo.find_by_id(booking_id).await? else {
            return Ok(());
        };
        let message = format!(
            "Payment of {:.2} {} received for booking #{}.",
            booking.total_amount,
            self.config.currency.to_uppercase(),
            booking.id
        );

        let notifications = NotificationService::new(self.db, self.realtime);
        notifications
            .notify(
                CreateNotificationParams::new(
                    booking.house_owner_id,
                    NotificationKind::PaymentReceived,
                    "Payment received",
                    message.clone(),
                )
                .for_booking(booking.id),
            )
            .await;
        notifications
            .notify_admins(
                CreateNotificationParams::new(
                    0,
                    NotificationKind::PaymentReceived,
                    "Payment received",
                    message,
                )
                .for_booking(booking.id),
            )
            .await;

        Ok(())
    }

    async fn load_owned_booking(
        &self,
        owner: &User,
        booking_id: i32,
    ) -> Result<entity::booking::Model, AppError> {
        let booking = BookingRepository::new(self.db)
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if booking.house_owner_id != owner.id {
            return Err(AuthError::AccessDenied(
                owner.id,
                format!("User does not own booking {}", booking_id),
            )
            .into());
        }

        Ok(booking)
    }
}

/// Refuses payment activity on cancelled or rejected bookings.
fn ensure_open(booking: &entity::booking::Model) -> Result<(), AppError> {
    let status: BookingStatus = parse_stored("booking status", &booking.status)?;
    if matches!(status, BookingStatus::Cancelled | BookingStatus::Rejected) {
        return Err(AppError::BadRequest(format!(
            "Cannot pay for a {} booking",
            status
        )));
    }
    Ok(())
}

/// Checks a `t=<timestamp>,v1=<hex signature>` header against the payload.
///
/// The signed message is `"{timestamp}.{payload}"` keyed with the webhook secret. The
/// timestamp must be within [`WEBHOOK_TOLERANCE_SECS`] of `now`. Any matching `v1`
/// entry is accepted.
pub fn verify_webhook_signature(payload: &[u8], header: &str, secret: &str, now: i64) -> bool {
    let mut timestamp = None;
    let mut signatures = Vec::new();
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = Some(value),
            Some(("v1", value)) => signatures.push(value),
            _ => {}
        }
    }

    let Some(timestamp) = timestamp else {
        return false;
    };
    let Ok(signed_at) = timestamp.parse::<i64>() else {
        return false;
    };
    if now.abs_diff(signed_at) > WEBHOOK_TOLERANCE_SECS.unsigned_abs() {
        return false;
    }

    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => return false,
    };
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);

    signatures.into_iter().any(|signature| match hex::decode(signature) {
        Ok(bytes) => mac.clone().verify_slice(&bytes).is_ok(),
        Err(_) => false,
    })
}
