use serde::Deserialize;

use crate::model::payment::PaymentIntentDto;

/// Prefix of intent ids issued when no payment gateway is configured.
pub const MOCK_INTENT_PREFIX: &str = "pi_mock_";

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    /// Amount in the smallest currency unit.
    pub amount: i64,
    pub currency: String,
}

impl PaymentIntent {
    pub fn into_dto(self) -> PaymentIntentDto {
        PaymentIntentDto {
            payment_intent_id: self.id,
            client_secret: self.client_secret,
            amount: self.amount,
            currency: self.currency,
        }
    }
}

/// Converts a decimal amount into the smallest currency unit.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Payment intent as returned by the gateway.
#[derive(Debug, Deserialize)]
pub struct GatewayIntent {
    pub id: String,
    pub client_secret: Option<String>,
    pub status: String,
}

/// Webhook event envelope; only the fields we act on.
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookEventData,
}

#[derive(Debug, Deserialize)]
pub struct WebhookEventData {
    pub object: WebhookObject,
}

#[derive(Debug, Deserialize)]
pub struct WebhookObject {
    pub id: String,
}
