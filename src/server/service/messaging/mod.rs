//! Transactional email and SMS delivery.
//!
//! Both senders fall back to logging the message when their provider is not configured,
//! which keeps verification and reset flows usable in development.

pub mod email;
pub mod sms;

pub use email::EmailService;
pub use sms::SmsService;
