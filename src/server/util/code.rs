use chrono::{DateTime, Utc};
use rand::Rng;

/// Lifetime of an email verification code, in hours.
pub const VERIFICATION_CODE_TTL_HOURS: i64 = 24;

/// Lifetime of a password reset code, in minutes.
pub const RESET_CODE_TTL_MINUTES: i64 = 15;

/// Generates a random six-digit numeric code, zero padded.
pub fn generate_code() -> String {
    let value: u32 = rand::rng().random_range(0..1_000_000);
    format!("{:06}", value)
}

/// Whether `submitted` matches the stored code and the code has not expired.
pub fn code_matches(
    stored: Option<&str>,
    expires_at: Option<DateTime<Utc>>,
    submitted: &str,
    now: DateTime<Utc>,
) -> bool {
    match (stored, expires_at) {
        (Some(stored), Some(expires_at)) => stored == submitted.trim() && now < expires_at,
        _ => false,
    }
}
