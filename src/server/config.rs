//! Environment-based application configuration.
//!
//! Required variables fail startup when missing. Each optional integration (Google login,
//! email, SMS, payments) is enabled only when every variable of its group is present;
//! otherwise the integration falls back to logging.

use crate::server::error::{config::ConfigError, AppError};

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";
const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_JWT_EXPIRY_HOURS: i64 = 168;
const DEFAULT_CURRENCY: &str = "usd";

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub api_url: String,
    pub account_sid: String,
    pub auth_token: String,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    /// Signing secret for webhook events; webhooks are rejected without it.
    pub webhook_secret: Option<String>,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    /// Public URL of the front end, used for OAuth redirects and links in emails.
    pub app_url: String,

    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub bcrypt_cost: u32,
    pub currency: String,

    pub google: Option<GoogleConfig>,
    pub email: Option<EmailConfig>,
    pub sms: Option<SmsConfig>,
    pub stripe: Option<StripeConfig>,
}

impl Config {
    /// Loads configuration from process environment variables.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and parseable
    /// - `Err(AppError::ConfigErr(_))` - A required variable is missing or a value is malformed
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require =
            |name: &str| get(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()));

        let jwt_expiry_hours = match get("JWT_EXPIRY_HOURS") {
            Some(value) => parse_var("JWT_EXPIRY_HOURS", value)?,
            None => DEFAULT_JWT_EXPIRY_HOURS,
        };
        let bcrypt_cost = match get("BCRYPT_COST") {
            Some(value) => parse_var("BCRYPT_COST", value)?,
            None => bcrypt::DEFAULT_COST,
        };

        let google = match (
            get("GOOGLE_CLIENT_ID"),
            get("GOOGLE_CLIENT_SECRET"),
            get("GOOGLE_REDIRECT_URL"),
        ) {
            (Some(client_id), Some(client_secret), Some(redirect_url)) => Some(GoogleConfig {
                client_id,
                client_secret,
                redirect_url,
                auth_url: GOOGLE_AUTH_URL.to_string(),
                token_url: GOOGLE_TOKEN_URL.to_string(),
                userinfo_url: GOOGLE_USERINFO_URL.to_string(),
            }),
            _ => None,
        };

        let email = match (
            get("EMAIL_API_URL"),
            get("EMAIL_API_KEY"),
            get("EMAIL_FROM"),
        ) {
            (Some(api_url), Some(api_key), Some(from)) => Some(EmailConfig {
                api_url,
                api_key,
                from,
            }),
            _ => None,
        };

        let sms = match (
            get("SMS_API_URL"),
            get("SMS_ACCOUNT_SID"),
            get("SMS_AUTH_TOKEN"),
            get("SMS_FROM"),
        ) {
            (Some(api_url), Some(account_sid), Some(auth_token), Some(from)) => Some(SmsConfig {
                api_url,
                account_sid,
                auth_token,
                from,
            }),
            _ => None,
        };

        let stripe = get("STRIPE_SECRET_KEY").map(|secret_key| StripeConfig {
            secret_key,
            webhook_secret: get("STRIPE_WEBHOOK_SECRET"),
            api_base: STRIPE_API_BASE.to_string(),
        });

        Ok(Self {
            database_url: require("DATABASE_URL")?,
            bind_address: get("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            app_url: require("APP_URL")?.trim_end_matches('/').to_string(),
            jwt_secret: require("JWT_SECRET")?,
            jwt_expiry_hours,
            bcrypt_cost,
            currency: get("CURRENCY")
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
                .to_lowercase(),
            google,
            email,
            sms,
            stripe,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: String) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value,
    })
}

#[cfg(test)]
mod test;
