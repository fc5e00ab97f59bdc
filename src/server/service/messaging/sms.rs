use crate::server::{config::SmsConfig, error::AppError};

pub struct SmsService<'a> {
    http_client: &'a reqwest::Client,
    config: Option<&'a SmsConfig>,
}

impl<'a> SmsService<'a> {
    pub fn new(http_client: &'a reqwest::Client, config: Option<&'a SmsConfig>) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Sends a text message through a Twilio-compatible messages endpoint.
    ///
    /// # Returns
    /// - `Ok(())` - Accepted by the provider, or logged when no provider is configured
    /// - `Err(AppError::ReqwestErr)` - Request failed or the provider returned an error status
    pub async fn send(&self, to: &str, body: &str) -> Result<(), AppError> {
        let Some(config) = self.config else {
            tracing::info!(to, "SMS provider not configured, message: {}", body);
            return Ok(());
        };

        let url = format!(
            "{}/Accounts/{}/Messages.json",
            config.api_url.trim_end_matches('/'),
            config.account_sid
        );

        self.http_client
            .post(url)
            .basic_auth(&config.account_sid, Some(&config.auth_token))
            .form(&[("To", to), ("From", config.from.as_str()), ("Body", body)])
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!(to, "SMS sent");

        Ok(())
    }

    pub async fn send_best_effort(&self, to: &str, body: &str) {
        if let Err(e) = self.send(to, body).await {
            tracing::warn!(to, "Failed to send SMS: {}", e);
        }
    }
}
