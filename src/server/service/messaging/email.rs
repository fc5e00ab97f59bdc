use serde::Serialize;

use crate::server::{config::EmailConfig, error::AppError};

#[derive(Serialize)]
struct EmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

pub struct EmailService<'a> {
    http_client: &'a reqwest::Client,
    config: Option<&'a EmailConfig>,
}

impl<'a> EmailService<'a> {
    pub fn new(http_client: &'a reqwest::Client, config: Option<&'a EmailConfig>) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Sends a plain text email through the configured HTTP API.
    ///
    /// # Returns
    /// - `Ok(())` - Accepted by the provider, or logged when no provider is configured
    /// - `Err(AppError::ReqwestErr)` - Request failed or the provider returned an error status
    pub async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        let Some(config) = self.config else {
            tracing::info!(to, subject, "Email provider not configured, message: {}", body);
            return Ok(());
        };

        self.http_client
            .post(&config.api_url)
            .bearer_auth(&config.api_key)
            .json(&EmailRequest {
                from: &config.from,
                to,
                subject,
                text: body,
            })
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!(to, subject, "Email sent");

        Ok(())
    }

    /// Sends and logs failure instead of returning it.
    pub async fn send_best_effort(&self, to: &str, subject: &str, body: &str) {
        if let Err(e) = self.send(to, subject, body).await {
            tracing::warn!(to, subject, "Failed to send email: {}", e);
        }
    }
}
