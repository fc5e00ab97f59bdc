use oauth2::{
    basic::BasicTokenType, AuthorizationCode, EmptyExtraTokenFields, StandardTokenResponse,
    TokenResponse,
};
use serde::Deserialize;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{normalize_email, CreateUserParams, Role, User},
    service::{oauth::GoogleAuthService, user::UserService},
};

/// Subset of the OpenID Connect userinfo response.
#[derive(Debug, Deserialize)]
pub struct GoogleProfile {
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl<'a> GoogleAuthService<'a> {
    /// Exchanges the authorization code and signs the Google account in.
    ///
    /// The account is matched by Google id first, then by email (linking the Google id
    /// to an existing password account). Unknown accounts are created as verified house
    /// owners.
    ///
    /// # Returns
    /// - `Ok((token, User))` - Signed in
    /// - `Err(AuthError::OAuthExchangeFailed)` - Code exchange or profile fetch failed
    /// - `Err(AuthError::AccountDisabled)` - Matched account is deactivated
    pub async fn callback(&self, authorization_code: String) -> Result<(String, User), AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(authorization_code))
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::OAuthExchangeFailed(e.to_string()))?;

        let profile = self.fetch_profile(&token).await?;
        let model = self.upsert_user(profile).await?;

        if !model.is_active {
            return Err(AuthError::AccountDisabled(model.id).into());
        }

        let user = UserService::new(self.db).require_by_id(model.id).await?;
        let token = self.tokens.issue(user.id, user.role)?;

        Ok((token, user))
    }

    async fn fetch_profile(
        &self,
        token: &StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    ) -> Result<GoogleProfile, AppError> {
        let response = self
            .http_client
            .get(&self.google.userinfo_url)
            .bearer_auth(token.access_token().secret())
            .send()
            .await
            .map_err(|e| AuthError::OAuthExchangeFailed(e.to_string()))?;

        let profile = response
            .error_for_status()
            .map_err(|e| AuthError::OAuthExchangeFailed(e.to_string()))?
            .json::<GoogleProfile>()
            .await
            .map_err(|e| AuthError::OAuthExchangeFailed(e.to_string()))?;

        Ok(profile)
    }

    async fn upsert_user(&self, profile: GoogleProfile) -> Result<entity::user::Model, AppError> {
        let user_repo = UserRepository::new(self.db);

        if let Some(user) = user_repo.find_by_google_id(&profile.sub).await? {
            return Ok(user);
        }

        let email = normalize_email(&profile.email);
        if let Some(user) = user_repo.find_by_email(&email).await? {
            tracing::info!(user_id = user.id, "Linking Google account to existing user");
            return Ok(user_repo.link_google_id(user.id, profile.sub).await?);
        }

        let name = profile
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| email.clone());

        let user = user_repo
            .create(CreateUserParams {
                name,
                email,
                phone: None,
                password_hash: None,
                google_id: Some(profile.sub),
                role: Role::HouseOwner,
                specialization: None,
                is_verified: true,
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered through Google");

        Ok(user)
    }
}
