//! Email and password authentication.
//!
//! Handles registration, login and the code-based flows (email verification and
//! password reset). Codes are delivered by email, and reset codes also by SMS when the
//! account has a phone number. Delivery is best effort and never fails the request.

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    data::{is_unique_violation, user::UserRepository},
    error::{auth::AuthError, AppError},
    model::user::{normalize_email, CreateUserParams, RegisterParams, User},
    service::{
        messaging::{EmailService, SmsService},
        password::{hash_password, validate_password, verify_password},
        token::TokenService,
        user::UserService,
    },
    util::code::{code_matches, generate_code, RESET_CODE_TTL_MINUTES, VERIFICATION_CODE_TTL_HOURS},
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    http_client: &'a reqwest::Client,
    config: &'a Config,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        config: &'a Config,
        tokens: &'a TokenService,
    ) -> Self {
        Self {
            db,
            http_client,
            config,
            tokens,
        }
    }

    /// Creates an unverified account and emails a verification code.
    ///
    /// # Returns
    /// - `Ok((token, User))` - Account created and signed in
    /// - `Err(AppError::BadRequest)` - Password too short
    /// - `Err(AppError::Conflict)` - Email already registered
    pub async fn register(&self, params: RegisterParams) -> Result<(String, User), AppError> {
        validate_password(&params.password)?;

        let user_repo = UserRepository::new(self.db);
        if user_repo.find_by_email(&params.email).await?.is_some() {
            return Err(email_taken());
        }

        let password_hash = hash_password(params.password, self.config.bcrypt_cost).await?;

        let model = user_repo
            .create(CreateUserParams {
                name: params.name,
                email: params.email,
                phone: params.phone,
                password_hash: Some(password_hash),
                google_id: None,
                role: params.role,
                specialization: params.specialization,
                is_verified: false,
            })
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    email_taken()
                } else {
                    e.into()
                }
            })?;

        tracing::info!(user_id = model.id, role = %params.role, "User registered");

        let user = User::from_entity(model)?;
        self.send_verification_code(&user).await?;

        let token = self.tokens.issue(user.id, user.role)?;
        Ok((token, user))
    }

    /// Signs in with email and password.
    ///
    /// Accounts created through Google have no password and cannot sign in this way.
    ///
    /// # Returns
    /// - `Ok((token, User))` - Credentials valid
    /// - `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    /// - `Err(AuthError::AccountDisabled)` - Account deactivated by an admin
    pub async fn login(&self, email: &str, password: String) -> Result<(String, User), AppError> {
        let email = normalize_email(email);
        let Some(model) = UserRepository::new(self.db).find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };
        let Some(hash) = model.password_hash.clone() else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, hash).await? {
            return Err(AuthError::InvalidCredentials.into());
        }
        if !model.is_active {
            return Err(AuthError::AccountDisabled(model.id).into());
        }

        let user = UserService::new(self.db).require_by_id(model.id).await?;
        let token = self.tokens.issue(user.id, user.role)?;

        Ok((token, user))
    }

    /// Verifies the caller's email with the code sent at registration.
    ///
    /// Verifying an already verified account is a no-op.
    pub async fn verify_email(&self, user_id: i32, code: &str) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);
        let model = user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotInDatabase(user_id))?;

        if !model.is_verified {
            if !code_matches(
                model.verification_code.as_deref(),
                model.verification_expires_at,
                code,
                Utc::now(),
            ) {
                return Err(AuthError::InvalidCode.into());
            }
            user_repo.mark_verified(user_id).await?;
            tracing::info!(user_id, "Email verified");
        }

        UserService::new(self.db).require_by_id(user_id).await
    }

    /// Issues a fresh verification code, replacing the previous one.
    pub async fn resend_verification(&self, user: &User) -> Result<(), AppError> {
        if user.is_verified {
            return Err(AppError::BadRequest("Email is already verified".to_string()));
        }
        self.send_verification_code(user).await
    }

    /// Sends a password reset code if the email belongs to an active account.
    ///
    /// Always succeeds so callers cannot probe which emails are registered.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AppError> {
        let email = normalize_email(email);
        let user_repo = UserRepository::new(self.db);

        let Some(model) = user_repo.find_by_email(&email).await? else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(());
        };
        if !model.is_active {
            return Ok(());
        }

        let code = generate_code();
        let expires_at = Utc::now() + Duration::minutes(RESET_CODE_TTL_MINUTES);
        user_repo
            .set_reset_code(model.id, code.clone(), expires_at)
            .await?;

        let message = format!(
            "Your ServiceHub password reset code is {}. It expires in {} minutes.",
            code, RESET_CODE_TTL_MINUTES
        );
        EmailService::new(self.http_client, self.config.email.as_ref())
            .send_best_effort(&model.email, "Reset your password", &message)
            .await;
        if let Some(phone) = &model.phone {
            SmsService::new(self.http_client, self.config.sms.as_ref())
                .send_best_effort(phone, &message)
                .await;
        }

        Ok(())
    }

    /// Sets a new password using a reset code. The code is cleared on success.
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: String,
    ) -> Result<(), AppError> {
        validate_password(&new_password)?;

        let email = normalize_email(email);
        let user_repo = UserRepository::new(self.db);
        let Some(model) = user_repo.find_by_email(&email).await? else {
            return Err(AuthError::InvalidCode.into());
        };

        if !code_matches(
            model.reset_code.as_deref(),
            model.reset_expires_at,
            code,
            Utc::now(),
        ) {
            return Err(AuthError::InvalidCode.into());
        }

        let hash = hash_password(new_password, self.config.bcrypt_cost).await?;
        user_repo.set_password_hash(model.id, hash).await?;

        tracing::info!(user_id = model.id, "Password reset");

        Ok(())
    }

    /// Changes the caller's password after checking the current one.
    ///
    /// Accounts without a password (Google sign-in) may set one without a current password.
    pub async fn change_password(
        &self,
        user_id: i32,
        current_password: String,
        new_password: String,
    ) -> Result<(), AppError> {
        validate_password(&new_password)?;

        let user_repo = UserRepository::new(self.db);
        let model = user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotInDatabase(user_id))?;

        if let Some(hash) = model.password_hash {
            if !verify_password(current_password, hash).await? {
                return Err(AppError::BadRequest(
                    "Current password is incorrect".to_string(),
                ));
            }
        }

        let hash = hash_password(new_password, self.config.bcrypt_cost).await?;
        user_repo.set_password_hash(user_id, hash).await?;

        Ok(())
    }

    async fn send_verification_code(&self, user: &User) -> Result<(), AppError> {
        let code = generate_code();
        let expires_at = Utc::now() + Duration::hours(VERIFICATION_CODE_TTL_HOURS);
        UserRepository::new(self.db)
            .set_verification_code(user.id, code.clone(), expires_at)
            .await?;

        let message = format!(
            "Welcome to ServiceHub, {}! Your verification code is {}.",
            user.name, code
        );
        EmailService::new(self.http_client, self.config.email.as_ref())
            .send_best_effort(&user.email, "Verify your email", &message)
            .await;

        Ok(())
    }
}

fn email_taken() -> AppError {
    AppError::Conflict("An account with this email already exists".to_string())
}
