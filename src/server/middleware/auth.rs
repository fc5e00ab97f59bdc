use axum::http::{header::AUTHORIZATION, HeaderMap};
use sea_orm::DatabaseConnection;

use crate::server::{
    error::{auth::AuthError, AppError},
    model::user::{Role, User},
    service::{token::TokenService, user::UserService},
};

pub enum Permission {
    Admin,
    HouseOwner,
}

/// Resolves the caller from a bearer token and checks their permissions.
///
/// The user is reloaded on every request so deactivation and role changes take effect
/// for tokens issued before them.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenService,
    token: Option<&'a str>,
}

impl<'a> AuthGuard<'a> {
    /// Reads the token from the `Authorization: Bearer` header.
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenService, headers: &'a HeaderMap) -> Self {
        Self {
            db,
            tokens,
            token: bearer_token(headers),
        }
    }

    /// Uses a token passed some other way, such as a WebSocket query parameter.
    pub fn with_token(
        db: &'a DatabaseConnection,
        tokens: &'a TokenService,
        token: Option<&'a str>,
    ) -> Self {
        Self { db, tokens, token }
    }

    /// Authenticates the caller and checks every permission.
    ///
    /// # Returns
    /// - `Ok(User)` - Caller is authenticated, active and holds all permissions
    /// - `Err(AuthError::MissingToken)` - No token supplied
    /// - `Err(AuthError::InvalidToken)` - Token forged or expired
    /// - `Err(AuthError::UserNotInDatabase)` - Token refers to a deleted user
    /// - `Err(AuthError::AccountDisabled)` - Account deactivated
    /// - `Err(AuthError::AccessDenied)` - A permission check failed
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let Some(token) = self.token else {
            return Err(AuthError::MissingToken.into());
        };
        let claims = self.tokens.verify(token)?;

        let Some(user) = UserService::new(self.db).get_by_id(claims.sub).await? else {
            return Err(AuthError::UserNotInDatabase(claims.sub).into());
        };

        if !user.is_active {
            return Err(AuthError::AccountDisabled(user.id).into());
        }

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if user.role != Role::Admin {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            "User attempted an admin-only action without the admin role".to_string(),
                        )
                        .into());
                    }
                }
                Permission::HouseOwner => {
                    if user.role != Role::HouseOwner {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            "User attempted a house owner action without the house owner role"
                                .to_string(),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(user)
    }

    /// Authenticates the caller if a token was supplied.
    ///
    /// Used by public endpoints that show more to signed-in admins.
    pub async fn optional(&self) -> Result<Option<User>, AppError> {
        if self.token.is_none() {
            return Ok(None);
        }
        self.require(&[]).await.map(Some)
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
