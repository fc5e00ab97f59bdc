//! OAuth2 login with Google.

use sea_orm::DatabaseConnection;

use crate::server::{config::GoogleConfig, service::token::TokenService, state::OAuth2Client};

pub mod callback;
pub mod login;

pub struct GoogleAuthService<'a> {
    pub db: &'a DatabaseConnection,
    pub http_client: &'a reqwest::Client,
    pub oauth_client: &'a OAuth2Client,
    pub google: &'a GoogleConfig,
    pub tokens: &'a TokenService,
}

impl<'a> GoogleAuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
        google: &'a GoogleConfig,
        tokens: &'a TokenService,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            google,
            tokens,
        }
    }
}
