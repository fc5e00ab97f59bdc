//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Database connection pool for data persistence
//! - HTTP client for external API requests (OAuth, email, SMS, payments)
//! - OAuth2 client for Google authentication, when configured
//! - Token service for issuing and verifying bearer tokens
//! - Real-time hub broadcasting notifications to connected sockets
//! - Loaded configuration

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::{
    config::Config,
    service::{realtime::RealtimeHub, token::TokenService},
};

/// Type alias for the OAuth2 client configured for Google authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Application state containing shared resources and dependencies.
///
/// All fields use cheap-to-clone types:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `reqwest::Client` uses an `Arc` internally
/// - `OAuth2Client` is designed to be cloned
/// - `TokenService` and `Config` are behind `Arc`
/// - `RealtimeHub` wraps a broadcast sender
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for making external API requests.
    ///
    /// Configured with security settings (no redirects) to prevent SSRF
    /// vulnerabilities.
    pub http_client: reqwest::Client,

    /// OAuth2 client for the Google login flow; `None` when Google is not configured.
    pub oauth_client: Option<OAuth2Client>,

    /// Issues and verifies bearer tokens.
    pub tokens: Arc<TokenService>,

    /// Pushes notifications and announcements to connected WebSocket clients.
    pub realtime: RealtimeHub,

    /// Loaded application configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `http_client` - HTTP client for external API requests
    /// - `oauth_client` - OAuth2 client for Google authentication, if configured
    /// - `realtime` - Real-time broadcast hub
    /// - `config` - Application configuration
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        oauth_client: Option<OAuth2Client>,
        realtime: RealtimeHub,
        config: Config,
    ) -> Self {
        let tokens = TokenService::new(&config.jwt_secret, config.jwt_expiry_hours);
        Self {
            db,
            http_client,
            oauth_client,
            tokens: Arc::new(tokens),
            realtime,
            config: Arc::new(config),
        }
    }
}
