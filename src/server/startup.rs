use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use time::Duration;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    state::OAuth2Client,
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the application database.
///
/// Sessions only carry the OAuth CSRF state between the login redirect and the
/// provider callback, so they expire after a short period of inactivity.
///
/// # Arguments
/// - `db` - Connected database whose SQLite pool also stores sessions
///
/// # Returns
/// - `Ok(SessionManagerLayer)` - Layer ready to attach to the router
/// - `Err(AppError::SqlxErr(_))` - Failed to create the session table
pub async fn connect_to_session(
    db: &sea_orm::DatabaseConnection,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store.migrate().await?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(30)));

    Ok(session_layer)
}

/// Builds the outbound HTTP client.
///
/// Redirects are disabled so provider responses cannot bounce requests to
/// arbitrary hosts.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(std::time::Duration::from_secs(15))
        .build()?;

    Ok(client)
}

/// Builds the Google OAuth client, or `None` when Google login is not configured.
///
/// # Returns
/// - `Ok(Some(client))` - Google configured with valid URLs
/// - `Ok(None)` - Google variables not set
/// - `Err(AppError::ConfigErr(ConfigError::InvalidUrl))` - A configured URL is malformed
pub fn setup_oauth_client(config: &Config) -> Result<Option<OAuth2Client>, AppError> {
    let Some(google) = &config.google else {
        tracing::info!("Google login not configured; /api/auth/google will return 503");
        return Ok(None);
    };

    let invalid = |name: &str| {
        let name = name.to_string();
        move |source| ConfigError::InvalidUrl { name, source }
    };

    let client = BasicClient::new(ClientId::new(google.client_id.clone()))
        .set_client_secret(ClientSecret::new(google.client_secret.clone()))
        .set_auth_uri(AuthUrl::new(google.auth_url.clone()).map_err(invalid("GOOGLE_AUTH_URL"))?)
        .set_token_uri(
            TokenUrl::new(google.token_url.clone()).map_err(invalid("GOOGLE_TOKEN_URL"))?,
        )
        .set_redirect_uri(
            RedirectUrl::new(google.redirect_url.clone())
                .map_err(invalid("GOOGLE_REDIRECT_URL"))?,
        );

    Ok(Some(client))
}
