use crate::server::{config::Config, model::user::User};

mod auth;
mod booking;

/// Converts a factory-created user row into the domain model.
fn domain_user(model: entity::user::Model) -> User {
    User::from_entity(model).unwrap()
}

/// Configuration with every optional integration disabled.
fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        bind_address: "127.0.0.1:0".to_string(),
        app_url: "http://localhost:3000".to_string(),
        jwt_secret: "test-secret".to_string(),
        jwt_expiry_hours: 1,
        bcrypt_cost: 4,
        currency: "usd".to_string(),
        google: None,
        email: None,
        sms: None,
        stripe: None,
    }
}
