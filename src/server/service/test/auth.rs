use test_utils::{builder::TestBuilder, factory::user::UserFactory};

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{RegisterParams, Role},
    service::{
        auth::AuthService,
        password::hash_password,
        test::test_config,
        token::TokenService,
    },
};

fn registration(email: &str) -> RegisterParams {
    RegisterParams {
        name: "Dana Plumber".to_string(),
        email: email.to_string(),
        password: "hunter22".to_string(),
        phone: None,
        role: Role::HouseOwner,
        specialization: None,
    }
}

/// Tests registering and then signing in with the same credentials.
///
/// Expected: unverified account, both tokens resolve to the new user
#[tokio::test]
async fn registers_and_logs_in() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let http_client = reqwest::Client::new();
    let config = test_config();
    let tokens = TokenService::new(&config.jwt_secret, 1);

    let auth = AuthService::new(db, &http_client, &config, &tokens);
    let (token, user) = auth.register(registration("dana@example.com")).await?;

    assert!(!user.is_verified);
    assert_eq!(user.role, Role::HouseOwner);
    assert_eq!(tokens.verify(&token)?.sub, user.id);

    let (token, logged_in) = auth.login("Dana@Example.com", "hunter22".to_string()).await?;
    assert_eq!(logged_in.id, user.id);
    assert_eq!(tokens.verify(&token)?.sub, user.id);

    Ok(())
}

/// Tests registering an email that is already taken.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let http_client = reqwest::Client::new();
    let config = test_config();
    let tokens = TokenService::new(&config.jwt_secret, 1);

    let auth = AuthService::new(db, &http_client, &config, &tokens);
    auth.register(registration("taken@example.com")).await?;
    let result = auth.register(registration("taken@example.com")).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests signing in with the wrong password.
///
/// Expected: Err(InvalidCredentials)
#[tokio::test]
async fn rejects_wrong_password() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let http_client = reqwest::Client::new();
    let config = test_config();
    let tokens = TokenService::new(&config.jwt_secret, 1);

    let auth = AuthService::new(db, &http_client, &config, &tokens);
    auth.register(registration("dana@example.com")).await?;
    let result = auth.login("dana@example.com", "wrong-pass".to_string()).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    Ok(())
}

/// Tests signing in to a deactivated account with the right password.
///
/// Expected: Err(AccountDisabled)
#[tokio::test]
async fn rejects_disabled_account() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let http_client = reqwest::Client::new();
    let config = test_config();
    let tokens = TokenService::new(&config.jwt_secret, 1);

    let hash = hash_password("hunter22".to_string(), config.bcrypt_cost).await?;
    let user = UserFactory::new(db)
        .email("disabled@example.com")
        .password_hash(hash)
        .active(false)
        .build()
        .await?;

    let result = AuthService::new(db, &http_client, &config, &tokens)
        .login("disabled@example.com", "hunter22".to_string())
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccountDisabled(id))) if id == user.id
    ));

    Ok(())
}

/// Tests verifying an email with the code sent at registration.
///
/// Expected: wrong code rejected, correct code marks the account verified
#[tokio::test]
async fn verifies_email_with_code() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let http_client = reqwest::Client::new();
    let config = test_config();
    let tokens = TokenService::new(&config.jwt_secret, 1);

    let auth = AuthService::new(db, &http_client, &config, &tokens);
    let (_, user) = auth.register(registration("dana@example.com")).await?;
    let code = UserRepository::new(db)
        .find_by_id(user.id)
        .await?
        .and_then(|u| u.verification_code)
        .unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    assert!(matches!(
        auth.verify_email(user.id, wrong).await,
        Err(AppError::AuthErr(AuthError::InvalidCode))
    ));

    let verified = auth.verify_email(user.id, &code).await?;
    assert!(verified.is_verified);

    Ok(())
}
