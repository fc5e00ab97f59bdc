use super::*;

/// Tests an admin passing the admin permission check.
///
/// Expected: Ok(User) with the admin role
#[tokio::test]
async fn grants_access_to_admin() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = TokenService::new("test-secret", 1);

    let admin = factory::create_admin(db).await?;
    let headers = bearer(&tokens.issue(admin.id, Role::Admin)?);

    let user = AuthGuard::new(db, &tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    assert_eq!(user.id, admin.id);
    assert_eq!(user.role, Role::Admin);

    Ok(())
}

/// Tests a house owner failing the admin permission check.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn denies_admin_action_to_house_owner() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = TokenService::new("test-secret", 1);

    let owner = factory::create_house_owner(db).await?;
    let headers = bearer(&tokens.issue(owner.id, Role::HouseOwner)?);

    let result = AuthGuard::new(db, &tokens, &headers)
        .require(&[Permission::Admin])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(id, _))) if id == owner.id
    ));

    Ok(())
}

/// Tests that the role is read from the database rather than the token.
///
/// Expected: a token claiming admin for a technician is denied admin access
#[tokio::test]
async fn uses_stored_role_over_token_claim() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = TokenService::new("test-secret", 1);

    let technician = factory::create_technician(db).await?;
    let headers = bearer(&tokens.issue(technician.id, Role::Admin)?);

    let result = AuthGuard::new(db, &tokens, &headers)
        .require(&[Permission::Admin])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests a request without an Authorization header.
///
/// Expected: Err(AuthError::MissingToken), and `optional` yields None
#[tokio::test]
async fn missing_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = TokenService::new("test-secret", 1);
    let headers = HeaderMap::new();

    let guard = AuthGuard::new(db, &tokens, &headers);

    assert!(matches!(
        guard.require(&[]).await,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));
    assert!(guard.optional().await?.is_none());

    Ok(())
}

/// Tests a token for a user who was deactivated after sign-in.
///
/// Expected: Err(AuthError::AccountDisabled)
#[tokio::test]
async fn denies_deactivated_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = TokenService::new("test-secret", 1);

    let user = factory::user::UserFactory::new(db)
        .role("technician")
        .active(false)
        .build()
        .await?;
    let headers = bearer(&tokens.issue(user.id, Role::Technician)?);

    let result = AuthGuard::new(db, &tokens, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccountDisabled(_)))
    ));

    Ok(())
}

/// Tests a token whose user no longer exists.
///
/// Expected: Err(AuthError::UserNotInDatabase)
#[tokio::test]
async fn denies_unknown_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = TokenService::new("test-secret", 1);

    let token = tokens.issue(404, Role::HouseOwner)?;

    let result = AuthGuard::with_token(db, &tokens, Some(token.as_str()))
        .require(&[])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(404)))
    ));

    Ok(())
}

/// Tests the house owner permission.
///
/// Expected: owners pass, technicians are denied
#[tokio::test]
async fn house_owner_permission() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = TokenService::new("test-secret", 1);

    let owner = factory::create_house_owner(db).await?;
    let technician = factory::create_technician(db).await?;
    let owner_token = tokens.issue(owner.id, Role::HouseOwner)?;
    let technician_token = tokens.issue(technician.id, Role::Technician)?;

    assert!(AuthGuard::with_token(db, &tokens, Some(owner_token.as_str()))
        .require(&[Permission::HouseOwner])
        .await
        .is_ok());
    assert!(AuthGuard::with_token(db, &tokens, Some(technician_token.as_str()))
        .require(&[Permission::HouseOwner])
        .await
        .is_err());

    Ok(())
}
