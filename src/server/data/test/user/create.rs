use sea_orm::SqlErr;

use super::*;

fn owner_params(email: &str) -> CreateUserParams {
    CreateUserParams {
        name: "Jamie".to_string(),
        email: email.to_string(),
        phone: Some("+15550100".to_string()),
        password_hash: Some("hash".to_string()),
        google_id: None,
        role: Role::HouseOwner,
        specialization: None,
        is_verified: false,
    }
}

/// Tests creating a user and finding them by email.
///
/// Expected: active, unverified user found by email
#[tokio::test]
async fn creates_and_finds_by_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let created = repo.create(owner_params("jamie@example.com")).await?;

    let found = repo.find_by_email("jamie@example.com").await?.unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.role, "house_owner");
    assert!(found.is_active);
    assert!(!found.is_verified);

    Ok(())
}

/// Tests registering the same email twice.
///
/// Expected: unique constraint violation
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(owner_params("jamie@example.com")).await?;
    let err = repo
        .create(owner_params("jamie@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));

    Ok(())
}

/// Tests setting a new password after a reset code was issued.
///
/// Expected: hash replaced and reset code cleared
#[tokio::test]
async fn set_password_clears_reset_code() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_house_owner(db).await?;
    let repo = UserRepository::new(db);
    repo.set_reset_code(user.id, "123456".to_string(), chrono::Utc::now())
        .await?;
    repo.set_password_hash(user.id, "new-hash".to_string())
        .await?;

    let updated = repo.find_by_id(user.id).await?.unwrap();
    assert_eq!(updated.password_hash.as_deref(), Some("new-hash"));
    assert!(updated.reset_code.is_none());
    assert!(updated.reset_expires_at.is_none());

    Ok(())
}
