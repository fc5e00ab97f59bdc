use super::*;

/// Tests deleting an address owned by another user.
///
/// Expected: false for the stranger, true for the owner
#[tokio::test]
async fn deletes_only_own_address() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_house_owner(db).await?;
    let stranger = factory::create_house_owner(db).await?;
    let repo = AddressRepository::new(db);
    let home = repo.create(owner.id, address("Home", false)).await?;

    assert!(!repo.delete(stranger.id, home.id).await?);
    assert!(repo.delete(owner.id, home.id).await?);
    assert!(repo.get_by_user(owner.id).await?.is_empty());

    Ok(())
}
