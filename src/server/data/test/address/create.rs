use super::*;

/// Tests that the first address becomes the default.
///
/// Expected: is_default true even though not requested
#[tokio::test]
async fn first_address_is_default() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_house_owner(db).await?;
    let repo = AddressRepository::new(db);
    let home = repo.create(user.id, address("Home", false)).await?;

    assert!(home.is_default);

    Ok(())
}

/// Tests adding a new default address.
///
/// Expected: exactly one default, the newest
#[tokio::test]
async fn new_default_clears_previous() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_house_owner(db).await?;
    let repo = AddressRepository::new(db);
    repo.create(user.id, address("Home", false)).await?;
    repo.create(user.id, address("Cabin", false)).await?;
    let office = repo.create(user.id, address("Office", true)).await?;

    let addresses = repo.get_by_user(user.id).await?;
    let defaults: Vec<_> = addresses.iter().filter(|a| a.is_default).collect();

    assert_eq!(addresses.len(), 3);
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0].id, office.id);
    assert_eq!(addresses[0].id, office.id);

    Ok(())
}
