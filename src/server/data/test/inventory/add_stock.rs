use super::*;

/// Tests adding stock to an existing item.
///
/// Expected: Ok(true) and quantity incremented
#[tokio::test]
async fn increments_quantity() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let item = factory::create_inventory_item(db).await?;

    let repo = InventoryRepository::new(db);
    assert!(repo.add_stock(item.id, 7).await?);
    assert_eq!(quantity_of(db, item.id).await?, 17);

    Ok(())
}

/// Tests adding stock to a missing item.
///
/// Expected: Ok(false)
#[tokio::test]
async fn missing_item_returns_false() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = InventoryRepository::new(db);
    assert!(!repo.add_stock(999, 1).await?);

    Ok(())
}

/// Tests adding stock that would push the quantity past `i32::MAX`.
///
/// Expected: Ok(false) and quantity unchanged
#[tokio::test]
async fn refuses_overflowing_quantity() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let item = factory::create_inventory_item(db).await?;

    let repo = InventoryRepository::new(db);
    assert!(!repo.add_stock(item.id, i32::MAX).await?);
    assert_eq!(quantity_of(db, item.id).await?, 10);

    assert!(repo.add_stock(item.id, i32::MAX - 10).await?);
    assert_eq!(quantity_of(db, item.id).await?, i32::MAX);

    Ok(())
}
