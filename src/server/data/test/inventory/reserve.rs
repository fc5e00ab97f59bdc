use super::*;

use test_utils::factory::inventory_item::InventoryItemFactory;

/// Tests reserving less than the available stock.
///
/// Expected: Ok(true) and quantity decremented
#[tokio::test]
async fn decrements_available_stock() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let item = InventoryItemFactory::new(db).quantity(5).build().await?;

    let repo = InventoryRepository::new(db);
    let reserved = repo.reserve(item.id, 3).await?;

    assert!(reserved);
    assert_eq!(quantity_of(db, item.id).await?, 2);

    Ok(())
}

/// Tests reserving exactly the remaining stock.
///
/// Expected: Ok(true) and quantity reaches zero
#[tokio::test]
async fn allows_reserving_to_zero() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let item = InventoryItemFactory::new(db).quantity(4).build().await?;

    let repo = InventoryRepository::new(db);
    assert!(repo.reserve(item.id, 4).await?);
    assert_eq!(quantity_of(db, item.id).await?, 0);

    Ok(())
}

/// Tests reserving more than the available stock.
///
/// Expected: Ok(false) and quantity unchanged, never negative
#[tokio::test]
async fn refuses_insufficient_stock() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let item = InventoryItemFactory::new(db).quantity(2).build().await?;

    let repo = InventoryRepository::new(db);
    let reserved = repo.reserve(item.id, 3).await?;

    assert!(!reserved);
    assert_eq!(quantity_of(db, item.id).await?, 2);

    Ok(())
}

/// Tests reserving from a deactivated item.
///
/// Expected: Ok(false) and quantity unchanged
#[tokio::test]
async fn refuses_inactive_item() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let item = InventoryItemFactory::new(db)
        .quantity(10)
        .active(false)
        .build()
        .await?;

    let repo = InventoryRepository::new(db);
    assert!(!repo.reserve(item.id, 1).await?);
    assert_eq!(quantity_of(db, item.id).await?, 10);

    Ok(())
}

/// Tests repeated reservations draining stock.
///
/// Expected: the third reservation of 4 from 10 fails and leaves 2
#[tokio::test]
async fn sequential_reservations_stop_at_zero() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let item = factory::create_inventory_item(db).await?;

    let repo = InventoryRepository::new(db);
    assert!(repo.reserve(item.id, 4).await?);
    assert!(repo.reserve(item.id, 4).await?);
    assert!(!repo.reserve(item.id, 4).await?);
    assert_eq!(quantity_of(db, item.id).await?, 2);

    Ok(())
}
