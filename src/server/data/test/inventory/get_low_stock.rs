use super::*;

use test_utils::factory::inventory_item::InventoryItemFactory;

/// Tests low stock filtering against each item's reorder level.
///
/// Expected: only active items with quantity <= reorder level, lowest first
#[tokio::test]
async fn returns_items_at_or_below_reorder_level() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let at_level = InventoryItemFactory::new(db)
        .quantity(5)
        .reorder_level(5)
        .build()
        .await?;
    let below = InventoryItemFactory::new(db)
        .quantity(1)
        .reorder_level(3)
        .build()
        .await?;
    InventoryItemFactory::new(db)
        .quantity(20)
        .reorder_level(3)
        .build()
        .await?;
    InventoryItemFactory::new(db)
        .quantity(0)
        .reorder_level(3)
        .active(false)
        .build()
        .await?;

    let repo = InventoryRepository::new(db);
    let low = repo.get_low_stock().await?;

    let ids: Vec<i32> = low.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![below.id, at_level.id]);

    Ok(())
}
