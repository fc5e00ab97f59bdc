use super::*;

/// Tests creating a booking with line items and reading it back with relations.
///
/// Expected: booking pending, items stored with their unit price snapshot, names resolved
#[tokio::test]
async fn creates_booking_with_items() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_house_owner(db).await?;
    let service = factory::create_service(db).await?;
    let item = factory::create_inventory_item(db).await?;

    let repo = BookingRepository::new(db);
    let booking = repo
        .create(NewBooking {
            house_owner_id: owner.id,
            service_id: service.id,
            scheduled_date: (Utc::now() + Duration::days(2)).date_naive(),
            scheduled_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            address: "12 Elm Street".to_string(),
            notes: Some("Ring twice".to_string()),
            total_amount: 110.0,
            inventory_status: InventoryStatus::Reserved,
            items: vec![NewBookingItem {
                item_id: item.id,
                quantity: 2,
                unit_price: 5.0,
            }],
        })
        .await?;

    assert_eq!(booking.status, "pending");
    assert_eq!(booking.inventory_status, "reserved");

    let loaded = repo.get_by_id(booking.id).await?.unwrap();
    assert_eq!(loaded.house_owner.unwrap().id, owner.id);
    assert_eq!(loaded.service.unwrap().id, service.id);
    assert!(loaded.technician.is_none());
    assert_eq!(loaded.items.len(), 1);
    let (line, inventory) = &loaded.items[0];
    assert_eq!(line.quantity, 2);
    assert_eq!(line.unit_price, 5.0);
    assert_eq!(inventory.as_ref().unwrap().name, item.name);

    Ok(())
}

/// Tests loading a missing booking.
///
/// Expected: Ok(None)
#[tokio::test]
async fn missing_booking_returns_none() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = BookingRepository::new(db);
    assert!(repo.get_by_id(42).await?.is_none());

    Ok(())
}
