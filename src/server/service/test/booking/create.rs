use super::*;
use crate::server::service::booking::create::merge_stock_requests;

/// Tests creating a booking with selected inventory.
///
/// Expected: total includes line items, stock decremented, reservation recorded
#[tokio::test]
async fn reserves_selected_inventory() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let owner = factory::create_house_owner(db).await?;
    let service = factory::create_service(db).await?;
    let item = InventoryItemFactory::new(db)
        .quantity(5)
        .unit_price(12.5)
        .build()
        .await?;

    let booking = BookingService::new(db, &realtime)
        .create(booking_params(
            owner.id,
            service.id,
            vec![StockRequest {
                item_id: item.id,
                quantity: 2,
            }],
        ))
        .await?;

    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.inventory_status, InventoryStatus::Reserved);
    assert_eq!(booking.total_amount, 125.0);
    assert_eq!(booking.items.len(), 1);
    assert_eq!(booking.items[0].quantity, 2);
    assert_eq!(stock_of(db, item.id).await, 3);

    Ok(())
}

/// Tests creating a booking without inventory.
///
/// Expected: total equals service price, no reservation
#[tokio::test]
async fn creates_booking_without_items() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let owner = factory::create_house_owner(db).await?;
    let service = factory::create_service(db).await?;

    let booking = BookingService::new(db, &realtime)
        .create(booking_params(owner.id, service.id, Vec::new()))
        .await?;

    assert_eq!(booking.inventory_status, InventoryStatus::None);
    assert_eq!(booking.total_amount, service.price);
    assert!(booking.items.is_empty());

    Ok(())
}

/// Tests a booking where one of several items is short of stock.
///
/// Expected: Err(BadRequest), no booking stored and no stock taken from any item
#[tokio::test]
async fn rolls_back_when_stock_is_short() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let owner = factory::create_house_owner(db).await?;
    let service = factory::create_service(db).await?;
    let plenty = InventoryItemFactory::new(db).quantity(10).build().await?;
    let scarce = InventoryItemFactory::new(db).quantity(1).build().await?;

    let result = BookingService::new(db, &realtime)
        .create(booking_params(
            owner.id,
            service.id,
            vec![
                StockRequest {
                    item_id: plenty.id,
                    quantity: 4,
                },
                StockRequest {
                    item_id: scarce.id,
                    quantity: 2,
                },
            ],
        ))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(stock_of(db, plenty.id).await, 10);
    assert_eq!(stock_of(db, scarce.id).await, 1);
    assert_eq!(entity::prelude::Booking::find().count(db).await?, 0);

    Ok(())
}

/// Tests booking an inactive inventory item.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_inactive_item() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let owner = factory::create_house_owner(db).await?;
    let service = factory::create_service(db).await?;
    let item = InventoryItemFactory::new(db).active(false).build().await?;

    let result = BookingService::new(db, &realtime)
        .create(booking_params(
            owner.id,
            service.id,
            vec![StockRequest {
                item_id: item.id,
                quantity: 1,
            }],
        ))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests booking a date in the past.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_past_date() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let owner = factory::create_house_owner(db).await?;
    let service = factory::create_service(db).await?;

    let mut params = booking_params(owner.id, service.id, Vec::new());
    params.scheduled_date = (Utc::now() - Duration::days(1)).date_naive();

    let result = BookingService::new(db, &realtime).create(params).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests booking an inactive service.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn rejects_inactive_service() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let owner = factory::create_house_owner(db).await?;
    let service = factory::service_offering::ServiceOfferingFactory::new(db)
        .active(false)
        .build()
        .await?;

    let result = BookingService::new(db, &realtime)
        .create(booking_params(owner.id, service.id, Vec::new()))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests that admins hear about new bookings and items dropping to their reorder level.
///
/// Expected: admin receives a booking notification and a low stock notification
#[tokio::test]
async fn notifies_admins_of_booking_and_low_stock() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let admin = factory::create_admin(db).await?;
    let owner = factory::create_house_owner(db).await?;
    let service = factory::create_service(db).await?;
    let item = InventoryItemFactory::new(db)
        .quantity(4)
        .reorder_level(2)
        .build()
        .await?;

    BookingService::new(db, &realtime)
        .create(booking_params(
            owner.id,
            service.id,
            vec![StockRequest {
                item_id: item.id,
                quantity: 2,
            }],
        ))
        .await?;

    let (notifications, _) = NotificationRepository::new(db)
        .get_paginated(admin.id, false, 0, 10)
        .await?;
    let kinds: Vec<&str> = notifications.iter().map(|n| n.kind.as_str()).collect();
    assert!(kinds.contains(&"booking_created"));
    assert!(kinds.contains(&"low_stock"));

    Ok(())
}

/// Tests merging repeated items into a single request.
///
/// Expected: quantities summed per item, ordered by item id
#[test]
fn merges_duplicate_items() {
    let merged = merge_stock_requests(&[
        StockRequest {
            item_id: 7,
            quantity: 1,
        },
        StockRequest {
            item_id: 3,
            quantity: 2,
        },
        StockRequest {
            item_id: 7,
            quantity: 4,
        },
    ])
    .unwrap();

    assert_eq!(
        merged,
        vec![
            StockRequest {
                item_id: 3,
                quantity: 2
            },
            StockRequest {
                item_id: 7,
                quantity: 5
            },
        ]
    );
}

/// Tests a request with a zero quantity.
///
/// Expected: Err(BadRequest)
#[test]
fn rejects_non_positive_quantity() {
    let result = merge_stock_requests(&[StockRequest {
        item_id: 1,
        quantity: 0,
    }]);

    assert!(matches!(result, Err(AppError::BadRequest(_))));
}
