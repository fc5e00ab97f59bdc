use super::*;

/// Tests an owner cancelling their pending booking.
///
/// Expected: status cancelled, reason stored, reserved stock restored
#[tokio::test]
async fn owner_cancels_pending_booking() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let owner = factory::create_house_owner(db).await?;
    let service = factory::create_service(db).await?;
    let item = InventoryItemFactory::new(db).quantity(5).build().await?;

    let bookings = BookingService::new(db, &realtime);
    let booking = bookings
        .create(booking_params(
            owner.id,
            service.id,
            vec![StockRequest {
                item_id: item.id,
                quantity: 2,
            }],
        ))
        .await?;

    let cancelled = bookings
        .cancel(
            &domain_user(owner),
            booking.id,
            Some("  Plans changed ".to_string()),
        )
        .await?;

    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    assert_eq!(cancelled.inventory_status, InventoryStatus::Released);
    assert_eq!(cancelled.cancellation_reason.as_deref(), Some("Plans changed"));
    assert!(cancelled.cancelled_at.is_some());
    assert_eq!(stock_of(db, item.id).await, 5);

    Ok(())
}

/// Tests cancelling the same booking twice.
///
/// Expected: second call fails with Err(BadRequest) and stock is restored only once
#[tokio::test]
async fn second_cancel_does_not_restore_again() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let owner = domain_user(factory::create_house_owner(db).await?);
    let service = factory::create_service(db).await?;
    let item = InventoryItemFactory::new(db).quantity(5).build().await?;

    let bookings = BookingService::new(db, &realtime);
    let booking = bookings
        .create(booking_params(
            owner.id,
            service.id,
            vec![StockRequest {
                item_id: item.id,
                quantity: 3,
            }],
        ))
        .await?;

    bookings.cancel(&owner, booking.id, None).await?;
    let result = bookings.cancel(&owner, booking.id, None).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(stock_of(db, item.id).await, 5);

    Ok(())
}

/// Tests an owner cancelling a booking that is already in progress.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn owner_cannot_cancel_in_progress() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let owner = factory::create_house_owner(db).await?;
    let service = factory::create_service(db).await?;
    let booking = BookingFactory::new(db, owner.id, service.id)
        .status("in_progress")
        .build()
        .await?;

    let result = BookingService::new(db, &realtime)
        .cancel(&domain_user(owner), booking.id, None)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests an admin cancelling a booking in progress.
///
/// Expected: cancelled, assigned technician notified
#[tokio::test]
async fn admin_cancels_in_progress() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let admin = domain_user(factory::create_admin(db).await?);
    let owner = factory::create_house_owner(db).await?;
    let technician = factory::create_technician(db).await?;
    let service = factory::create_service(db).await?;
    let booking = BookingFactory::new(db, owner.id, service.id)
        .technician(technician.id)
        .status("in_progress")
        .build()
        .await?;

    let cancelled = BookingService::new(db, &realtime)
        .cancel(&admin, booking.id, None)
        .await?;

    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    assert_eq!(
        NotificationRepository::new(db)
            .unread_count(technician.id)
            .await?,
        1
    );

    Ok(())
}

/// Tests another house owner cancelling a booking.
///
/// Expected: Err(AuthErr)
#[tokio::test]
async fn stranger_cannot_cancel() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let owner = factory::create_house_owner(db).await?;
    let stranger = factory::create_house_owner(db).await?;
    let service = factory::create_service(db).await?;
    let booking = factory::create_booking(db, owner.id, service.id).await?;

    let result = BookingService::new(db, &realtime)
        .cancel(&domain_user(stranger), booking.id, None)
        .await;

    assert!(matches!(result, Err(AppError::AuthErr(_))));

    Ok(())
}
