use super::*;

/// Tests accepting a booking that has no technician.
///
/// Expected: Err(BadRequest), booking still pending
#[tokio::test]
async fn accept_requires_technician() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let admin = domain_user(factory::create_admin(db).await?);
    let owner = factory::create_house_owner(db).await?;
    let service = factory::create_service(db).await?;
    let booking = factory::create_booking(db, owner.id, service.id).await?;

    let bookings = BookingService::new(db, &realtime);
    let result = bookings
        .update_status(&admin, booking.id, BookingStatus::Accepted, None)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(bookings.get_by_id(booking.id).await?.status, BookingStatus::Pending);

    Ok(())
}

/// Tests an admin accepting a booking with an assigned technician.
///
/// Expected: status accepted, timestamp stamped, owner and technician notified
#[tokio::test]
async fn admin_accepts_assigned_booking() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let admin = domain_user(factory::create_admin(db).await?);
    let owner = factory::create_house_owner(db).await?;
    let technician = factory::create_technician(db).await?;
    let service = factory::create_service(db).await?;
    let booking = BookingFactory::new(db, owner.id, service.id)
        .technician(technician.id)
        .build()
        .await?;

    let accepted = BookingService::new(db, &realtime)
        .update_status(&admin, booking.id, BookingStatus::Accepted, None)
        .await?;

    assert_eq!(accepted.status, BookingStatus::Accepted);
    assert!(accepted.accepted_at.is_some());
    let notifications = NotificationRepository::new(db);
    assert_eq!(notifications.unread_count(owner.id).await?, 1);
    assert_eq!(notifications.unread_count(technician.id).await?, 1);

    Ok(())
}

/// Tests a technician trying to accept a booking.
///
/// Expected: Err(AuthErr)
#[tokio::test]
async fn technician_cannot_accept() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let owner = factory::create_house_owner(db).await?;
    let technician = factory::create_technician(db).await?;
    let service = factory::create_service(db).await?;
    let booking = BookingFactory::new(db, owner.id, service.id)
        .technician(technician.id)
        .build()
        .await?;

    let result = BookingService::new(db, &realtime)
        .update_status(
            &domain_user(technician),
            booking.id,
            BookingStatus::Accepted,
            None,
        )
        .await;

    assert!(matches!(result, Err(AppError::AuthErr(_))));

    Ok(())
}

/// Tests skipping steps in the lifecycle.
///
/// Expected: Err(BadRequest) for pending → completed
#[tokio::test]
async fn rejects_transition_outside_lifecycle() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let admin = domain_user(factory::create_admin(db).await?);
    let owner = factory::create_house_owner(db).await?;
    let service = factory::create_service(db).await?;
    let booking = factory::create_booking(db, owner.id, service.id).await?;

    let result = BookingService::new(db, &realtime)
        .update_status(&admin, booking.id, BookingStatus::Completed, None)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests a technician who is not assigned starting work.
///
/// Expected: Err(AuthErr)
#[tokio::test]
async fn other_technician_cannot_start() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let owner = factory::create_house_owner(db).await?;
    let assigned = factory::create_technician(db).await?;
    let other = factory::create_technician(db).await?;
    let service = factory::create_service(db).await?;
    let booking = BookingFactory::new(db, owner.id, service.id)
        .technician(assigned.id)
        .status("accepted")
        .build()
        .await?;

    let result = BookingService::new(db, &realtime)
        .update_status(&domain_user(other), booking.id, BookingStatus::InProgress, None)
        .await;

    assert!(matches!(result, Err(AppError::AuthErr(_))));

    Ok(())
}

/// Tests the full lifecycle of a booking with reserved inventory.
///
/// Expected: completion consumes the reservation without touching stock again and
/// records auto-generated full-marks feedback
#[tokio::test]
async fn completion_consumes_reservation_and_records_feedback() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let admin = domain_user(factory::create_admin(db).await?);
    let owner = factory::create_house_owner(db).await?;
    let technician = factory::create_technician(db).await?;
    let service = factory::create_service(db).await?;
    let item = InventoryItemFactory::new(db).quantity(6).build().await?;

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
    bookings.assign_technician(booking.id, technician.id).await?;
    bookings
        .update_status(&admin, booking.id, BookingStatus::Accepted, None)
        .await?;

    let technician = domain_user(technician);
    bookings
        .update_status(&technician, booking.id, BookingStatus::InProgress, None)
        .await?;
    let completed = bookings
        .update_status(&technician, booking.id, BookingStatus::Completed, None)
        .await?;

    assert_eq!(completed.status, BookingStatus::Completed);
    assert_eq!(completed.inventory_status, InventoryStatus::Consumed);
    assert!(completed.started_at.is_some());
    assert!(completed.completed_at.is_some());
    assert_eq!(stock_of(db, item.id).await, 3);

    let feedback = FeedbackRepository::new(db)
        .find_by_booking(booking.id)
        .await?
        .unwrap();
    assert!(feedback.is_auto_generated);
    assert_eq!(feedback.rating, 5);
    assert_eq!(feedback.technician_id, Some(technician.id));

    Ok(())
}

/// Tests rejecting a booking with reserved inventory.
///
/// Expected: status rejected, stock restored, reservation released
#[tokio::test]
async fn rejection_releases_reservation() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let admin = domain_user(factory::create_admin(db).await?);
    let owner = factory::create_house_owner(db).await?;
    let service = factory::create_service(db).await?;
    let item = InventoryItemFactory::new(db).quantity(4).build().await?;

    let bookings = BookingService::new(db, &realtime);
    let booking = bookings
        .create(booking_params(
            owner.id,
            service.id,
            vec![StockRequest {
                item_id: item.id,
                quantity: 4,
            }],
        ))
        .await?;
    assert_eq!(stock_of(db, item.id).await, 0);

    let rejected = bookings
        .update_status(
            &admin,
            booking.id,
            BookingStatus::Rejected,
            Some("No technician available".to_string()),
        )
        .await?;

    assert_eq!(rejected.status, BookingStatus::Rejected);
    assert_eq!(rejected.inventory_status, InventoryStatus::Released);
    assert!(rejected.rejected_at.is_some());
    assert_eq!(
        rejected.cancellation_reason.as_deref(),
        Some("No technician available")
    );
    assert_eq!(stock_of(db, item.id).await, 4);

    Ok(())
}
