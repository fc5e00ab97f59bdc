use super::*;

/// Tests assigning a technician to a pending booking.
///
/// Expected: technician set, status unchanged, technician notified
#[tokio::test]
async fn assigns_technician() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let owner = factory::create_house_owner(db).await?;
    let technician = factory::create_technician(db).await?;
    let service = factory::create_service(db).await?;
    let booking = factory::create_booking(db, owner.id, service.id).await?;

    let assigned = BookingService::new(db, &realtime)
        .assign_technician(booking.id, technician.id)
        .await?;

    assert_eq!(assigned.technician_id, Some(technician.id));
    assert_eq!(assigned.technician_name.as_deref(), Some(technician.name.as_str()));
    assert_eq!(assigned.status, BookingStatus::Pending);
    assert_eq!(
        NotificationRepository::new(db)
            .unread_count(technician.id)
            .await?,
        1
    );

    Ok(())
}

/// Tests assigning a user who is not a technician.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_non_technician() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let owner = factory::create_house_owner(db).await?;
    let service = factory::create_service(db).await?;
    let booking = factory::create_booking(db, owner.id, service.id).await?;

    let result = BookingService::new(db, &realtime)
        .assign_technician(booking.id, owner.id)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests assigning a deactivated technician.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_inactive_technician() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let owner = factory::create_house_owner(db).await?;
    let technician = UserFactory::new(db)
        .role("technician")
        .active(false)
        .build()
        .await?;
    let service = factory::create_service(db).await?;
    let booking = factory::create_booking(db, owner.id, service.id).await?;

    let result = BookingService::new(db, &realtime)
        .assign_technician(booking.id, technician.id)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests assigning a technician after work has started.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_booking_in_progress() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let owner = factory::create_house_owner(db).await?;
    let technician = factory::create_technician(db).await?;
    let service = factory::create_service(db).await?;
    let booking = BookingFactory::new(db, owner.id, service.id)
        .status("in_progress")
        .build()
        .await?;

    let result = BookingService::new(db, &realtime)
        .assign_technician(booking.id, technician.id)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
