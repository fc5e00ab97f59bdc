use super::*;

/// Tests reminders for accepted bookings.
///
/// Expected: only the booking inside the window is reminded, and only once
#[tokio::test]
async fn reminds_bookings_within_window_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let owner = factory::create_house_owner(db).await?;
    let technician = factory::create_technician(db).await?;
    let service = factory::create_service(db).await?;
    let soon = BookingFactory::new(db, owner.id, service.id)
        .technician(technician.id)
        .status("accepted")
        .scheduled_in(Duration::hours(3))
        .build()
        .await?;
    let later = BookingFactory::new(db, owner.id, service.id)
        .status("accepted")
        .scheduled_in(Duration::days(4))
        .build()
        .await?;

    let bookings = BookingService::new(db, &realtime);
    let now = Utc::now();

    assert_eq!(bookings.send_due_reminders(now).await?, 1);
    assert_eq!(bookings.send_due_reminders(now).await?, 0);

    let repo = BookingRepository::new(db);
    assert!(repo.find_by_id(soon.id).await?.unwrap().reminder_sent);
    assert!(!repo.find_by_id(later.id).await?.unwrap().reminder_sent);

    let notifications = NotificationRepository::new(db);
    assert_eq!(notifications.unread_count(owner.id).await?, 1);
    assert_eq!(notifications.unread_count(technician.id).await?, 1);

    Ok(())
}

/// Tests reminders for bookings that are still pending.
///
/// Expected: no reminder sent
#[tokio::test]
async fn skips_pending_bookings() -> Result<(), AppError> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let realtime = RealtimeHub::new();

    let owner = factory::create_house_owner(db).await?;
    let service = factory::create_service(db).await?;
    BookingFactory::new(db, owner.id, service.id)
        .scheduled_in(Duration::hours(2))
        .build()
        .await?;

    let sent = BookingService::new(db, &realtime)
        .send_due_reminders(Utc::now())
        .await?;

    assert_eq!(sent, 0);

    Ok(())
}
