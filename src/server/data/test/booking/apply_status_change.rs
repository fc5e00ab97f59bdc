use super::*;

fn change(status: BookingStatus) -> StatusChange {
    StatusChange {
        status,
        at: Utc::now(),
        cancellation_reason: None,
        inventory_status: None,
    }
}

/// Tests a transition from the expected current status.
///
/// Expected: Ok(true), status and accepted_at written
#[tokio::test]
async fn writes_status_and_timestamp() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, booking) = create_booking_with_dependencies(db).await?;

    let repo = BookingRepository::new(db);
    let applied = repo
        .apply_status_change(booking.id, BookingStatus::Pending, change(BookingStatus::Accepted))
        .await?;

    assert!(applied);
    let updated = repo.find_by_id(booking.id).await?.unwrap();
    assert_eq!(updated.status, "accepted");
    assert!(updated.accepted_at.is_some());

    Ok(())
}

/// Tests a transition whose expected current status is stale.
///
/// Expected: Ok(false) and the row is unchanged
#[tokio::test]
async fn rejects_stale_status() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_house_owner(db).await?;
    let service = factory::create_service(db).await?;
    let booking = BookingFactory::new(db, owner.id, service.id)
        .status("cancelled")
        .build()
        .await?;

    let repo = BookingRepository::new(db);
    let applied = repo
        .apply_status_change(booking.id, BookingStatus::Pending, change(BookingStatus::Accepted))
        .await?;

    assert!(!applied);
    let unchanged = repo.find_by_id(booking.id).await?.unwrap();
    assert_eq!(unchanged.status, "cancelled");
    assert!(unchanged.accepted_at.is_none());

    Ok(())
}

/// Tests cancellation writing reason and inventory status together.
///
/// Expected: cancellation_reason, cancelled_at and inventory_status all set
#[tokio::test]
async fn writes_cancellation_details() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_house_owner(db).await?;
    let service = factory::create_service(db).await?;
    let booking = BookingFactory::new(db, owner.id, service.id)
        .inventory_status("reserved")
        .build()
        .await?;

    let repo = BookingRepository::new(db);
    repo.apply_status_change(
        booking.id,
        BookingStatus::Pending,
        StatusChange {
            status: BookingStatus::Cancelled,
            at: Utc::now(),
            cancellation_reason: Some("Moved house".to_string()),
            inventory_status: Some(InventoryStatus::Released),
        },
    )
    .await?;

    let updated = repo.find_by_id(booking.id).await?.unwrap();
    assert_eq!(updated.status, "cancelled");
    assert_eq!(updated.cancellation_reason.as_deref(), Some("Moved house"));
    assert_eq!(updated.inventory_status, "released");
    assert!(updated.cancelled_at.is_some());

    Ok(())
}
