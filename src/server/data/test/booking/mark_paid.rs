use super::*;

/// Tests marking a booking paid twice.
///
/// Expected: first call true, second call false, paid_at kept from the first
#[tokio::test]
async fn marks_paid_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, booking) = create_booking_with_dependencies(db).await?;

    let repo = BookingRepository::new(db);
    let first_at = Utc::now();
    assert!(repo.mark_paid(booking.id, first_at).await?);
    assert!(!repo.mark_paid(booking.id, first_at + Duration::minutes(5)).await?);

    let paid = repo.find_by_id(booking.id).await?.unwrap();
    assert_eq!(paid.payment_status, "paid");
    assert_eq!(
        paid.paid_at.map(|t| t.timestamp()),
        Some(first_at.timestamp())
    );

    Ok(())
}

/// Tests that a failed payment event does not overwrite a paid booking.
///
/// Expected: payment_status stays "paid"
#[tokio::test]
async fn failure_does_not_override_paid() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, booking) = create_booking_with_dependencies(db).await?;

    let repo = BookingRepository::new(db);
    repo.mark_paid(booking.id, Utc::now()).await?;
    repo.mark_payment_failed(booking.id).await?;

    let paid = repo.find_by_id(booking.id).await?.unwrap();
    assert_eq!(paid.payment_status, "paid");

    Ok(())
}
