use super::*;

/// Tests counting per status and summing paid revenue.
///
/// Expected: counts match inserted rows and revenue only includes paid bookings
#[tokio::test]
async fn counts_statuses_and_revenue() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_house_owner(db).await?;
    let service = factory::create_service(db).await?;

    let paid = BookingFactory::new(db, owner.id, service.id)
        .status("completed")
        .total_amount(150.0)
        .build()
        .await?;
    BookingFactory::new(db, owner.id, service.id)
        .status("completed")
        .total_amount(80.0)
        .build()
        .await?;
    BookingFactory::new(db, owner.id, service.id).build().await?;
    BookingFactory::new(db, owner.id, service.id)
        .status("cancelled")
        .build()
        .await?;

    let repo = BookingRepository::new(db);
    repo.mark_paid(paid.id, Utc::now()).await?;

    let stats = repo.stats().await?;

    assert_eq!(stats.total, 4);
    assert_eq!(stats.completed, 2);
    assert_eq!(stats.pending, 1);
    assert_eq!(stats.cancelled, 1);
    assert_eq!(stats.accepted, 0);
    assert_eq!(stats.revenue, 150.0);

    Ok(())
}
