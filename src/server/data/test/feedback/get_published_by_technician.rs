use super::*;

/// Tests that only published feedback for the technician is returned.
///
/// Expected: one entry; pending feedback and other technicians' feedback excluded
#[tokio::test]
async fn returns_only_published_for_technician() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_house_owner(db).await?;
    let technician = factory::create_technician(db).await?;
    let other = factory::create_technician(db).await?;
    let service = factory::create_service(db).await?;

    let first = factory::create_booking(db, owner.id, service.id).await?;
    let second = factory::create_booking(db, owner.id, service.id).await?;
    let third = factory::create_booking(db, owner.id, service.id).await?;

    let repo = FeedbackRepository::new(db);
    let published = repo
        .create(params(&first, technician.id, 5, FeedbackStatus::Published))
        .await?;
    repo.create(params(&second, technician.id, 2, FeedbackStatus::Pending))
        .await?;
    repo.create(params(&third, other.id, 4, FeedbackStatus::Published))
        .await?;

    let result = repo.get_published_by_technician(technician.id).await?;

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, published.id);

    Ok(())
}

/// Tests that moderation changes which feedback is public.
///
/// Expected: hidden feedback disappears from the published list
#[tokio::test]
async fn hidden_feedback_is_excluded() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, technician, _, booking) = create_booking_with_dependencies(db).await?;

    let repo = FeedbackRepository::new(db);
    let feedback = repo
        .create(params(&booking, technician.id, 3, FeedbackStatus::Published))
        .await?;
    assert!(repo.set_status(feedback.id, FeedbackStatus::Hidden).await?);

    let result = repo.get_published_by_technician(technician.id).await?;
    assert!(result.is_empty());

    Ok(())
}
