use super::*;

/// Tests replacing auto-generated feedback with the owner's own feedback.
///
/// Expected: Ok(true), row now owner-written with the new rating and comment
#[tokio::test]
async fn replaces_auto_generated_feedback() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, technician, _, booking) = create_booking_with_dependencies(db).await?;

    let repo = FeedbackRepository::new(db);
    let mut auto = params(&booking, technician.id, 5, FeedbackStatus::Pending);
    auto.categories = CategoryRatings::max();
    auto.is_auto_generated = true;
    repo.create(auto).await?;

    let mut owner = params(&booking, technician.id, 3, FeedbackStatus::Pending);
    owner.comment = Some("Arrived late".to_string());
    let replaced = repo.replace_auto_generated(owner).await?;

    assert!(replaced);
    let stored = repo.find_by_booking(booking.id).await?.unwrap();
    assert_eq!(stored.rating, 3);
    assert!(!stored.is_auto_generated);
    assert_eq!(stored.quality_rating, None);
    assert_eq!(stored.comment.as_deref(), Some("Arrived late"));

    Ok(())
}

/// Tests replacing feedback that the owner wrote.
///
/// Expected: Ok(false), original feedback untouched
#[tokio::test]
async fn keeps_owner_written_feedback() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, technician, _, booking) = create_booking_with_dependencies(db).await?;

    let repo = FeedbackRepository::new(db);
    repo.create(params(&booking, technician.id, 4, FeedbackStatus::Pending))
        .await?;

    let replaced = repo
        .replace_auto_generated(params(&booking, technician.id, 1, FeedbackStatus::Pending))
        .await?;

    assert!(!replaced);
    let stored = repo.find_by_booking(booking.id).await?.unwrap();
    assert_eq!(stored.rating, 4);

    Ok(())
}

/// Tests replacing feedback for a booking that has none.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_without_feedback() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, technician, _, booking) = create_booking_with_dependencies(db).await?;

    let replaced = FeedbackRepository::new(db)
        .replace_auto_generated(params(&booking, technician.id, 2, FeedbackStatus::Pending))
        .await?;

    assert!(!replaced);

    Ok(())
}
