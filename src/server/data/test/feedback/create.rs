use sea_orm::SqlErr;

use super::*;

/// Tests creating feedback with category ratings.
///
/// Expected: row stored with the given ratings and status
#[tokio::test]
async fn stores_feedback() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, technician, _, booking) = create_booking_with_dependencies(db).await?;

    let repo = FeedbackRepository::new(db);
    let mut new_feedback = params(&booking, technician.id, 4, FeedbackStatus::Pending);
    new_feedback.categories = CategoryRatings {
        quality: Some(5),
        punctuality: Some(3),
        ..Default::default()
    };
    new_feedback.comment = Some("Tidy work".to_string());

    let created = repo.create(new_feedback).await?;

    assert_eq!(created.rating, 4);
    assert_eq!(created.quality_rating, Some(5));
    assert_eq!(created.punctuality_rating, Some(3));
    assert_eq!(created.value_rating, None);
    assert_eq!(created.status, "pending");
    assert!(repo.exists_for_booking(booking.id).await?);

    Ok(())
}

/// Tests creating a second feedback for the same booking.
///
/// Expected: Err with a unique constraint violation
#[tokio::test]
async fn rejects_second_feedback_for_booking() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, technician, _, booking) = create_booking_with_dependencies(db).await?;

    let repo = FeedbackRepository::new(db);
    repo.create(params(&booking, technician.id, 5, FeedbackStatus::Pending))
        .await?;
    let result = repo
        .create(params(&booking, technician.id, 1, FeedbackStatus::Pending))
        .await;

    let err = result.unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));

    Ok(())
}
