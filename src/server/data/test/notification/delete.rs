use super::*;

/// Tests deleting a notification by its recipient and by someone else.
///
/// Expected: stranger gets false, recipient gets true, row removed
#[tokio::test]
async fn deletes_only_own_notification() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_house_owner(db).await?;
    let stranger = factory::create_technician(db).await?;
    let repo = NotificationRepository::new(db);
    let notification = repo.create(announcement(owner.id)).await?;

    assert!(!repo.delete(notification.id, stranger.id).await?);
    assert!(repo.delete(notification.id, owner.id).await?);

    let (remaining, total) = repo.get_paginated(owner.id, false, 0, 10).await?;
    assert!(remaining.is_empty());
    assert_eq!(total, 0);

    Ok(())
}
