use super::*;

/// Tests marking a notification read twice.
///
/// Expected: read on both calls, read_at unchanged by the second call
#[tokio::test]
async fn mark_read_is_idempotent() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_house_owner(db).await?;
    let repo = NotificationRepository::new(db);
    let notification = repo.create(announcement(user.id)).await?;

    let first = repo.mark_read(notification.id, user.id).await?.unwrap();
    let second = repo.mark_read(notification.id, user.id).await?.unwrap();

    assert!(first.is_read);
    assert!(second.is_read);
    assert_eq!(first.read_at, second.read_at);
    assert_eq!(repo.unread_count(user.id).await?, 0);

    Ok(())
}

/// Tests marking another user's notification read.
///
/// Expected: Ok(None) and the notification stays unread
#[tokio::test]
async fn mark_read_requires_recipient() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_house_owner(db).await?;
    let stranger = factory::create_house_owner(db).await?;
    let repo = NotificationRepository::new(db);
    let notification = repo.create(announcement(owner.id)).await?;

    assert!(repo.mark_read(notification.id, stranger.id).await?.is_none());
    assert_eq!(repo.unread_count(owner.id).await?, 1);

    Ok(())
}

/// Tests marking all notifications read.
///
/// Expected: only the recipient's unread rows change
#[tokio::test]
async fn mark_all_read_counts_changed_rows() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_house_owner(db).await?;
    let other = factory::create_house_owner(db).await?;
    let repo = NotificationRepository::new(db);

    let already_read = repo.create(announcement(user.id)).await?;
    repo.mark_read(already_read.id, user.id).await?;
    repo.create(announcement(user.id)).await?;
    repo.create(announcement(user.id)).await?;
    repo.create(announcement(other.id)).await?;

    assert_eq!(repo.mark_all_read(user.id).await?, 2);
    assert_eq!(repo.unread_count(user.id).await?, 0);
    assert_eq!(repo.unread_count(other.id).await?, 1);

    let (unread, total) = repo.get_paginated(user.id, true, 0, 10).await?;
    assert!(unread.is_empty());
    assert_eq!(total, 0);

    Ok(())
}
