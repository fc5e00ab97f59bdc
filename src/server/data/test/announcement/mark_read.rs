use super::*;

/// Tests recording the same read receipt twice.
///
/// Expected: no error and exactly one receipt row
#[tokio::test]
async fn mark_read_twice_keeps_one_receipt() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_announcement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let reader = factory::create_technician(db).await?;
    let repo = AnnouncementRepository::new(db);
    let announcement = repo.create(params("Holiday", Audience::All, admin.id)).await?;

    repo.mark_read(announcement.id, reader.id).await?;
    repo.mark_read(announcement.id, reader.id).await?;

    let receipts = entity::prelude::AnnouncementRead::find().count(db).await?;
    assert_eq!(receipts, 1);

    let read = repo
        .read_ids_for_user(reader.id, vec![announcement.id])
        .await?;
    assert!(read.contains(&announcement.id));

    Ok(())
}

/// Tests deleting an announcement that has receipts.
///
/// Expected: announcement and its receipts removed
#[tokio::test]
async fn delete_removes_receipts() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_announcement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let reader = factory::create_house_owner(db).await?;
    let repo = AnnouncementRepository::new(db);
    let announcement = repo.create(params("Holiday", Audience::All, admin.id)).await?;
    repo.mark_read(announcement.id, reader.id).await?;

    assert!(repo.delete(announcement.id).await?);
    assert!(repo.find_by_id(announcement.id).await?.is_none());
    assert_eq!(
        entity::prelude::AnnouncementRead::find().count(db).await?,
        0
    );
    assert!(!repo.delete(announcement.id).await?);

    Ok(())
}
