use crate::server::model::{announcement::UpdateAnnouncementParams, user::Role};

use super::*;

/// Tests audience filtering for a technician.
///
/// Expected: "all" and "technicians" announcements only
#[tokio::test]
async fn filters_by_audience() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_announcement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let repo = AnnouncementRepository::new(db);
    repo.create(params("Everyone", Audience::All, admin.id)).await?;
    repo.create(params("Techs", Audience::Technicians, admin.id))
        .await?;
    repo.create(params("Owners", Audience::HouseOwners, admin.id))
        .await?;

    let visible = repo
        .get_active_for_audiences(Audience::visible_to(Role::Technician))
        .await?;

    let mut titles: Vec<&str> = visible.iter().map(|a| a.title.as_str()).collect();
    titles.sort();
    assert_eq!(titles, vec!["Everyone", "Techs"]);

    Ok(())
}

/// Tests that deactivated announcements are excluded.
///
/// Expected: empty list after deactivation
#[tokio::test]
async fn excludes_inactive() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_announcement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let repo = AnnouncementRepository::new(db);
    let announcement = repo.create(params("Everyone", Audience::All, admin.id)).await?;

    repo.update(
        announcement.id,
        UpdateAnnouncementParams {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await?;

    let visible = repo
        .get_active_for_audiences(Audience::visible_to(Role::HouseOwner))
        .await?;
    assert!(visible.is_empty());

    Ok(())
}
