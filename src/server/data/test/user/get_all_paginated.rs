use super::*;

/// Tests role filtering in the paginated user list.
///
/// Expected: only technicians counted and returned
#[tokio::test]
async fn filters_by_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_house_owner(db).await?;
    factory::create_technician(db).await?;
    factory::create_technician(db).await?;
    factory::create_admin(db).await?;

    let repo = UserRepository::new(db);
    let (technicians, total) = repo
        .get_all_paginated(Some(Role::Technician), 0, 10)
        .await?;

    assert_eq!(total, 2);
    assert!(technicians.iter().all(|u| u.role == "technician"));

    let (page, total) = repo.get_all_paginated(None, 1, 3).await?;
    assert_eq!(total, 4);
    assert_eq!(page.len(), 1);

    Ok(())
}

/// Tests that deactivated technicians are not offered for assignment.
///
/// Expected: only the active technician returned
#[tokio::test]
async fn active_by_role_skips_inactive() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let active = factory::create_technician(db).await?;
    let inactive = factory::create_technician(db).await?;

    let repo = UserRepository::new(db);
    repo.set_active(inactive.id, false).await?;

    let technicians = repo.get_active_by_role(Role::Technician).await?;
    assert_eq!(technicians.len(), 1);
    assert_eq!(technicians[0].id, active.id);

    Ok(())
}
