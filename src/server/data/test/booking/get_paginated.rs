use super::*;

/// Tests that scopes restrict bookings to the owner or assigned technician.
///
/// Expected: owner sees own bookings, technician sees assigned ones, admin scope sees all
#[tokio::test]
async fn filters_by_scope() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner_a = factory::create_house_owner(db).await?;
    let owner_b = factory::create_house_owner(db).await?;
    let technician = factory::create_technician(db).await?;
    let service = factory::create_service(db).await?;

    BookingFactory::new(db, owner_a.id, service.id)
        .technician(technician.id)
        .build()
        .await?;
    BookingFactory::new(db, owner_a.id, service.id).build().await?;
    BookingFactory::new(db, owner_b.id, service.id).build().await?;

    let repo = BookingRepository::new(db);

    let (_, total) = repo.get_paginated(BookingScope::All, None, 0, 10).await?;
    assert_eq!(total, 3);

    let (owned, total) = repo
        .get_paginated(BookingScope::HouseOwner(owner_a.id), None, 0, 10)
        .await?;
    assert_eq!(total, 2);
    assert!(owned.iter().all(|b| b.booking.house_owner_id == owner_a.id));

    let (assigned, total) = repo
        .get_paginated(BookingScope::Technician(technician.id), None, 0, 10)
        .await?;
    assert_eq!(total, 1);
    assert_eq!(assigned[0].technician.as_ref().unwrap().id, technician.id);

    Ok(())
}

/// Tests status filtering and page size.
///
/// Expected: only completed bookings counted, page limited to per_page
#[tokio::test]
async fn filters_by_status_and_paginates() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_house_owner(db).await?;
    let service = factory::create_service(db).await?;
    for _ in 0..3 {
        BookingFactory::new(db, owner.id, service.id)
            .status("completed")
            .build()
            .await?;
    }
    BookingFactory::new(db, owner.id, service.id).build().await?;

    let repo = BookingRepository::new(db);
    let (page, total) = repo
        .get_paginated(BookingScope::All, Some(BookingStatus::Completed), 0, 2)
        .await?;

    assert_eq!(total, 3);
    assert_eq!(page.len(), 2);
    assert!(page.iter().all(|b| b.booking.status == "completed"));

    Ok(())
}
