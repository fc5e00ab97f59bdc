//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a pending booking together with its owner, a technician and a service.
///
/// The technician is created but not assigned; tests decide whether to assign it.
///
/// # Returns
/// - `Ok((owner, technician, service, booking))` - All created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_booking_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::user::Model,
        entity::service_offering::Model,
        entity::booking::Model,
    ),
    DbErr,
> {
    let owner = crate::factory::user::create_house_owner(db).await?;
    let technician = crate::factory::user::create_technician(db).await?;
    let service = crate::factory::service_offering::create_service(db).await?;
    let booking = crate::factory::booking::create_booking(db, owner.id, service.id).await?;

    Ok((owner, technician, service, booking))
}
