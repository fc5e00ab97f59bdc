pub use sea_orm_migration::prelude::*;

mod m20260901_000001_create_user_table;
mod m20260901_000002_create_user_address_table;
mod m20260901_000003_create_service_offering_table;
mod m20260901_000004_create_inventory_item_table;
mod m20260902_000005_create_booking_table;
mod m20260902_000006_create_booking_item_table;
mod m20260902_000007_create_feedback_table;
mod m20260903_000008_create_notification_table;
mod m20260903_000009_create_announcement_table;
mod m20260903_000010_create_announcement_read_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260901_000001_create_user_table::Migration),
            Box::new(m20260901_000002_create_user_address_table::Migration),
            Box::new(m20260901_000003_create_service_offering_table::Migration),
            Box::new(m20260901_000004_create_inventory_item_table::Migration),
            Box::new(m20260902_000005_create_booking_table::Migration),
            Box::new(m20260902_000006_create_booking_item_table::Migration),
            Box::new(m20260902_000007_create_feedback_table::Migration),
            Box::new(m20260903_000008_create_notification_table::Migration),
            Box::new(m20260903_000009_create_announcement_table::Migration),
            Box::new(m20260903_000010_create_announcement_read_table::Migration),
        ]
    }
}
