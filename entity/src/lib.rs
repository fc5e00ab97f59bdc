//! SeaORM entity definitions for the ServiceHub schema.
//!
//! Each module mirrors one table created by the `migration` crate. Enumerated values
//! (roles, statuses, notification kinds) are stored as strings and parsed into domain
//! enums at the repository boundary in the server crate.

pub mod prelude;

pub mod announcement;
pub mod announcement_read;
pub mod booking;
pub mod booking_item;
pub mod feedback;
pub mod inventory_item;
pub mod notification;
pub mod service_offering;
pub mod user;
pub mod user_address;
