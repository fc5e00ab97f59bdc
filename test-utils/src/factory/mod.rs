//! Factory methods for creating test data.
//!
//! Factories insert rows with sensible defaults so tests only spell out the fields
//! they care about. Each entity has a `*Factory` builder for customization and a
//! `create_*` function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let owner = factory::user::create_house_owner(&db).await?;
//! let service = factory::service_offering::create_service(&db).await?;
//! let booking = factory::booking::create_booking(&db, owner.id, service.id).await?;
//!
//! let (owner, technician, service, booking) =
//!     factory::helpers::create_booking_with_dependencies(&db).await?;
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let item = factory::inventory_item::InventoryItemFactory::new(&db)
//!     .quantity(3)
//!     .reorder_level(5)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create users of any role
//! - `service_offering` - Create catalogue services
//! - `inventory_item` - Create stock items
//! - `booking` - Create bookings
//! - `helpers` - Counters and multi-entity helpers

pub mod booking;
pub mod helpers;
pub mod inventory_item;
pub mod service_offering;
pub mod user;

pub use booking::create_booking;
pub use inventory_item::create_inventory_item;
pub use service_offering::create_service;
pub use user::{create_admin, create_house_owner, create_technician};
