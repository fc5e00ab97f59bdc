pub use super::announcement::Entity as Announcement;
pub use super::announcement_read::Entity as AnnouncementRead;
pub use super::booking::Entity as Booking;
pub use super::booking_item::Entity as BookingItem;
pub use super::feedback::Entity as Feedback;
pub use super::inventory_item::Entity as InventoryItem;
pub use super::notification::Entity as Notification;
pub use super::service_offering::Entity as ServiceOffering;
pub use super::user::Entity as User;
pub use super::user_address::Entity as UserAddress;
