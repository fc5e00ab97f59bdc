//! Request and response DTOs shared by the HTTP API.
//!
//! These types define the JSON wire format. Server-side domain models convert into and
//! out of them at the controller boundary.

pub mod announcement;
pub mod api;
pub mod auth;
pub mod booking;
pub mod feedback;
pub mod inventory;
pub mod notification;
pub mod payment;
pub mod service_offering;
pub mod user;
