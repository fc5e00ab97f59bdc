//! Business logic layer.
//!
//! Services sit between controllers and repositories. They validate input, enforce
//! per-role rules, run multi-row writes in transactions, convert entity models into
//! domain models and trigger side effects such as notifications and real-time pushes.
//! Services borrow what they need from `AppState` and are constructed per request.

pub mod announcement;
pub mod auth;
pub mod booking;
pub mod feedback;
pub mod inventory;
pub mod messaging;
pub mod notification;
pub mod oauth;
pub mod password;
pub mod payment;
pub mod realtime;
pub mod service_offering;
pub mod token;
pub mod user;

#[cfg(test)]
mod test;
