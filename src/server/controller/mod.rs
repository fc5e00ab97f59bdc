//! HTTP handlers grouped by resource.
//!
//! Handlers authenticate through [`AuthGuard`](crate::server::middleware::auth::AuthGuard),
//! convert request DTOs into domain parameters, call a service and convert the result
//! back into a response DTO.

use serde::Deserialize;

pub mod announcement;
pub mod auth;
pub mod booking;
pub mod feedback;
pub mod inventory;
pub mod notification;
pub mod payment;
pub mod service_offering;
pub mod user;
pub mod ws;

const MAX_ENTRIES: u64 = 100;
const MAX_PAGE: u64 = 100_000;

/// Query parameters shared by paginated listings.
///
/// Read through [`page`](Self::page) and [`entries`](Self::entries), which clamp the raw
/// values into the range the paginator accepts.
#[derive(Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    page: u64,
    #[serde(default = "default_entries")]
    entries: u64,
}

impl PaginationParams {
    /// Zero-based page index, capped at `MAX_PAGE`.
    pub fn page(&self) -> u64 {
        self.page.min(MAX_PAGE)
    }

    /// Page size between 1 and `MAX_ENTRIES`.
    pub fn entries(&self) -> u64 {
        self.entries.clamp(1, MAX_ENTRIES)
    }
}

fn default_entries() -> u64 {
    10
}

#[cfg(test)]
mod test;
