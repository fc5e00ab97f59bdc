//! Domain models and operation parameter types.
//!
//! Repositories return SeaORM entity models; services convert them into the domain types
//! defined here (parsing stored strings into enums) and controllers convert domain types
//! into DTOs for the wire. Parameter structs carry validated input from controllers into
//! services.

pub mod announcement;
pub mod booking;
pub mod feedback;
pub mod inventory;
pub mod notification;
pub mod payment;
pub mod service_offering;
pub mod user;

use std::str::FromStr;

use crate::server::error::{internal::InternalError, AppError};

/// Parses an enumerated value read back from the database.
///
/// Stored values are written by the application, so a failure indicates corrupt data
/// and surfaces as an internal error rather than a client error.
pub(crate) fn parse_stored<T: FromStr>(kind: &'static str, value: &str) -> Result<T, AppError> {
    value.parse::<T>().map_err(|_| {
        InternalError::InvalidStoredValue {
            kind,
            value: value.to_string(),
        }
        .into()
    })
}

/// Computes the number of pages for a paginated listing.
pub(crate) fn total_pages(total: u64, per_page: u64) -> u64 {
    if per_page > 0 {
        (total as f64 / per_page as f64).ceil() as u64
    } else {
        0
    }
}

/// Error returned when a client supplies an unknown enumerated value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl From<UnknownVariant> for AppError {
    fn from(err: UnknownVariant) -> Self {
        AppError::BadRequest(format!("Invalid {}: '{}'", err.kind, err.value))
    }
}

#[cfg(test)]
mod test;
