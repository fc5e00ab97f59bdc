//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models and are generic over
//! `ConnectionTrait`, so services can run several of them inside one transaction. Services
//! convert the returned entity models into domain models.

pub mod address;
pub mod announcement;
pub mod booking;
pub mod feedback;
pub mod inventory;
pub mod notification;
pub mod service_offering;
pub mod user;

use sea_orm::{DbErr, SqlErr};

/// Whether an insert or update failed on a unique index.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
mod test;
