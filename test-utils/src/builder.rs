use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, Notification};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Notification)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables should be added in dependency order (tables with foreign
    /// keys after the tables they reference).
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity implementing `EntityTrait` to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the user tables (users and their addresses).
    pub fn with_user_tables(self) -> Self {
        self.with_table(User).with_table(UserAddress)
    }

    /// Adds every table a booking touches.
    ///
    /// This convenience method adds, in dependency order:
    /// - User, UserAddress
    /// - ServiceOffering
    /// - InventoryItem
    /// - Booking, BookingItem
    /// - Feedback
    /// - Notification
    ///
    /// Booking lifecycle operations write notifications and auto-generated feedback,
    /// so tests covering them need the full set.
    pub fn with_booking_tables(self) -> Self {
        self.with_user_tables()
            .with_table(ServiceOffering)
            .with_table(InventoryItem)
            .with_table(Booking)
            .with_table(BookingItem)
            .with_table(Feedback)
            .with_table(Notification)
    }

    /// Adds the announcement tables on top of the user tables.
    pub fn with_announcement_tables(self) -> Self {
        self.with_user_tables()
            .with_table(Announcement)
            .with_table(AnnouncementRead)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// Creates an in-memory SQLite database connection and executes all CREATE TABLE
    /// statements that were added via `with_table()`.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}
