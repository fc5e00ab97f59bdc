//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing user records in the database.
//! It handles account creation, credential and code updates, role and status management,
//! and paginated listing.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::user::{CreateUserParams, Role, UpdateProfileParams};

/// Repository providing database operations for user management.
pub struct UserRepository<'a, C = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection or open transaction
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new user.
    ///
    /// # Returns
    /// - `Ok(Model)` - The created user
    /// - `Err(DbErr)` - Database error, including unique violations on email or Google id
    pub async fn create(&self, params: CreateUserParams) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now();
        entity::user::ActiveModel {
            name: ActiveValue::Set(params.name),
            email: ActiveValue::Set(params.email),
            phone: ActiveValue::Set(params.phone),
            password_hash: ActiveValue::Set(params.password_hash),
            google_id: ActiveValue::Set(params.google_id),
            role: ActiveValue::Set(params.role.as_str().to_string()),
            specialization: ActiveValue::Set(params.specialization),
            is_active: ActiveValue::Set(true),
            is_verified: ActiveValue::Set(params.is_verified),
            verification_code: ActiveValue::Set(None),
            verification_expires_at: ActiveValue::Set(None),
            reset_code: ActiveValue::Set(None),
            reset_expires_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(id).one(self.db).await
    }

    /// Finds a user by email. The caller is expected to pass a normalised address.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    pub async fn find_by_google_id(
        &self,
        google_id: &str,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::GoogleId.eq(google_id))
            .one(self.db)
            .await
    }

    /// Gets users ordered by newest first, optionally filtered by role.
    ///
    /// # Returns
    /// - `Ok((users, total))` - The requested page and the total matching count
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_all_paginated(
        &self,
        role: Option<Role>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<entity::user::Model>, u64), DbErr> {
        let mut query = entity::prelude::User::find();
        if let Some(role) = role {
            query = query.filter(entity::user::Column::Role.eq(role.as_str()));
        }

        let paginator = query
            .order_by_desc(entity::user::Column::CreatedAt)
            .order_by_desc(entity::user::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let users = paginator.fetch_page(page).await?;

        Ok((users, total))
    }

    /// Gets active users with the given role, ordered by name.
    pub async fn get_active_by_role(&self, role: Role) -> Result<Vec<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Role.eq(role.as_str()))
            .filter(entity::user::Column::IsActive.eq(true))
            .order_by_asc(entity::user::Column::Name)
            .all(self.db)
            .await
    }

    pub async fn update_profile(
        &self,
        id: i32,
        params: UpdateProfileParams,
    ) -> Result<entity::user::Model, DbErr> {
        let mut active_model = self.active_model(id).await?;

        if let Some(name) = params.name {
            active_model.name = ActiveValue::Set(name);
        }
        if let Some(phone) = params.phone {
            active_model.phone = ActiveValue::Set(Some(phone));
        }
        if let Some(specialization) = params.specialization {
            active_model.specialization = ActiveValue::Set(Some(specialization));
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        active_model.update(self.db).await
    }

    pub async fn set_active(&self, id: i32, is_active: bool) -> Result<entity::user::Model, DbErr> {
        let mut active_model = self.active_model(id).await?;
        active_model.is_active = ActiveValue::Set(is_active);
        active_model.updated_at = ActiveValue::Set(Utc::now());
        active_model.update(self.db).await
    }

    pub async fn set_role(&self, id: i32, role: Role) -> Result<entity::user::Model, DbErr> {
        let mut active_model = self.active_model(id).await?;
        active_model.role = ActiveValue::Set(role.as_str().to_string());
        active_model.updated_at = ActiveValue::Set(Utc::now());
        active_model.update(self.db).await
    }

    /// Stores a fresh email verification code, replacing any previous one.
    pub async fn set_verification_code(
        &self,
        id: i32,
        code: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        let mut active_model = self.active_model(id).await?;
        active_model.verification_code = ActiveValue::Set(Some(code));
        active_model.verification_expires_at = ActiveValue::Set(Some(expires_at));
        active_model.updated_at = ActiveValue::Set(Utc::now());
        active_model.update(self.db).await?;
        Ok(())
    }

    /// Marks the email verified and clears the verification code.
    pub async fn mark_verified(&self, id: i32) -> Result<entity::user::Model, DbErr> {
        let mut active_model = self.active_model(id).await?;
        active_model.is_verified = ActiveValue::Set(true);
        active_model.verification_code = ActiveValue::Set(None);
        active_model.verification_expires_at = ActiveValue::Set(None);
        active_model.updated_at = ActiveValue::Set(Utc::now());
        active_model.update(self.db).await
    }

    /// Stores a password reset code, replacing any previous one.
    pub async fn set_reset_code(
        &self,
        id: i32,
        code: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        let mut active_model = self.active_model(id).await?;
        active_model.reset_code = ActiveValue::Set(Some(code));
        active_model.reset_expires_at = ActiveValue::Set(Some(expires_at));
        active_model.updated_at = ActiveValue::Set(Utc::now());
        active_model.update(self.db).await?;
        Ok(())
    }

    /// Replaces the password hash and clears any outstanding reset code.
    pub async fn set_password_hash(&self, id: i32, password_hash: String) -> Result<(), DbErr> {
        let mut active_model = self.active_model(id).await?;
        active_model.password_hash = ActiveValue::Set(Some(password_hash));
        active_model.reset_code = ActiveValue::Set(None);
        active_model.reset_expires_at = ActiveValue::Set(None);
        active_model.updated_at = ActiveValue::Set(Utc::now());
        active_model.update(self.db).await?;
        Ok(())
    }

    /// Links a Google identity to an existing account and marks its email verified.
    pub async fn link_google_id(
        &self,
        id: i32,
        google_id: String,
    ) -> Result<entity::user::Model, DbErr> {
        let mut active_model = self.active_model(id).await?;
        active_model.google_id = ActiveValue::Set(Some(google_id));
        active_model.is_verified = ActiveValue::Set(true);
        active_model.updated_at = ActiveValue::Set(Utc::now());
        active_model.update(self.db).await
    }

    async fn active_model(&self, id: i32) -> Result<entity::user::ActiveModel, DbErr> {
        let user = entity::prelude::User::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!("User with id {} not found", id)))?;

        Ok(user.into())
    }
}
