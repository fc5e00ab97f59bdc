//! User service for business logic.
//!
//! Provides account listing and administration for admins, profile and address
//! management for the signed-in user, and the loader used everywhere a full user
//! (with addresses) is returned.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{address::AddressRepository, user::UserRepository},
    error::AppError,
    model::{
        total_pages,
        user::{CreateAddressParams, PaginatedUsers, Role, UpdateProfileParams, User},
    },
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads a user with their addresses.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that id
    /// - `Err(AppError)` - Database error or corrupt stored role
    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let Some(model) = UserRepository::new(self.db).find_by_id(id).await? else {
            return Ok(None);
        };

        let addresses = AddressRepository::new(self.db).get_by_user(id).await?;

        Ok(Some(User::from_entity(model)?.with_addresses(addresses)))
    }

    /// Same as [`UserService::get_by_id`] but a missing user is a 404.
    pub async fn require_by_id(&self, id: i32) -> Result<User, AppError> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Gets users newest first, optionally filtered by role.
    ///
    /// Addresses are not loaded for list entries.
    pub async fn get_all(
        &self,
        role: Option<Role>,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedUsers, AppError> {
        let (models, total) = UserRepository::new(self.db)
            .get_all_paginated(role, page, per_page)
            .await?;

        let users = models
            .into_iter()
            .map(User::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedUsers {
            users,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }

    /// Active technicians available for assignment, ordered by name.
    pub async fn get_technicians(&self) -> Result<Vec<User>, AppError> {
        UserRepository::new(self.db)
            .get_active_by_role(Role::Technician)
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect()
    }

    /// Updates the caller's own profile fields.
    ///
    /// Specialization only applies to technicians and is ignored for other roles.
    pub async fn update_profile(
        &self,
        user: &User,
        mut params: UpdateProfileParams,
    ) -> Result<User, AppError> {
        if let Some(name) = &params.name {
            if name.trim().is_empty() {
                return Err(AppError::BadRequest("Name cannot be empty".to_string()));
            }
            params.name = Some(name.trim().to_string());
        }
        if user.role != Role::Technician {
            params.specialization = None;
        }

        UserRepository::new(self.db)
            .update_profile(user.id, params)
            .await?;

        self.require_by_id(user.id).await
    }

    /// Activates or deactivates an account. Admins cannot deactivate themselves.
    pub async fn set_active(
        &self,
        actor_id: i32,
        user_id: i32,
        is_active: bool,
    ) -> Result<User, AppError> {
        if actor_id == user_id && !is_active {
            return Err(AppError::BadRequest(
                "You cannot deactivate your own account".to_string(),
            ));
        }
        self.require_by_id(user_id).await?;

        UserRepository::new(self.db)
            .set_active(user_id, is_active)
            .await?;

        tracing::info!(actor_id, user_id, is_active, "User status changed");

        self.require_by_id(user_id).await
    }

    /// Changes an account's role. Admins cannot change their own role.
    pub async fn set_role(&self, actor_id: i32, user_id: i32, role: Role) -> Result<User, AppError> {
        if actor_id == user_id {
            return Err(AppError::BadRequest(
                "You cannot change your own role".to_string(),
            ));
        }
        self.require_by_id(user_id).await?;

        UserRepository::new(self.db).set_role(user_id, role).await?;

        tracing::info!(actor_id, user_id, role = %role, "User role changed");

        self.require_by_id(user_id).await
    }

    pub async fn add_address(
        &self,
        user_id: i32,
        params: CreateAddressParams,
    ) -> Result<User, AppError> {
        let required = [
            ("street", &params.street),
            ("city", &params.city),
            ("state", &params.state),
            ("postal code", &params.postal_code),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(AppError::BadRequest(format!("Address {} is required", field)));
        }

        AddressRepository::new(self.db)
            .create(user_id, params)
            .await?;

        self.require_by_id(user_id).await
    }

    pub async fn delete_address(&self, user_id: i32, address_id: i32) -> Result<User, AppError> {
        let deleted = AddressRepository::new(self.db)
            .delete(user_id, address_id)
            .await?;
        if !deleted {
            return Err(AppError::NotFound("Address not found".to_string()));
        }

        self.require_by_id(user_id).await
    }
}
