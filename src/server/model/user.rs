//! User domain models, roles and parameters.

use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};

use crate::{
    model::{
        auth::RegisterDto,
        user::{AddressDto, CreateAddressDto, PaginatedUsersDto, UpdateProfileDto, UserDto},
    },
    server::{
        error::AppError,
        model::{parse_stored, UnknownVariant},
    },
};

/// Account role controlling which routes a user may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Technician,
    HouseOwner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Technician => "technician",
            Role::HouseOwner => "house_owner",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "technician" => Ok(Role::Technician),
            "house_owner" => Ok(Role::HouseOwner),
            other => Err(UnknownVariant {
                kind: "role",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub id: i32,
    pub label: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub is_default: bool,
}

impl Address {
    pub fn from_entity(entity: entity::user_address::Model) -> Self {
        Self {
            id: entity.id,
            label: entity.label,
            street: entity.street,
            city: entity.city,
            state: entity.state,
            postal_code: entity.postal_code,
            is_default: entity.is_default,
        }
    }

    pub fn into_dto(self) -> AddressDto {
        AddressDto {
            id: self.id,
            label: self.label,
            street: self.street,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
            is_default: self.is_default,
        }
    }
}

/// User without credential material.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub specialization: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub addresses: Vec<Address>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// Addresses are left empty; attach them with [`User::with_addresses`] when needed.
    ///
    /// # Returns
    /// - `Ok(User)` - Successfully converted domain model
    /// - `Err(AppError::InternalErr)` - Stored role is not recognised
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            phone: entity.phone,
            role: parse_stored("role", &entity.role)?,
            specialization: entity.specialization,
            is_active: entity.is_active,
            is_verified: entity.is_verified,
            addresses: Vec::new(),
            created_at: entity.created_at,
        })
    }

    pub fn with_addresses(mut self, addresses: Vec<entity::user_address::Model>) -> Self {
        self.addresses = addresses.into_iter().map(Address::from_entity).collect();
        self
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            role: self.role.as_str().to_string(),
            specialization: self.specialization,
            is_active: self.is_active,
            is_verified: self.is_verified,
            addresses: self.addresses.into_iter().map(Address::into_dto).collect(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaginatedUsers {
    pub users: Vec<User>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedUsers {
    pub fn into_dto(self) -> PaginatedUsersDto {
        PaginatedUsersDto {
            users: self.users.into_iter().map(User::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Parameters for creating a password-based account.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
    pub role: Role,
    pub specialization: Option<String>,
    pub is_verified: bool,
}

/// Validated self-registration input.
#[derive(Debug, Clone)]
pub struct RegisterParams {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub role: Role,
    pub specialization: Option<String>,
}

impl RegisterParams {
    /// Normalises the email and resolves the requested role.
    ///
    /// # Returns
    /// - `Ok(RegisterParams)` - Input accepted
    /// - `Err(AppError::BadRequest)` - Missing name, malformed email, or a role that cannot
    ///   self-register
    pub fn from_dto(dto: RegisterDto) -> Result<Self, AppError> {
        let name = dto.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("Name is required".to_string()));
        }

        let email = normalize_email(&dto.email);
        if !is_plausible_email(&email) {
            return Err(AppError::BadRequest("Invalid email address".to_string()));
        }

        let role = match dto.role.as_deref() {
            None => Role::HouseOwner,
            Some(role) => role.parse::<Role>()?,
        };
        if role == Role::Admin {
            return Err(AppError::BadRequest(
                "Admin accounts cannot be self-registered".to_string(),
            ));
        }

        Ok(Self {
            name,
            email,
            password: dto.password,
            phone: dto.phone.filter(|p| !p.trim().is_empty()),
            role,
            specialization: dto.specialization.filter(|_| role == Role::Technician),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProfileParams {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
}

impl UpdateProfileParams {
    pub fn from_dto(dto: UpdateProfileDto) -> Self {
        Self {
            name: dto.name,
            phone: dto.phone,
            specialization: dto.specialization,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateAddressParams {
    pub label: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub is_default: bool,
}

impl CreateAddressParams {
    pub fn from_dto(dto: CreateAddressDto) -> Self {
        Self {
            label: dto.label.trim().to_string(),
            street: dto.street.trim().to_string(),
            city: dto.city.trim().to_string(),
            state: dto.state.trim().to_string(),
            postal_code: dto.postal_code.trim().to_string(),
            is_default: dto.is_default,
        }
    }
}

/// Normalises an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Cheap shape check: one `@` with text on both sides and a dot in the domain.
pub fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
