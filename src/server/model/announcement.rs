use chrono::{DateTime, Utc};
use std::str::FromStr;

use crate::{
    model::announcement::{AnnouncementDto, CreateAnnouncementDto, UpdateAnnouncementDto},
    server::{
        error::AppError,
        model::{parse_stored, user::Role, UnknownVariant},
        util::markdown::render_markdown,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    All,
    Technicians,
    HouseOwners,
}

impl Audience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::All => "all",
            Audience::Technicians => "technicians",
            Audience::HouseOwners => "house_owners",
        }
    }

    /// Whether a user with `role` should see announcements for this audience.
    ///
    /// Admins see every announcement.
    pub fn includes(&self, role: Role) -> bool {
        match (self, role) {
            (_, Role::Admin) | (Audience::All, _) => true,
            (Audience::Technicians, Role::Technician) => true,
            (Audience::HouseOwners, Role::HouseOwner) => true,
            _ => false,
        }
    }

    /// Stored audience values visible to `role`.
    pub fn visible_to(role: Role) -> Vec<&'static str> {
        [Audience::All, Audience::Technicians, Audience::HouseOwners]
            .into_iter()
            .filter(|a| a.includes(role))
            .map(|a| a.as_str())
            .collect()
    }
}

impl FromStr for Audience {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Audience::All),
            "technicians" => Ok(Audience::Technicians),
            "house_owners" => Ok(Audience::HouseOwners),
            other => Err(UnknownVariant {
                kind: "audience",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Low,
    Normal,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl FromStr for Priority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(UnknownVariant {
                kind: "priority",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Announcement {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub audience: Audience,
    pub priority: Priority,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub is_read: bool,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
}

impl Announcement {
    pub fn from_entity(entity: entity::announcement::Model, is_read: bool) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            title: entity.title,
            content: entity.content,
            audience: parse_stored("audience", &entity.audience)?,
            priority: parse_stored("priority", &entity.priority)?,
            starts_at: entity.starts_at,
            ends_at: entity.ends_at,
            is_active: entity.is_active,
            is_read,
            created_by: entity.created_by,
            created_at: entity.created_at,
        })
    }

    /// Active and inside its optional display window at `now`.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.is_active
            && self.starts_at.is_none_or(|start| start <= now)
            && self.ends_at.is_none_or(|end| end > now)
    }

    pub fn into_dto(self) -> AnnouncementDto {
        AnnouncementDto {
            id: self.id,
            content_html: render_markdown(&self.content),
            title: self.title,
            content: self.content,
            audience: self.audience.as_str().to_string(),
            priority: self.priority.as_str().to_string(),
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            is_active: self.is_active,
            is_read: self.is_read,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateAnnouncementParams {
    pub title: String,
    pub content: String,
    pub audience: Audience,
    pub priority: Priority,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub created_by: i32,
}

impl CreateAnnouncementParams {
    /// Audience defaults to everyone and priority to normal.
    pub fn from_dto(dto: CreateAnnouncementDto, created_by: i32) -> Result<Self, AppError> {
        Ok(Self {
            title: dto.title.trim().to_string(),
            content: dto.content,
            audience: dto
                .audience
                .as_deref()
                .map(str::parse::<Audience>)
                .transpose()?
                .unwrap_or(Audience::All),
            priority: dto
                .priority
                .as_deref()
                .map(str::parse::<Priority>)
                .transpose()?
                .unwrap_or(Priority::Normal),
            starts_at: dto.starts_at,
            ends_at: dto.ends_at,
            created_by,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateAnnouncementParams {
    pub title: Option<String>,
    pub content: Option<String>,
    pub audience: Option<Audience>,
    pub priority: Option<Priority>,
    /// Outer `None` keeps the stored value, `Some(None)` clears it.
    pub starts_at: Option<Option<DateTime<Utc>>>,
    pub ends_at: Option<Option<DateTime<Utc>>>,
    pub is_active: Option<bool>,
}

impl UpdateAnnouncementParams {
    pub fn from_dto(dto: UpdateAnnouncementDto) -> Result<Self, AppError> {
        Ok(Self {
            title: dto.title.map(|t| t.trim().to_string()),
            content: dto.content,
            audience: dto.audience.as_deref().map(str::parse::<Audience>).transpose()?,
            priority: dto.priority.as_deref().map(str::parse::<Priority>).transpose()?,
            starts_at: dto.starts_at,
            ends_at: dto.ends_at,
            is_active: dto.is_active,
        })
    }
}
