use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::api::deserialize_nullable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnnouncementDto {
    pub id: i32,
    pub title: String,
    pub content: String,
    /// Markdown content rendered to HTML.
    pub content_html: String,
    pub audience: String,
    pub priority: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAnnouncementDto {
    pub title: String,
    pub content: String,
    pub audience: Option<String>,
    pub priority: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateAnnouncementDto {
    pub title: Option<String>,
    pub content: Option<String>,
    pub audience: Option<String>,
    pub priority: Option<String>,
    /// Omit to keep the current start, `null` to clear it.
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub starts_at: Option<Option<DateTime<Utc>>>,
    /// Omit to keep the current end, `null` to clear it.
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub ends_at: Option<Option<DateTime<Utc>>>,
    pub is_active: Option<bool>,
}
