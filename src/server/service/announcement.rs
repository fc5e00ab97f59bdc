//! Announcement service.
//!
//! Admins broadcast markdown announcements to an audience. Users see live announcements
//! for their role together with their own read receipts; new live announcements are
//! pushed over the real-time channel.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::announcement::AnnouncementRepository,
    error::AppError,
    model::{
        announcement::{
            Announcement, Audience, CreateAnnouncementParams, UpdateAnnouncementParams,
        },
        user::{Role, User},
    },
    service::realtime::{RealtimeEvent, RealtimeHub, Target},
};

pub struct AnnouncementService<'a> {
    db: &'a DatabaseConnection,
    realtime: &'a RealtimeHub,
}

impl<'a> AnnouncementService<'a> {
    pub fn new(db: &'a DatabaseConnection, realtime: &'a RealtimeHub) -> Self {
        Self { db, realtime }
    }

    /// Live announcements addressed to the user's role, newest first, each flagged with
    /// whether the user has read it.
    pub async fn get_for_user(
        &self,
        user: &User,
        now: DateTime<Utc>,
    ) -> Result<Vec<Announcement>, AppError> {
        let repo = AnnouncementRepository::new(self.db);

        let mut announcements = repo
            .get_active_for_audiences(Audience::visible_to(user.role))
            .await?
            .into_iter()
            .map(|a| Announcement::from_entity(a, false))
            .collect::<Result<Vec<_>, _>>()?;
        announcements.retain(|a| a.is_live(now));

        let read = repo
            .read_ids_for_user(user.id, announcements.iter().map(|a| a.id).collect())
            .await?;
        for announcement in &mut announcements {
            announcement.is_read = read.contains(&announcement.id);
        }

        Ok(announcements)
    }

    pub async fn get_all(&self) -> Result<Vec<Announcement>, AppError> {
        AnnouncementRepository::new(self.db)
            .get_all()
            .await?
            .into_iter()
            .map(|a| Announcement::from_entity(a, false))
            .collect()
    }

    /// Creates an announcement and pushes it to connected users if it is already live.
    ///
    /// # Returns
    /// - `Ok(Announcement)` - Created announcement
    /// - `Err(AppError::BadRequest)` - Missing title or content, or end before start
    pub async fn create(
        &self,
        params: CreateAnnouncementParams,
    ) -> Result<Announcement, AppError> {
        if params.title.is_empty() || params.content.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Title and content are required".to_string(),
            ));
        }
        validate_window(params.starts_at, params.ends_at)?;

        let model = AnnouncementRepository::new(self.db).create(params).await?;
        let announcement = Announcement::from_entity(model, false)?;

        tracing::info!(
            announcement_id = announcement.id,
            audience = announcement.audience.as_str(),
            "Announcement created"
        );

        if announcement.is_live(Utc::now()) {
            let target = match announcement.audience {
                Audience::All => Target::All,
                Audience::Technicians => Target::Role(Role::Technician),
                Audience::HouseOwners => Target::Role(Role::HouseOwner),
            };
            self.realtime.publish(RealtimeEvent::new(
                target,
                "announcement",
                announcement.clone().into_dto(),
            ));
        }

        Ok(announcement)
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateAnnouncementParams,
    ) -> Result<Announcement, AppError> {
        if params.title.as_deref().is_some_and(str::is_empty)
            || params.content.as_deref().is_some_and(|c| c.trim().is_empty())
        {
            return Err(AppError::BadRequest(
                "Title and content cannot be empty".to_string(),
            ));
        }

        let repo = AnnouncementRepository::new(self.db);
        let existing = repo.find_by_id(id).await?.ok_or_else(announcement_not_found)?;
        validate_window(
            params.starts_at.unwrap_or(existing.starts_at),
            params.ends_at.unwrap_or(existing.ends_at),
        )?;

        let model = repo
            .update(id, params)
            .await?
            .ok_or_else(announcement_not_found)?;

        Announcement::from_entity(model, false)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !AnnouncementRepository::new(self.db).delete(id).await? {
            return Err(announcement_not_found());
        }

        tracing::info!(announcement_id = id, "Announcement deleted");

        Ok(())
    }

    /// Records that the user read an announcement addressed to them. Idempotent.
    pub async fn mark_read(&self, id: i32, user: &User) -> Result<(), AppError> {
        let repo = AnnouncementRepository::new(self.db);
        let model = repo.find_by_id(id).await?.ok_or_else(announcement_not_found)?;
        let announcement = Announcement::from_entity(model, false)?;
        if !announcement.audience.includes(user.role) {
            return Err(announcement_not_found());
        }

        repo.mark_read(id, user.id).await?;

        Ok(())
    }
}

fn validate_window(
    starts_at: Option<DateTime<Utc>>,
    ends_at: Option<DateTime<Utc>>,
) -> Result<(), AppError> {
    if let (Some(start), Some(end)) = (starts_at, ends_at) {
        if end <= start {
            return Err(AppError::BadRequest(
                "End date must be after start date".to_string(),
            ));
        }
    }
    Ok(())
}

fn announcement_not_found() -> AppError {
    AppError::NotFound("Announcement not found".to_string())
}
