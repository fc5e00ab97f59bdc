//! Notification service.
//!
//! Writes notification rows and pushes them to the recipient's open sockets. Delivery
//! from other services goes through [`NotificationService::notify`], which never fails
//! the calling operation.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{notification::NotificationRepository, user::UserRepository},
    error::AppError,
    model::{
        notification::{CreateNotificationParams, Notification, PaginatedNotifications},
        total_pages,
        user::Role,
    },
    service::realtime::{RealtimeEvent, RealtimeHub, Target},
};

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
    realtime: &'a RealtimeHub,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection, realtime: &'a RealtimeHub) -> Self {
        Self { db, realtime }
    }

    /// Stores a notification and pushes it over the real-time channel.
    ///
    /// Failures are logged and swallowed.
    pub async fn notify(&self, params: CreateNotificationParams) {
        let recipient_id = params.recipient_id;
        if let Err(e) = self.try_notify(params).await {
            tracing::warn!(recipient_id, "Failed to deliver notification: {}", e);
        }
    }

    /// Sends the same notification to every active admin.
    pub async fn notify_admins(&self, params: CreateNotificationParams) {
        let admins = match UserRepository::new(self.db)
            .get_active_by_role(Role::Admin)
            .await
        {
            Ok(admins) => admins,
            Err(e) => {
                tracing::warn!("Failed to load admins for notification: {}", e);
                return;
            }
        };

        for admin in admins {
            self.notify(CreateNotificationParams {
                recipient_id: admin.id,
                ..params.clone()
            })
            .await;
        }
    }

    async fn try_notify(&self, params: CreateNotificationParams) -> Result<(), AppError> {
        let model = NotificationRepository::new(self.db).create(params).await?;
        let notification = Notification::from_entity(model)?;

        self.realtime.publish(RealtimeEvent::new(
            Target::User(notification.recipient_id),
            "notification",
            notification.into_dto(),
        ));

        Ok(())
    }

    /// Gets a page of the user's notifications, newest first, with the unread total.
    pub async fn get_paginated(
        &self,
        user_id: i32,
        unread_only: bool,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedNotifications, AppError> {
        let repo = NotificationRepository::new(self.db);

        let (models, total) = repo
            .get_paginated(user_id, unread_only, page, per_page)
            .await?;
        let unread = repo.unread_count(user_id).await?;

        let notifications = models
            .into_iter()
            .map(Notification::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedNotifications {
            notifications,
            unread,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }

    pub async fn unread_count(&self, user_id: i32) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db)
            .unread_count(user_id)
            .await?)
    }

    /// Marks one of the user's notifications read. Repeated calls succeed.
    ///
    /// # Returns
    /// - `Ok(Notification)` - The notification, now read
    /// - `Err(AppError::NotFound)` - No such notification for this user
    pub async fn mark_read(&self, id: i32, user_id: i32) -> Result<Notification, AppError> {
        let model = NotificationRepository::new(self.db)
            .mark_read(id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;

        Notification::from_entity(model)
    }

    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db)
            .mark_all_read(user_id)
            .await?)
    }

    pub async fn delete(&self, id: i32, user_id: i32) -> Result<(), AppError> {
        let deleted = NotificationRepository::new(self.db)
            .delete(id, user_id)
            .await?;
        if !deleted {
            return Err(AppError::NotFound("Notification not found".to_string()));
        }
        Ok(())
    }
}
