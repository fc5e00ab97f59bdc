use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::notification::CreateNotificationParams;

pub struct NotificationRepository<'a, C = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NotificationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: CreateNotificationParams,
    ) -> Result<entity::notification::Model, DbErr> {
        entity::notification::ActiveModel {
            recipient_id: ActiveValue::Set(params.recipient_id),
            kind: ActiveValue::Set(params.kind.as_str().to_string()),
            title: ActiveValue::Set(params.title),
            message: ActiveValue::Set(params.message),
            booking_id: ActiveValue::Set(params.booking_id),
            is_read: ActiveValue::Set(false),
            read_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Gets a user's notifications newest first.
    pub async fn get_paginated(
        &self,
        recipient_id: i32,
        unread_only: bool,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<entity::notification::Model>, u64), DbErr> {
        let mut query = entity::prelude::Notification::find()
            .filter(entity::notification::Column::RecipientId.eq(recipient_id));
        if unread_only {
            query = query.filter(entity::notification::Column::IsRead.eq(false));
        }

        let paginator = query
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_desc(entity::notification::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let notifications = paginator.fetch_page(page).await?;

        Ok((notifications, total))
    }

    pub async fn unread_count(&self, recipient_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::RecipientId.eq(recipient_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .count(self.db)
            .await
    }

    /// Marks one of the recipient's notifications read.
    ///
    /// Already-read notifications keep their original `read_at`.
    ///
    /// # Returns
    /// - `Ok(Some(model))` - The notification after the update
    /// - `Ok(None)` - No such notification for this recipient
    pub async fn mark_read(
        &self,
        id: i32,
        recipient_id: i32,
    ) -> Result<Option<entity::notification::Model>, DbErr> {
        entity::prelude::Notification::update_many()
            .col_expr(entity::notification::Column::IsRead, Expr::value(true))
            .col_expr(
                entity::notification::Column::ReadAt,
                Expr::value(Some(Utc::now())),
            )
            .filter(entity::notification::Column::Id.eq(id))
            .filter(entity::notification::Column::RecipientId.eq(recipient_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .exec(self.db)
            .await?;

        entity::prelude::Notification::find_by_id(id)
            .filter(entity::notification::Column::RecipientId.eq(recipient_id))
            .one(self.db)
            .await
    }

    /// Marks every unread notification of the recipient read.
    ///
    /// # Returns
    /// - `Ok(count)` - Number of notifications changed
    pub async fn mark_all_read(&self, recipient_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .col_expr(entity::notification::Column::IsRead, Expr::value(true))
            .col_expr(
                entity::notification::Column::ReadAt,
                Expr::value(Some(Utc::now())),
            )
            .filter(entity::notification::Column::RecipientId.eq(recipient_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes a notification if it belongs to the recipient.
    pub async fn delete(&self, id: i32, recipient_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Notification::delete_many()
            .filter(entity::notification::Column::Id.eq(id))
            .filter(entity::notification::Column::RecipientId.eq(recipient_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
