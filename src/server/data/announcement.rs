use chrono::Utc;
use migration::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashSet;

use crate::server::model::announcement::{CreateAnnouncementParams, UpdateAnnouncementParams};

pub struct AnnouncementRepository<'a, C = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AnnouncementRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: CreateAnnouncementParams,
    ) -> Result<entity::announcement::Model, DbErr> {
        let now = Utc::now();
        entity::announcement::ActiveModel {
            title: ActiveValue::Set(params.title),
            content: ActiveValue::Set(params.content),
            audience: ActiveValue::Set(params.audience.as_str().to_string()),
            priority: ActiveValue::Set(params.priority.as_str().to_string()),
            starts_at: ActiveValue::Set(params.starts_at),
            ends_at: ActiveValue::Set(params.ends_at),
            is_active: ActiveValue::Set(true),
            created_by: ActiveValue::Set(params.created_by),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::announcement::Model>, DbErr> {
        entity::prelude::Announcement::find_by_id(id)
            .one(self.db)
            .await
    }

    /// Applies the provided fields; returns `None` when the announcement does not exist.
    pub async fn update(
        &self,
        id: i32,
        params: UpdateAnnouncementParams,
    ) -> Result<Option<entity::announcement::Model>, DbErr> {
        let Some(announcement) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active_model: entity::announcement::ActiveModel = announcement.into();
        if let Some(title) = params.title {
            active_model.title = ActiveValue::Set(title);
        }
        if let Some(content) = params.content {
            active_model.content = ActiveValue::Set(content);
        }
        if let Some(audience) = params.audience {
            active_model.audience = ActiveValue::Set(audience.as_str().to_string());
        }
        if let Some(priority) = params.priority {
            active_model.priority = ActiveValue::Set(priority.as_str().to_string());
        }
        if let Some(starts_at) = params.starts_at {
            active_model.starts_at = ActiveValue::Set(starts_at);
        }
        if let Some(ends_at) = params.ends_at {
            active_model.ends_at = ActiveValue::Set(ends_at);
        }
        if let Some(is_active) = params.is_active {
            active_model.is_active = ActiveValue::Set(is_active);
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(active_model.update(self.db).await?))
    }

    /// Deletes an announcement together with its read receipts.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        entity::prelude::AnnouncementRead::delete_many()
            .filter(entity::announcement_read::Column::AnnouncementId.eq(id))
            .exec(self.db)
            .await?;

        let result = entity::prelude::Announcement::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Every announcement, newest first.
    pub async fn get_all(&self) -> Result<Vec<entity::announcement::Model>, DbErr> {
        entity::prelude::Announcement::find()
            .order_by_desc(entity::announcement::Column::CreatedAt)
            .order_by_desc(entity::announcement::Column::Id)
            .all(self.db)
            .await
    }

    /// Active announcements for any of the given audiences, newest first.
    ///
    /// Date windows are checked by the caller.
    pub async fn get_active_for_audiences(
        &self,
        audiences: Vec<&'static str>,
    ) -> Result<Vec<entity::announcement::Model>, DbErr> {
        entity::prelude::Announcement::find()
            .filter(entity::announcement::Column::IsActive.eq(true))
            .filter(entity::announcement::Column::Audience.is_in(audiences))
            .order_by_desc(entity::announcement::Column::CreatedAt)
            .order_by_desc(entity::announcement::Column::Id)
            .all(self.db)
            .await
    }

    /// Ids among `announcement_ids` the user has read.
    pub async fn read_ids_for_user(
        &self,
        user_id: i32,
        announcement_ids: Vec<i32>,
    ) -> Result<HashSet<i32>, DbErr> {
        if announcement_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let ids: Vec<i32> = entity::prelude::AnnouncementRead::find()
            .select_only()
            .column(entity::announcement_read::Column::AnnouncementId)
            .filter(entity::announcement_read::Column::UserId.eq(user_id))
            .filter(entity::announcement_read::Column::AnnouncementId.is_in(announcement_ids))
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(ids.into_iter().collect())
    }

    /// Records a read receipt; repeated calls keep the first receipt.
    pub async fn mark_read(&self, announcement_id: i32, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::AnnouncementRead::insert(entity::announcement_read::ActiveModel {
            announcement_id: ActiveValue::Set(announcement_id),
            user_id: ActiveValue::Set(user_id),
            read_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([
                entity::announcement_read::Column::AnnouncementId,
                entity::announcement_read::Column::UserId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .do_nothing()
        .exec(self.db)
        .await?;

        Ok(())
    }
}
