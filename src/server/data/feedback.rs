use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::feedback::{CreateFeedbackParams, FeedbackStatus};

pub struct FeedbackRepository<'a, C = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> FeedbackRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts feedback for a booking.
    ///
    /// `booking_id` is unique; a second insert for the same booking fails with a
    /// unique constraint violation.
    pub async fn create(
        &self,
        params: CreateFeedbackParams,
    ) -> Result<entity::feedback::Model, DbErr> {
        let now = Utc::now();
        entity::feedback::ActiveModel {
            booking_id: ActiveValue::Set(params.booking_id),
            house_owner_id: ActiveValue::Set(params.house_owner_id),
            technician_id: ActiveValue::Set(params.technician_id),
            service_id: ActiveValue::Set(params.service_id),
            rating: ActiveValue::Set(params.rating),
            quality_rating: ActiveValue::Set(params.categories.quality),
            punctuality_rating: ActiveValue::Set(params.categories.punctuality),
            professionalism_rating: ActiveValue::Set(params.categories.professionalism),
            value_rating: ActiveValue::Set(params.categories.value),
            comment: ActiveValue::Set(params.comment),
            is_auto_generated: ActiveValue::Set(params.is_auto_generated),
            status: ActiveValue::Set(params.status.as_str().to_string()),
            admin_response: ActiveValue::Set(None),
            responded_by: ActiveValue::Set(None),
            responded_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Overwrites the auto-generated feedback of a booking with owner-submitted feedback.
    ///
    /// # Returns
    /// - `Ok(true)` - Auto-generated feedback replaced
    /// - `Ok(false)` - No feedback for the booking, or it was written by the owner
    pub async fn replace_auto_generated(&self, params: CreateFeedbackParams) -> Result<bool, DbErr> {
        let result = entity::prelude::Feedback::update_many()
            .col_expr(entity::feedback::Column::Rating, Expr::value(params.rating))
            .col_expr(
                entity::feedback::Column::QualityRating,
                Expr::value(params.categories.quality),
            )
            .col_expr(
                entity::feedback::Column::PunctualityRating,
                Expr::value(params.categories.punctuality),
            )
            .col_expr(
                entity::feedback::Column::ProfessionalismRating,
                Expr::value(params.categories.professionalism),
            )
            .col_expr(
                entity::feedback::Column::ValueRating,
                Expr::value(params.categories.value),
            )
            .col_expr(entity::feedback::Column::Comment, Expr::value(params.comment))
            .col_expr(entity::feedback::Column::IsAutoGenerated, Expr::value(false))
            .col_expr(
                entity::feedback::Column::Status,
                Expr::value(params.status.as_str()),
            )
            .col_expr(entity::feedback::Column::CreatedAt, Expr::value(Utc::now()))
            .col_expr(entity::feedback::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::feedback::Column::BookingId.eq(params.booking_id))
            .filter(entity::feedback::Column::IsAutoGenerated.eq(true))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::feedback::Model>, DbErr> {
        entity::prelude::Feedback::find_by_id(id).one(self.db).await
    }

    pub async fn find_by_booking(
        &self,
        booking_id: i32,
    ) -> Result<Option<entity::feedback::Model>, DbErr> {
        entity::prelude::Feedback::find()
            .filter(entity::feedback::Column::BookingId.eq(booking_id))
            .one(self.db)
            .await
    }

    pub async fn exists_for_booking(&self, booking_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Feedback::find()
            .filter(entity::feedback::Column::BookingId.eq(booking_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets feedback newest first, optionally filtered by moderation status.
    pub async fn get_paginated(
        &self,
        status: Option<FeedbackStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<entity::feedback::Model>, u64), DbErr> {
        let mut query = entity::prelude::Feedback::find();
        if let Some(status) = status {
            query = query.filter(entity::feedback::Column::Status.eq(status.as_str()));
        }

        let paginator = query
            .order_by_desc(entity::feedback::Column::CreatedAt)
            .order_by_desc(entity::feedback::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let feedback = paginator.fetch_page(page).await?;

        Ok((feedback, total))
    }

    /// All published feedback for a technician, newest first.
    pub async fn get_published_by_technician(
        &self,
        technician_id: i32,
    ) -> Result<Vec<entity::feedback::Model>, DbErr> {
        entity::prelude::Feedback::find()
            .filter(entity::feedback::Column::TechnicianId.eq(technician_id))
            .filter(entity::feedback::Column::Status.eq(FeedbackStatus::Published.as_str()))
            .order_by_desc(entity::feedback::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Stores or replaces the admin response.
    pub async fn respond(
        &self,
        id: i32,
        message: String,
        admin_id: i32,
    ) -> Result<bool, DbErr> {
        let now = Utc::now();
        let result = entity::prelude::Feedback::update_many()
            .col_expr(
                entity::feedback::Column::AdminResponse,
                Expr::value(Some(message)),
            )
            .col_expr(
                entity::feedback::Column::RespondedBy,
                Expr::value(Some(admin_id)),
            )
            .col_expr(entity::feedback::Column::RespondedAt, Expr::value(Some(now)))
            .col_expr(entity::feedback::Column::UpdatedAt, Expr::value(now))
            .filter(entity::feedback::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn set_status(&self, id: i32, status: FeedbackStatus) -> Result<bool, DbErr> {
        let result = entity::prelude::Feedback::update_many()
            .col_expr(entity::feedback::Column::Status, Expr::value(status.as_str()))
            .col_expr(entity::feedback::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::feedback::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
