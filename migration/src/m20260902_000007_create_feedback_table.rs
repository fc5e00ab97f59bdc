use sea_orm_migration::{prelude::*, schema::*};

use super::m20260902_000005_create_booking_table::Booking;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(pk_auto(Feedback::Id))
                    // One feedback per booking is a constraint, not a pre-check.
                    .col(integer_uniq(Feedback::BookingId))
                    .col(integer(Feedback::HouseOwnerId))
                    .col(integer_null(Feedback::TechnicianId))
                    .col(integer(Feedback::ServiceId))
                    .col(integer(Feedback::Rating))
                    .col(integer_null(Feedback::QualityRating))
                    .col(integer_null(Feedback::PunctualityRating))
                    .col(integer_null(Feedback::ProfessionalismRating))
                    .col(integer_null(Feedback::ValueRating))
                    .col(text_null(Feedback::Comment))
                    .col(boolean(Feedback::IsAutoGenerated).default(false))
                    .col(string(Feedback::Status).default("pending"))
                    .col(text_null(Feedback::AdminResponse))
                    .col(integer_null(Feedback::RespondedBy))
                    .col(timestamp_null(Feedback::RespondedAt))
                    .col(
                        timestamp(Feedback::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(Feedback::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_booking_id")
                            .from(Feedback::Table, Feedback::BookingId)
                            .to(Booking::Table, Booking::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Feedback {
    Table,
    Id,
    BookingId,
    HouseOwnerId,
    TechnicianId,
    ServiceId,
    Rating,
    QualityRating,
    PunctualityRating,
    ProfessionalismRating,
    ValueRating,
    Comment,
    IsAutoGenerated,
    Status,
    AdminResponse,
    RespondedBy,
    RespondedAt,
    CreatedAt,
    UpdatedAt,
}
