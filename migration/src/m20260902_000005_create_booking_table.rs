use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260901_000001_create_user_table::User,
    m20260901_000003_create_service_offering_table::ServiceOffering,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(pk_auto(Booking::Id))
                    .col(integer(Booking::HouseOwnerId))
                    .col(integer(Booking::ServiceId))
                    .col(integer_null(Booking::TechnicianId))
                    .col(date(Booking::ScheduledDate))
                    .col(time(Booking::ScheduledTime))
                    .col(string(Booking::Address))
                    .col(text_null(Booking::Notes))
                    .col(string(Booking::Status).default("pending"))
                    .col(string(Booking::InventoryStatus).default("none"))
                    .col(double(Booking::TotalAmount))
                    .col(string(Booking::PaymentStatus).default("pending"))
                    .col(string_null(Booking::PaymentIntentId))
                    .col(timestamp_null(Booking::PaidAt))
                    .col(text_null(Booking::CancellationReason))
                    .col(boolean(Booking::ReminderSent).default(false))
                    .col(timestamp_null(Booking::AcceptedAt))
                    .col(timestamp_null(Booking::StartedAt))
                    .col(timestamp_null(Booking::CompletedAt))
                    .col(timestamp_null(Booking::RejectedAt))
                    .col(timestamp_null(Booking::CancelledAt))
                    .col(
                        timestamp(Booking::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(Booking::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_house_owner_id")
                            .from(Booking::Table, Booking::HouseOwnerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_technician_id")
                            .from(Booking::Table, Booking::TechnicianId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_service_id")
                            .from(Booking::Table, Booking::ServiceId)
                            .to(ServiceOffering::Table, ServiceOffering::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_status")
                    .table(Booking::Table)
                    .col(Booking::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Booking {
    Table,
    Id,
    HouseOwnerId,
    ServiceId,
    TechnicianId,
    ScheduledDate,
    ScheduledTime,
    Address,
    Notes,
    Status,
    InventoryStatus,
    TotalAmount,
    PaymentStatus,
    PaymentIntentId,
    PaidAt,
    CancellationReason,
    ReminderSent,
    AcceptedAt,
    StartedAt,
    CompletedAt,
    RejectedAt,
    CancelledAt,
    CreatedAt,
    UpdatedAt,
}
