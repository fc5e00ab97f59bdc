use sea_orm_migration::{prelude::*, schema::*};

use super::m20260901_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Announcement::Table)
                    .if_not_exists()
                    .col(pk_auto(Announcement::Id))
                    .col(string(Announcement::Title))
                    .col(text(Announcement::Content))
                    .col(string(Announcement::Audience).default("all"))
                    .col(string(Announcement::Priority).default("normal"))
                    .col(timestamp_null(Announcement::StartsAt))
                    .col(timestamp_null(Announcement::EndsAt))
                    .col(boolean(Announcement::IsActive).default(true))
                    .col(integer(Announcement::CreatedBy))
                    .col(
                        timestamp(Announcement::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(Announcement::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_announcement_created_by")
                            .from(Announcement::Table, Announcement::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Announcement::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Announcement {
    Table,
    Id,
    Title,
    Content,
    Audience,
    Priority,
    StartsAt,
    EndsAt,
    IsActive,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
