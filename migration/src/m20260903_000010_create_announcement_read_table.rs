use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260901_000001_create_user_table::User,
    m20260903_000009_create_announcement_table::Announcement,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AnnouncementRead::Table)
                    .if_not_exists()
                    .col(integer(AnnouncementRead::AnnouncementId))
                    .col(integer(AnnouncementRead::UserId))
                    .col(
                        timestamp(AnnouncementRead::ReadAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(AnnouncementRead::AnnouncementId)
                            .col(AnnouncementRead::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_announcement_read_announcement_id")
                            .from(AnnouncementRead::Table, AnnouncementRead::AnnouncementId)
                            .to(Announcement::Table, Announcement::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_announcement_read_user_id")
                            .from(AnnouncementRead::Table, AnnouncementRead::UserId)
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
            .drop_table(Table::drop().table(AnnouncementRead::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AnnouncementRead {
    Table,
    AnnouncementId,
    UserId,
    ReadAt,
}
