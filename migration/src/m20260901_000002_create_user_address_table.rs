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
                    .table(UserAddress::Table)
                    .if_not_exists()
                    .col(pk_auto(UserAddress::Id))
                    .col(integer(UserAddress::UserId))
                    .col(string(UserAddress::Label))
                    .col(string(UserAddress::Street))
                    .col(string(UserAddress::City))
                    .col(string(UserAddress::State))
                    .col(string(UserAddress::PostalCode))
                    .col(boolean(UserAddress::IsDefault).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_address_user_id")
                            .from(UserAddress::Table, UserAddress::UserId)
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
            .drop_table(Table::drop().table(UserAddress::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserAddress {
    Table,
    Id,
    UserId,
    Label,
    Street,
    City,
    State,
    PostalCode,
    IsDefault,
}
