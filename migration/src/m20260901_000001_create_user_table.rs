use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string(User::Name))
                    .col(string_uniq(User::Email))
                    .col(string_null(User::Phone))
                    .col(string_null(User::PasswordHash))
                    .col(string_null(User::GoogleId).unique_key())
                    .col(string(User::Role))
                    .col(string_null(User::Specialization))
                    .col(boolean(User::IsActive).default(true))
                    .col(boolean(User::IsVerified).default(false))
                    .col(string_null(User::VerificationCode))
                    .col(timestamp_null(User::VerificationExpiresAt))
                    .col(string_null(User::ResetCode))
                    .col(timestamp_null(User::ResetExpiresAt))
                    .col(
                        timestamp(User::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(User::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_role")
                    .table(User::Table)
                    .col(User::Role)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    Name,
    Email,
    Phone,
    PasswordHash,
    GoogleId,
    Role,
    Specialization,
    IsActive,
    IsVerified,
    VerificationCode,
    VerificationExpiresAt,
    ResetCode,
    ResetExpiresAt,
    CreatedAt,
    UpdatedAt,
}
