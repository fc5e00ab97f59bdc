use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceOffering::Table)
                    .if_not_exists()
                    .col(pk_auto(ServiceOffering::Id))
                    .col(string(ServiceOffering::Name))
                    .col(text(ServiceOffering::Description))
                    .col(string(ServiceOffering::Category))
                    .col(double(ServiceOffering::Price))
                    .col(integer(ServiceOffering::DurationMinutes))
                    .col(boolean(ServiceOffering::IsActive).default(true))
                    .col(
                        timestamp(ServiceOffering::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(ServiceOffering::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServiceOffering::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ServiceOffering {
    Table,
    Id,
    Name,
    Description,
    Category,
    Price,
    DurationMinutes,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
