//! Create `room` table.
//! Status is stored as its string name; `is_available` mirrors `status = 'Available'`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Room::Table)
                    .if_not_exists()
                    .col(pk_auto(Room::Id))
                    .col(string_len(Room::Name, 100).not_null())
                    .col(integer(Room::Size).not_null())
                    .col(boolean(Room::IsAvailable).not_null())
                    .col(string_len(Room::Status, 20).not_null())
                    .col(text_null(Room::AdditionalDetails))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Room::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Room {
    Table,
    Id,
    Name,
    Size,
    IsAvailable,
    Status,
    AdditionalDetails,
}
