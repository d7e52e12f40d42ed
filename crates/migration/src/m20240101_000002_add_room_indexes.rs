//! Index backing the `size` + `isAvailable` list filters.
use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_room::Room;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_room_availability_size")
                    .table(Room::Table)
                    .col(Room::IsAvailable)
                    .col(Room::Size)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_room_availability_size").table(Room::Table).to_owned())
            .await
    }
}
