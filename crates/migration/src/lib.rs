//! Migrator for the room store.
//! Indexes are applied after the table they cover.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_room;
mod m20240101_000002_add_room_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_room::Migration),
            Box::new(m20240101_000002_add_room_indexes::Migration),
        ]
    }
}
