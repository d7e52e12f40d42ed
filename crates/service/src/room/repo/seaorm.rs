use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::errors::ServiceError;
use crate::room::domain::{NewRoom, Room, RoomFilter};
use crate::room::repository::RoomRepository;
use models::room;

/// SeaORM-backed repository over PostgreSQL or SQLite.
pub struct SeaOrmRoomRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    // Literal, case-sensitive substring test; LIKE would treat % and _ as wildcards
    // and ignores ASCII case on SQLite.
    fn name_contains(&self, needle: &str) -> SimpleExpr {
        match self.db.get_database_backend() {
            DbBackend::Postgres => Expr::cust_with_values("strpos(\"name\", ?) > 0", [needle.to_owned()]),
            _ => Expr::cust_with_values("instr(\"name\", ?) > 0", [needle.to_owned()]),
        }
    }
}

#[async_trait::async_trait]
impl RoomRepository for SeaOrmRoomRepository {
    async fn find_all(&self, filter: &RoomFilter) -> Result<Vec<Room>, ServiceError> {
        let mut finder = room::Entity::find();
        if let Some(name) = filter.name_pattern() { finder = finder.filter(self.name_contains(name)); }
        if let Some(size) = filter.size { finder = finder.filter(room::Column::Size.eq(size)); }
        if let Some(avail) = filter.is_available { finder = finder.filter(room::Column::IsAvailable.eq(avail)); }
        finder
            .order_by_asc(room::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::db)
    }

    async fn find_by_id(&self, id: i32) -> Result<Room, ServiceError> {
        room::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(ServiceError::db)?
            .ok_or_else(|| ServiceError::not_found("room"))
    }

    async fn insert(&self, new_room: NewRoom) -> Result<Room, ServiceError> {
        new_room.into_active_model().insert(&self.db).await.map_err(ServiceError::db)
    }

    async fn update(&self, r: &Room) -> Result<(), ServiceError> {
        match r.to_replacement().update(&self.db).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(ServiceError::not_found("room")),
            Err(e) => Err(ServiceError::db(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use models::room::RoomStatus;

    fn new_room(name: &str, size: i32, status: RoomStatus) -> NewRoom {
        NewRoom { name: name.into(), size, status, additional_details: None }
    }

    #[tokio::test]
    async fn room_crud_repository() -> Result<(), anyhow::Error> {
        let repo = SeaOrmRoomRepository::new(get_db().await?);

        let a = repo.insert(new_room("Room1", 2, RoomStatus::Available)).await?;
        assert!(a.id > 0);
        assert!(a.is_available);

        let found = repo.find_by_id(a.id).await?;
        assert_eq!(found, a);

        let mut changed = found.clone();
        changed.apply_status(RoomStatus::Unavailable, Some("Maintenance".into()));
        repo.update(&changed).await?;
        let after = repo.find_by_id(a.id).await?;
        assert_eq!(after.status, RoomStatus::Unavailable);
        assert!(!after.is_available);
        assert_eq!(after.additional_details.as_deref(), Some("Maintenance"));

        Ok(())
    }

    #[tokio::test]
    async fn missing_rows_surface_not_found() -> Result<(), anyhow::Error> {
        let repo = SeaOrmRoomRepository::new(get_db().await?);
        assert!(matches!(repo.find_by_id(42).await, Err(ServiceError::NotFound(_))));

        let ghost = new_room("Ghost", 1, RoomStatus::Available).into_model(42);
        assert!(matches!(repo.update(&ghost).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn filters_are_conjunctive() -> Result<(), anyhow::Error> {
        let repo = SeaOrmRoomRepository::new(get_db().await?);
        let r1 = repo.insert(new_room("Room1", 2, RoomStatus::Available)).await?;
        let r10 = repo.insert(new_room("Room10", 3, RoomStatus::Available)).await?;
        let _suite = repo.insert(new_room("Suite", 2, RoomStatus::Booked)).await?;
        let r1b = repo.insert(new_room("Room1B", 2, RoomStatus::Cleaning)).await?;

        let by_name = repo.find_all(&RoomFilter { name: Some("Room1".into()), ..Default::default() }).await?;
        let ids: Vec<_> = by_name.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![r1.id, r10.id, r1b.id]);

        let both = repo.find_all(&RoomFilter { size: Some(2), is_available: Some(true), ..Default::default() }).await?;
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].id, r1.id);

        let all = repo.find_all(&RoomFilter { name: Some(String::new()), ..Default::default() }).await?;
        assert_eq!(all.len(), 4);

        let none = repo.find_all(&RoomFilter { size: Some(99), ..Default::default() }).await?;
        assert!(none.is_empty());

        // Name filter is a literal, case-sensitive substring
        for pattern in ["Room_", "%", "room1"] {
            let found = repo.find_all(&RoomFilter { name: Some(pattern.into()), ..Default::default() }).await?;
            assert!(found.is_empty(), "{pattern:?} matched {found:?}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn name_filter_agrees_with_in_memory_store() -> Result<(), anyhow::Error> {
        use crate::room::repository::mock::MockRoomRepository;

        let sql = SeaOrmRoomRepository::new(get_db().await?);
        let mem = MockRoomRepository::default();
        for name in ["Room1", "room9", "50%_off", "Suite"] {
            sql.insert(new_room(name, 1, RoomStatus::Available)).await?;
            mem.insert(new_room(name, 1, RoomStatus::Available)).await?;
        }

        for pattern in ["Room_", "%", "room", "Room", "%_", "0%", "ite"] {
            let filter = RoomFilter { name: Some(pattern.into()), ..Default::default() };
            let a: Vec<_> = sql.find_all(&filter).await?.into_iter().map(|r| r.name).collect();
            let b: Vec<_> = mem.find_all(&filter).await?.into_iter().map(|r| r.name).collect();
            assert_eq!(a, b, "pattern {pattern:?}");
        }

        let percent = sql.find_all(&RoomFilter { name: Some("%_".into()), ..Default::default() }).await?;
        assert_eq!(percent.len(), 1);
        assert_eq!(percent[0].name, "50%_off");
        Ok(())
    }
}
