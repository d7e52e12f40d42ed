use async_trait::async_trait;

use super::domain::{NewRoom, Room, RoomFilter};
use crate::errors::ServiceError;

/// Persistence contract for rooms. Implementations perform no validation.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Rooms matching every provided filter, ordered by id.
    async fn find_all(&self, filter: &RoomFilter) -> Result<Vec<Room>, ServiceError>;
    /// `ServiceError::NotFound` when no row has this id.
    async fn find_by_id(&self, id: i32) -> Result<Room, ServiceError>;
    async fn insert(&self, room: NewRoom) -> Result<Room, ServiceError>;
    /// Replace the row with `room.id`; `ServiceError::NotFound` when it does not exist.
    async fn update(&self, room: &Room) -> Result<(), ServiceError>;
}

/// In-memory repository for tests and doc examples.
/// Counts writes and can be told to fail them.
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct MockRoomRepository {
        rooms: Mutex<BTreeMap<i32, Room>>, // key: room id
        insert_calls: AtomicUsize,
        update_calls: AtomicUsize,
        fail_writes: AtomicBool,
    }

    impl MockRoomRepository {
        pub fn insert_calls(&self) -> usize { self.insert_calls.load(Ordering::SeqCst) }

        pub fn update_calls(&self) -> usize { self.update_calls.load(Ordering::SeqCst) }

        /// Make every later insert/update return a database error.
        pub fn fail_writes(&self, fail: bool) { self.fail_writes.store(fail, Ordering::SeqCst); }

        fn rooms(&self) -> Result<MutexGuard<'_, BTreeMap<i32, Room>>, ServiceError> {
            self.rooms.lock().map_err(|_| ServiceError::Db("mock room store poisoned".into()))
        }

        fn check_writable(&self) -> Result<(), ServiceError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(ServiceError::Db("simulated write failure".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl RoomRepository for MockRoomRepository {
        async fn find_all(&self, filter: &RoomFilter) -> Result<Vec<Room>, ServiceError> {
            let rooms = self.rooms()?;
            Ok(rooms.values().filter(|r| filter.matches(r)).cloned().collect())
        }

        async fn find_by_id(&self, id: i32) -> Result<Room, ServiceError> {
            let rooms = self.rooms()?;
            rooms.get(&id).cloned().ok_or_else(|| ServiceError::not_found("room"))
        }

        async fn insert(&self, room: NewRoom) -> Result<Room, ServiceError> {
            self.insert_calls.fetch_add(1, Ordering::SeqCst);
            self.check_writable()?;
            let mut rooms = self.rooms()?;
            let id = rooms.keys().next_back().copied().unwrap_or(0) + 1;
            let stored = room.into_model(id);
            rooms.insert(id, stored.clone());
            Ok(stored)
        }

        async fn update(&self, room: &Room) -> Result<(), ServiceError> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            self.check_writable()?;
            let mut rooms = self.rooms()?;
            let Some(slot) = rooms.get_mut(&room.id) else {
                return Err(ServiceError::not_found("room"));
            };
            *slot = Room { is_available: room.status.is_available(), ..room.clone() };
            Ok(())
        }
    }
}
