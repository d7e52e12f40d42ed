use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use super::domain::{Room, RoomFilter, RoomInput, RoomStatus};
use super::repository::RoomRepository;
use super::validator::RoomValidator;
use crate::errors::{ServiceError, ValidationErrors};

/// Room business service independent of web framework.
/// Validates payloads and enforces status rules before anything reaches the store.
pub struct RoomService<R: RoomRepository> {
    repo: Arc<R>,
    validator: RoomValidator,
}

impl<R: RoomRepository> RoomService<R> {
    pub fn new(repo: Arc<R>, validator: RoomValidator) -> Self { Self { repo, validator } }

    /// List rooms; filters pass through to the store untouched.
    #[instrument(skip(self))]
    pub async fn list_rooms(&self, filter: RoomFilter) -> Result<Vec<Room>, ServiceError> {
        let rooms = self.repo.find_all(&filter).await.map_err(|e| {
            error!(error = %e, "room_list_failed");
            e
        })?;
        info!(count = rooms.len(), "rooms_listed");
        Ok(rooms)
    }

    #[instrument(skip(self))]
    pub async fn get_room_by_id(&self, id: i32) -> Result<Room, ServiceError> {
        self.repo.find_by_id(id).await.map_err(|e| {
            match &e {
                ServiceError::NotFound(_) => warn!(room_id = id, "room_not_found"),
                _ => error!(room_id = id, error = %e, "room_fetch_failed"),
            }
            e
        })
    }

    /// Validate and store a new room. Store failures propagate.
    ///
    /// # Examples
    /// ```
    /// use service::room::{RoomService, RoomValidator, repository::mock::MockRoomRepository};
    /// use service::room::domain::{RoomInput, RoomStatus};
    /// use std::sync::Arc;
    /// let svc = RoomService::new(Arc::new(MockRoomRepository::default()), RoomValidator::new());
    /// let room = tokio_test::block_on(svc.create_room(RoomInput::new("Room1", 2, RoomStatus::Available))).unwrap();
    /// assert!(room.id > 0);
    /// assert!(room.is_available);
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_room(&self, input: RoomInput) -> Result<Room, ServiceError> {
        let new_room = self.validator.validate(&input).map_err(validation_failed)?;
        let created = self.repo.insert(new_room).await.map_err(|e| {
            error!(error = %e, "room_create_failed");
            e
        })?;
        info!(room_id = created.id, status = %created.status, "room_created");
        Ok(created)
    }

    /// Validate and fully replace room `id`.
    ///
    /// Returns `Ok(false)` instead of an error whenever the store write fails,
    /// including when no room has this id.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn update_room(&self, id: i32, input: RoomInput) -> Result<bool, ServiceError> {
        let room = self.validator.validate(&input).map_err(validation_failed)?.into_model(id);
        match self.repo.update(&room).await {
            Ok(()) => {
                info!(room_id = id, status = %room.status, "room_updated");
                Ok(true)
            }
            Err(e) => {
                error!(room_id = id, error = %e, "room_update_failed");
                Ok(false)
            }
        }
    }

    /// Move a room to `status`.
    ///
    /// Returns `Ok(false)` without writing when the room does not exist. Maintenance
    /// and unavailable rooms need non-empty `details`, checked only once the room is found.
    ///
    /// # Examples
    /// ```
    /// use service::room::{RoomService, RoomValidator, repository::mock::MockRoomRepository};
    /// use service::room::domain::{RoomInput, RoomStatus};
    /// use service::errors::ServiceError;
    /// use std::sync::Arc;
    /// let svc = RoomService::new(Arc::new(MockRoomRepository::default()), RoomValidator::new());
    /// let room = tokio_test::block_on(svc.create_room(RoomInput::new("Room1", 2, RoomStatus::Available))).unwrap();
    /// let res = tokio_test::block_on(svc.set_room_status(room.id, RoomStatus::Maintenance, None));
    /// assert!(matches!(res, Err(ServiceError::InvalidArgument(_))));
    /// let ok = tokio_test::block_on(svc.set_room_status(room.id, RoomStatus::Maintenance, Some("leak".into()))).unwrap();
    /// assert!(ok);
    /// ```
    #[instrument(skip(self, details))]
    pub async fn set_room_status(&self, id: i32, status: RoomStatus, details: Option<String>) -> Result<bool, ServiceError> {
        let mut room = match self.repo.find_by_id(id).await {
            Ok(room) => room,
            Err(ServiceError::NotFound(_)) => {
                warn!(room_id = id, "room_not_found");
                return Ok(false);
            }
            Err(e) => {
                error!(room_id = id, error = %e, "room_fetch_failed");
                return Err(e);
            }
        };

        if !self.validator.details_satisfied(status, details.as_deref()) {
            warn!(room_id = id, %status, "status_details_missing");
            return Err(ServiceError::InvalidArgument(models::room::DETAILS_REQUIRED_MSG.into()));
        }

        let previous = room.status;
        room.apply_status(status, details);
        self.repo.update(&room).await.map_err(|e| {
            error!(room_id = id, error = %e, "room_status_write_failed");
            e
        })?;
        info!(room_id = id, from = %previous, to = %status, "room_status_changed");
        Ok(true)
    }
}

fn validation_failed(errors: ValidationErrors) -> ServiceError {
    warn!(%errors, "room_validation_failed");
    ServiceError::ValidationFailed(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::repository::mock::MockRoomRepository;

    fn service() -> (Arc<MockRoomRepository>, RoomService<MockRoomRepository>) {
        let repo = Arc::new(MockRoomRepository::default());
        (repo.clone(), RoomService::new(repo, RoomValidator::new()))
    }

    fn raw(name: &str, size: i32, status: &str) -> RoomInput {
        RoomInput { name: name.into(), size, status: status.into(), additional_details: None }
    }

    #[tokio::test]
    async fn create_assigns_id_and_derives_availability() {
        let (_, svc) = service();
        for status in [RoomStatus::Available, RoomStatus::Booked, RoomStatus::Cleaning] {
            let room = svc.create_room(RoomInput::new("Room1", 2, status)).await.unwrap();
            assert_ne!(room.id, 0);
            assert_eq!(room.is_available, status == RoomStatus::Available);
        }
    }

    #[tokio::test]
    async fn invalid_create_never_reaches_store() {
        let (repo, svc) = service();
        for input in [raw("", 2, "Available"), raw("Room1", 0, "Available"), raw("Room1", -1, "Booked"), raw("Room1", 2, "Closed")] {
            let res = svc.create_room(input).await;
            assert!(matches!(res, Err(ServiceError::ValidationFailed(_))));
        }
        assert_eq!(repo.insert_calls(), 0);
    }

    #[tokio::test]
    async fn validation_collects_every_failure() {
        let (_, svc) = service();
        match svc.create_room(raw(" ", 0, "nope")).await {
            Err(ServiceError::ValidationFailed(errs)) => assert_eq!(errs.len(), 3),
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_propagates_store_failure() {
        let (repo, svc) = service();
        repo.fail_writes(true);
        let res = svc.create_room(RoomInput::new("Room1", 2, RoomStatus::Available)).await;
        assert!(matches!(res, Err(ServiceError::Db(_))));
    }

    #[tokio::test]
    async fn invalid_update_never_reaches_store() {
        let (repo, svc) = service();
        let room = svc.create_room(RoomInput::new("Room1", 2, RoomStatus::Available)).await.unwrap();
        let res = svc.update_room(room.id, raw("", 0, "Available")).await;
        assert!(matches!(res, Err(ServiceError::ValidationFailed(_))));
        assert_eq!(repo.update_calls(), 0);
    }

    #[tokio::test]
    async fn update_to_maintenance_without_details_is_rejected() {
        let (repo, svc) = service();
        let room = svc
            .create_room(RoomInput::new("Room1", 2, RoomStatus::Maintenance).with_details("leak"))
            .await
            .unwrap();

        match svc.update_room(room.id, RoomInput::new("Room1", 2, RoomStatus::Maintenance)).await {
            Err(ServiceError::ValidationFailed(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(errors.has_field("additionalDetails"));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert_eq!(repo.update_calls(), 0);
        let stored = svc.get_room_by_id(room.id).await.unwrap();
        assert_eq!(stored.additional_details.as_deref(), Some("leak"));
    }

    #[tokio::test]
    async fn update_replaces_room() {
        let (_, svc) = service();
        let room = svc.create_room(RoomInput::new("Room1", 2, RoomStatus::Available)).await.unwrap();
        let updated = svc.update_room(room.id, RoomInput::new("Room1 Deluxe", 3, RoomStatus::Booked)).await.unwrap();
        assert!(updated);
        let after = svc.get_room_by_id(room.id).await.unwrap();
        assert_eq!(after.name, "Room1 Deluxe");
        assert_eq!(after.size, 3);
        assert!(!after.is_available);
    }

    #[tokio::test]
    async fn update_swallows_store_failure_into_false() {
        let (repo, svc) = service();
        let room = svc.create_room(RoomInput::new("Room1", 2, RoomStatus::Available)).await.unwrap();
        repo.fail_writes(true);
        assert!(!svc.update_room(room.id, RoomInput::new("Room1", 2, RoomStatus::Booked)).await.unwrap());
    }

    #[tokio::test]
    async fn update_of_missing_room_is_false() {
        let (repo, svc) = service();
        assert!(!svc.update_room(77, RoomInput::new("Room1", 2, RoomStatus::Booked)).await.unwrap());
        assert_eq!(repo.update_calls(), 1);
    }

    #[tokio::test]
    async fn get_missing_room_is_not_found() {
        let (_, svc) = service();
        assert!(matches!(svc.get_room_by_id(1).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn status_change_requires_details_for_maintenance() {
        let (repo, svc) = service();
        let room = svc.create_room(RoomInput::new("Room1", 2, RoomStatus::Available)).await.unwrap();

        match svc.set_room_status(room.id, RoomStatus::Maintenance, None).await {
            Err(ServiceError::InvalidArgument(msg)) => assert_eq!(msg, "Details are required for maintenance or locked rooms."),
            other => panic!("expected invalid argument, got {other:?}"),
        }
        assert!(matches!(
            svc.set_room_status(room.id, RoomStatus::Unavailable, Some(String::new())).await,
            Err(ServiceError::InvalidArgument(_))
        ));
        assert_eq!(repo.update_calls(), 0);

        assert!(svc.set_room_status(room.id, RoomStatus::Maintenance, Some("reason".into())).await.unwrap());
        let after = svc.get_room_by_id(room.id).await.unwrap();
        assert_eq!(after.status, RoomStatus::Maintenance);
        assert_eq!(after.additional_details.as_deref(), Some("reason"));
        assert!(!after.is_available);
    }

    #[tokio::test]
    async fn status_change_on_missing_room_is_false_without_write() {
        let (repo, svc) = service();
        // details are not checked before the lookup
        assert!(!svc.set_room_status(5, RoomStatus::Maintenance, None).await.unwrap());
        assert_eq!(repo.update_calls(), 0);
    }

    #[tokio::test]
    async fn status_change_back_to_available_restores_availability() {
        let (_, svc) = service();
        let room = svc.create_room(RoomInput::new("Room1", 2, RoomStatus::Booked)).await.unwrap();
        assert!(svc.set_room_status(room.id, RoomStatus::Available, None).await.unwrap());
        let after = svc.get_room_by_id(room.id).await.unwrap();
        assert!(after.is_available);
        assert_eq!(after.additional_details, None);
    }

    #[tokio::test]
    async fn status_change_propagates_write_failure() {
        let (repo, svc) = service();
        let room = svc.create_room(RoomInput::new("Room1", 2, RoomStatus::Available)).await.unwrap();
        repo.fail_writes(true);
        let res = svc.set_room_status(room.id, RoomStatus::Cleaning, None).await;
        assert!(matches!(res, Err(ServiceError::Db(_))));
    }

    #[tokio::test]
    async fn end_to_end_unavailable_round_trip() {
        let (_, svc) = service();
        let room = svc.create_room(RoomInput::new("Room1", 2, RoomStatus::Available)).await.unwrap();
        assert!(room.is_available);
        assert!(svc.set_room_status(room.id, RoomStatus::Unavailable, Some("Maintenance".into())).await.unwrap());
        let after = svc.get_room_by_id(room.id).await.unwrap();
        assert_eq!(after.status, RoomStatus::Unavailable);
        assert!(!after.is_available);
        assert_eq!(after.additional_details.as_deref(), Some("Maintenance"));
    }

    #[tokio::test]
    async fn list_filters_pass_through() {
        let (_, svc) = service();
        svc.create_room(RoomInput::new("Room1", 2, RoomStatus::Available)).await.unwrap();
        svc.create_room(RoomInput::new("Room12", 2, RoomStatus::Booked)).await.unwrap();
        svc.create_room(RoomInput::new("Suite", 2, RoomStatus::Available)).await.unwrap();

        let named = svc.list_rooms(RoomFilter { name: Some("Room1".into()), ..Default::default() }).await.unwrap();
        assert!(named.iter().all(|r| r.name.contains("Room1")));
        assert_eq!(named.len(), 2);

        let both = svc.list_rooms(RoomFilter { size: Some(2), is_available: Some(true), ..Default::default() }).await.unwrap();
        assert_eq!(both.len(), 2);

        let none = svc.list_rooms(RoomFilter { name: Some("Penthouse".into()), ..Default::default() }).await.unwrap();
        assert!(none.is_empty());
    }
}
