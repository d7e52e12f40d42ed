use std::fmt;
use std::str::FromStr;

use sea_orm::{entity::prelude::*, ActiveValue::NotSet, Iterable, Set, Unchanged};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const NAME_MAX_LEN: usize = 100;

pub const NAME_REQUIRED_MSG: &str = "Room name is required.";
pub const NAME_TOO_LONG_MSG: &str = "Room name cannot exceed 100 characters.";
pub const SIZE_MSG: &str = "Room size must be greater than 0.";
pub const STATUS_MSG: &str = "Invalid room status.";
pub const DETAILS_REQUIRED_MSG: &str = "Details are required for maintenance or locked rooms.";

/// Lifecycle state of a room, stored by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum RoomStatus {
    #[sea_orm(string_value = "Available")]
    Available,
    #[sea_orm(string_value = "Booked")]
    Booked,
    #[sea_orm(string_value = "Occupied")]
    Occupied,
    #[sea_orm(string_value = "Maintenance")]
    Maintenance,
    #[sea_orm(string_value = "Cleaning")]
    Cleaning,
    #[sea_orm(string_value = "Unavailable")]
    Unavailable,
}

impl RoomStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RoomStatus::Available => "Available",
            RoomStatus::Booked => "Booked",
            RoomStatus::Occupied => "Occupied",
            RoomStatus::Maintenance => "Maintenance",
            RoomStatus::Cleaning => "Cleaning",
            RoomStatus::Unavailable => "Unavailable",
        }
    }

    /// The single source of the `is_available` column.
    pub fn is_available(self) -> bool {
        self == RoomStatus::Available
    }

    /// Maintenance and locked rooms must explain themselves.
    pub fn requires_details(self) -> bool {
        matches!(self, RoomStatus::Maintenance | RoomStatus::Unavailable)
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = ModelError;

    /// Case-insensitive match on the variant name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RoomStatus::iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ModelError::UnknownStatus(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "room")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub size: i32,
    pub is_available: bool,
    pub status: RoomStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub additional_details: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Move the room to `status`, keeping `is_available` in step.
    pub fn apply_status(&mut self, status: RoomStatus, details: Option<String>) {
        self.status = status;
        self.is_available = status.is_available();
        self.additional_details = details;
    }

    /// Active model that rewrites every column of the row with this id.
    /// `is_available` is recomputed from `status` rather than trusted.
    pub fn to_replacement(&self) -> ActiveModel {
        ActiveModel {
            id: Unchanged(self.id),
            name: Set(self.name.clone()),
            size: Set(self.size),
            is_available: Set(self.status.is_available()),
            status: Set(self.status),
            additional_details: Set(self.additional_details.clone()),
        }
    }
}

/// A validated room that has not been stored yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRoom {
    pub name: String,
    pub size: i32,
    pub status: RoomStatus,
    pub additional_details: Option<String>,
}

impl NewRoom {
    pub fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            name: Set(self.name),
            size: Set(self.size),
            is_available: Set(self.status.is_available()),
            status: Set(self.status),
            additional_details: Set(self.additional_details),
        }
    }

    /// The row this draft becomes once the store assigns `id`.
    pub fn into_model(self, id: i32) -> Model {
        Model {
            id,
            is_available: self.status.is_available(),
            name: self.name,
            size: self.size,
            status: self.status,
            additional_details: self.additional_details,
        }
    }
}

pub fn validate_name_present(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation(NAME_REQUIRED_MSG.into()));
    }
    Ok(())
}

pub fn validate_name_length(name: &str) -> Result<(), ModelError> {
    if name.chars().count() > NAME_MAX_LEN {
        return Err(ModelError::Validation(NAME_TOO_LONG_MSG.into()));
    }
    Ok(())
}

pub fn validate_size(size: i32) -> Result<(), ModelError> {
    if size <= 0 {
        return Err(ModelError::Validation(SIZE_MSG.into()));
    }
    Ok(())
}

pub fn validate_status(status: &str) -> Result<RoomStatus, ModelError> {
    status
        .parse::<RoomStatus>()
        .map_err(|_| ModelError::Validation(STATUS_MSG.into()))
}

pub fn validate_details(status: RoomStatus, details: Option<&str>) -> Result<(), ModelError> {
    if status.requires_details() && details.map_or(true, str::is_empty) {
        return Err(ModelError::Validation(DETAILS_REQUIRED_MSG.into()));
    }
    Ok(())
}
