use serde::{Deserialize, Serialize};

pub use models::room::{Model as Room, NewRoom, RoomStatus};

/// Caller-supplied room fields for create and full update.
/// `status` stays raw text until the validator has accepted it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomInput {
    pub name: String,
    pub size: i32,
    pub status: String,
    pub additional_details: Option<String>,
}

impl RoomInput {
    pub fn new(name: impl Into<String>, size: i32, status: RoomStatus) -> Self {
        Self { name: name.into(), size, status: status.as_str().to_string(), additional_details: None }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.additional_details = Some(details.into());
        self
    }
}

/// Conjunctive list filters; `None` means "not applied".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomFilter {
    pub name: Option<String>,
    pub size: Option<i32>,
    pub is_available: Option<bool>,
}

impl RoomFilter {
    /// Name filter with empty strings treated as absent.
    pub fn name_pattern(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    pub fn matches(&self, room: &Room) -> bool {
        self.name_pattern().map_or(true, |n| room.name.contains(n))
            && self.size.map_or(true, |s| room.size == s)
            && self.is_available.map_or(true, |a| room.is_available == a)
    }
}
