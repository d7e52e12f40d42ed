//! Service layer for hotel room records.
//! - Separates business rules (validation, status transitions) from data access.
//! - Reuses the entity and field rules defined in the `models` crate.
//! - Store access goes through the `RoomRepository` trait.

pub mod errors;
pub mod room;
#[cfg(test)]
pub mod test_support;
