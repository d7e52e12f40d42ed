//! Shared runtime helpers for the hotel room workspace: logging setup,
//! environment checks and small response types.

pub mod types;
pub mod utils;
pub mod env;
