//! Full field rule set for create and update.

use models::room::{self, NewRoom, RoomStatus};

use super::domain::RoomInput;
use crate::errors::ValidationErrors;

/// Evaluates every rule and reports all failures together.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoomValidator;

impl RoomValidator {
    pub fn new() -> Self { Self }

    /// Check `input` and hand back the typed room on success.
    ///
    /// Rules run in a fixed order: name present, name length, size, status,
    /// then the details requirement for maintenance or locked rooms. A failing
    /// rule never stops the later ones.
    pub fn validate(&self, input: &RoomInput) -> Result<NewRoom, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if let Err(e) = room::validate_name_present(&input.name) {
            errors.push("name", rule_message(e));
        }
        if let Err(e) = room::validate_name_length(&input.name) {
            errors.push("name", rule_message(e));
        }
        if let Err(e) = room::validate_size(input.size) {
            errors.push("size", rule_message(e));
        }
        let status = match room::validate_status(&input.status) {
            Ok(st) => Some(st),
            Err(e) => {
                errors.push("status", rule_message(e));
                None
            }
        };
        if let Some(st) = status {
            if let Err(e) = room::validate_details(st, input.additional_details.as_deref()) {
                errors.push("additionalDetails", rule_message(e));
            }
        }

        match status {
            Some(status) if errors.is_empty() => Ok(NewRoom {
                name: input.name.clone(),
                size: input.size,
                status,
                additional_details: input.additional_details.clone(),
            }),
            _ => Err(errors),
        }
    }

    /// The narrower check used by status-only changes.
    pub fn details_satisfied(&self, status: RoomStatus, details: Option<&str>) -> bool {
        room::validate_details(status, details).is_ok()
    }
}

fn rule_message(e: models::errors::ModelError) -> String {
    match e {
        models::errors::ModelError::Validation(msg) => msg,
        other => other.to_string(),
    }
}
