//! Field-level rules shared across payloads.

use chrono::NaiveDate;
use validator::ValidationError;

use crate::types::UserId;

/// Validates that a referenced user id has been assigned by the store.
pub fn validate_assigned_user(id: &UserId) -> Result<(), ValidationError> {
    if !id.is_assigned() {
        return Err(ValidationError::new("user_id_required"));
    }
    Ok(())
}

/// Validates that a range is not inverted.
pub fn validate_date_order(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end < start {
        return Err(ValidationError::new("end_before_start"));
    }
    Ok(())
}

/// Validates that a vacation does not start before `today`.
pub fn validate_not_retroactive(start: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    if start < today {
        return Err(ValidationError::new("start_in_past"));
    }
    Ok(())
}
