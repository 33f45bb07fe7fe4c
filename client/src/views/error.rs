use chronos_ledger::{LedgerError, SessionStatus};
use thiserror::Error;

use crate::api::{ApiError, ErrorKind};

/// Failure surfaced by a view model, worded for the person at the keyboard.
///
/// Each variant states which side the problem is on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    #[error("Your input was invalid: {0}")]
    Invalid(#[from] LedgerError),

    #[error("The system rejected the request: {0}")]
    Rejected(ApiError),

    #[error("The request could not be reached: {0}. Please try again.")]
    Unreachable(ApiError),

    #[error("You need to sign in again (session {0}).")]
    Session(SessionStatus),

    #[error("The request went through but could not be completed locally: {0}")]
    Local(ApiError),
}

impl ViewError {
    /// True when the store answered and refused, i.e. local state may be stale.
    pub fn is_conflict(&self) -> bool {
        matches!(self, ViewError::Rejected(_))
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<ApiError> for ViewError {
    fn from(error: ApiError) -> Self {
        match error.kind() {
            ErrorKind::Validation => {
                ViewError::Invalid(LedgerError::Validation(vec![error.error]))
            }
            ErrorKind::Conflict => ViewError::Rejected(error),
            ErrorKind::Transient => ViewError::Unreachable(error),
            ErrorKind::Unauthorized if error.is_signed_out() => {
                ViewError::Session(SessionStatus::Missing)
            }
            ErrorKind::Unauthorized => ViewError::Session(SessionStatus::Expired),
            ErrorKind::Local => ViewError::Local(error),
        }
    }
}
