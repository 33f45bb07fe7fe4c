//! Screen-level state for the employee and administrator workflows.
//!
//! View models own no I/O of their own; they reach the store through
//! [`VacationStore`](crate::store::VacationStore) and run the ledger guards
//! before anything leaves the process.

pub mod admin;
pub mod employee;
pub mod error;

pub use admin::AdminViewModel;
pub use employee::EmployeeViewModel;
pub use error::ViewError;

use chrono::Utc;
use chronos_ledger::{SessionContext, SessionStatus};

pub(crate) fn ensure_session(session: &SessionContext) -> Result<(), ViewError> {
    match session.status(Utc::now()) {
        SessionStatus::Valid => Ok(()),
        status => Err(ViewError::Session(status)),
    }
}
