//! Vacation-request rules for Chronos.
//!
//! Working-day counting, the request lifecycle, pre-flight submission
//! checks, the administrator board and the signed-in session. Nothing in this
//! crate performs I/O; the store is reached through `chronos-client`.

pub mod board;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod session;
pub mod types;
pub mod utils;
pub mod validation;

pub use board::{Placement, RequestBoard};
pub use error::LedgerError;
pub use lifecycle::{Action, Actor, Approval};
pub use models::{
    Company, NewVacationRequest, StatusUpdate, User, UserRole, VacationBalance, VacationRequest,
    VacationStatus,
};
pub use session::{session_status, SessionContext, SessionStatus};
pub use types::{CompanyId, UserId, VacationRequestId};
pub use utils::working_days::count_working_days;
pub use validation::validate_submission;
