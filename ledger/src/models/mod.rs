pub mod request_status;
pub mod user;
pub mod vacation_request;

pub use request_status::{UnknownStatus, VacationStatus};
pub use user::{Company, User, UserRole, VacationBalance};
pub use vacation_request::{NewVacationRequest, StatusUpdate, VacationRequest};
