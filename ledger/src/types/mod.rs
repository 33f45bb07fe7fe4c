pub mod id;

pub use id::{CompanyId, UserId, VacationRequestId};
