//! Pre-flight validation for vacation submissions.
//!
//! Everything here runs before the store is contacted. A refusal from this
//! module means no request was sent.

pub mod rules;
pub mod submission;

pub use submission::validate_submission;
pub use validator::Validate;
