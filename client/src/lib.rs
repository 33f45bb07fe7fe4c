//! REST client, view models and command line for Chronos vacation requests.
//!
//! Business rules live in `chronos-ledger`; this crate talks to the store
//! and keeps the signed-in session.

pub mod api;
pub mod cli;
pub mod config;
pub mod state;
pub mod store;
pub mod views;

pub use api::{ApiClient, ApiError, ErrorKind};
pub use config::ClientConfig;
pub use state::SessionStore;
pub use store::VacationStore;
pub use views::{AdminViewModel, EmployeeViewModel, ViewError};
