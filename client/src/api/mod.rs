pub mod auth;
pub mod client;
pub mod types;
pub mod users;
pub mod vacation;


pub use client::ApiClient;
pub use types::*;
