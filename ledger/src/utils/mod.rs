pub mod time;
pub mod working_days;

pub use time::*;
pub use working_days::*;
