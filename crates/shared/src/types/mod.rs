//! Common types used across the application.

pub mod id;
pub mod money;
pub mod response;

pub use id::*;
pub use money::{MAX_AMOUNT, MONEY_SCALE, format_amount, growth_rate, percentage_of, round_money};
pub use response::{ApiResponse, respond};
