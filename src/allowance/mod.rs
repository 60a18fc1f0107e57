//! The daily allowance calculation and its route handler.

mod allowance_endpoint;
mod core;

pub use allowance_endpoint::get_allowance_endpoint;
pub use core::calculate_daily_allowance;
