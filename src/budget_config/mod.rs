//! The budget window each user's allowance is calculated over.

mod config_endpoint;
mod core;

pub use config_endpoint::{get_config_endpoint, set_config_endpoint};
pub use core::BudgetConfig;
