//! Spendings: money spent on a particular day.

mod core;
mod endpoints;

pub use core::{NewSpending, Spending};
pub use endpoints::{create_spending_endpoint, delete_spending_endpoint, list_spendings_endpoint};
