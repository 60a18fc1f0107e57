//! The budget window that a user's daily allowance is calculated over.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

/// A user's budget window: how much money they start with, how much they want
/// to have left, and the days in between.
///
/// There is at most one config per user and it is always replaced as a whole.
/// To create a `BudgetConfig`, use [BudgetConfig::new], which checks that the
/// window is not inverted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// The money available on the first day of the window.
    pub start_money: Decimal,
    /// The first day of the window.
    #[serde(with = "crate::date::day_month_year")]
    pub start_date: Date,
    /// The money the user wants to have left after the last day.
    pub end_money: Decimal,
    /// The last day of the window (inclusive).
    #[serde(with = "crate::date::day_month_year")]
    pub end_date: Date,
}

impl BudgetConfig {
    /// Create a new budget config.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidBudgetWindow] if `start_date` is after `end_date`.
    pub fn new(
        start_money: Decimal,
        start_date: Date,
        end_money: Decimal,
        end_date: Date,
    ) -> Result<Self, Error> {
        if start_date > end_date {
            return Err(Error::InvalidBudgetWindow {
                start: start_date,
                end: end_date,
            });
        }

        Ok(Self {
            start_money,
            start_date,
            end_money,
            end_date,
        })
    }

    /// Whether `date` falls inside the window, counting both ends.
    pub fn contains(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}
