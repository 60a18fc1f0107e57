//! Defines the spending model: money spent on a particular day.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, RecordID, UserID};

/// Money spent on a specific day.
///
/// Spendings on days before the allowance query date are deducted from the
/// money left in the budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spending {
    /// The ID generated by the store.
    pub id: RecordID,
    /// The user that owns the spending.
    pub user_id: UserID,
    /// The day the money was spent.
    #[serde(with = "crate::date::day_month_year")]
    pub date: Date,
    /// How much money was spent. Never negative.
    pub amount: Decimal,
    /// What the money was spent on.
    pub description: Option<String>,
    /// A free-text label for grouping spendings.
    pub category: Option<String>,
}

/// A spending that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSpending {
    pub(crate) date: Date,
    pub(crate) amount: Decimal,
    pub(crate) description: Option<String>,
    pub(crate) category: Option<String>,
}

impl NewSpending {
    /// Start building a new spending.
    ///
    /// # Errors
    ///
    /// Returns [Error::NegativeAmount] if `amount` is below zero.
    pub fn new(date: Date, amount: Decimal) -> Result<Self, Error> {
        if amount < Decimal::ZERO {
            return Err(Error::NegativeAmount);
        }

        Ok(Self {
            date,
            amount,
            description: None,
            category: None,
        })
    }

    /// Set the description.
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Set the category.
    pub fn category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    pub(crate) fn finalize(self, id: RecordID, user_id: UserID) -> Spending {
        Spending {
            id,
            user_id,
            date: self.date,
            amount: self.amount,
            description: self.description,
            category: self.category,
        }
    }
}
