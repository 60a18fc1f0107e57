//! Defines the transaction model.
//!
//! A transaction moves money in or out of the budget for the whole window. It
//! is not tied to a particular day in the allowance calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, RecordID, UserID};

/// An income or expense that applies to the whole budget window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID generated by the store.
    pub id: RecordID,
    /// The user that owns the transaction.
    pub user_id: UserID,
    /// How much money moved. Never negative, see `is_income` for the direction.
    pub amount: Decimal,
    /// `true` if the money came in, `false` if it went out.
    pub is_income: bool,
    /// What the transaction was for.
    pub description: Option<String>,
    /// A free-text label for grouping transactions.
    pub category: Option<String>,
}

impl Transaction {
    /// The amount as it affects the balance: positive for income, negative otherwise.
    pub fn signed_amount(&self) -> Decimal {
        if self.is_income {
            self.amount
        } else {
            -self.amount
        }
    }
}

/// A transaction that has not been stored yet.
///
/// Use [NewTransaction::new] to create one and the builder methods for the
/// optional fields. Pass it to a [TransactionStore](crate::stores::TransactionStore)
/// to get a [Transaction] with an ID.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub(crate) amount: Decimal,
    pub(crate) is_income: bool,
    pub(crate) description: Option<String>,
    pub(crate) category: Option<String>,
}

impl NewTransaction {
    /// Start building a new transaction.
    ///
    /// # Errors
    ///
    /// Returns [Error::NegativeAmount] if `amount` is below zero.
    pub fn new(amount: Decimal, is_income: bool) -> Result<Self, Error> {
        if amount < Decimal::ZERO {
            return Err(Error::NegativeAmount);
        }

        Ok(Self {
            amount,
            is_income,
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

    /// Attach an ID and owner, producing the stored form of the transaction.
    pub(crate) fn finalize(self, id: RecordID, user_id: UserID) -> Transaction {
        Transaction {
            id,
            user_id,
            amount: self.amount,
            is_income: self.is_income,
            description: self.description,
            category: self.category,
        }
    }
}

#[cfg(test)]
mod transaction_tests {
    use rust_decimal_macros::dec;

    use crate::{Error, NewTransaction, RecordID, UserID};

    #[test]
    fn new_rejects_negative_amount() {
        assert_eq!(
            NewTransaction::new(dec!(-0.01), true),
            Err(Error::NegativeAmount)
        );
    }

    #[test]
    fn new_accepts_zero() {
        assert!(NewTransaction::new(dec!(0), false).is_ok());
    }

    #[test]
    fn signed_amount_follows_direction() {
        let income = NewTransaction::new(dec!(12.50), true)
            .unwrap()
            .finalize(RecordID::generate(), UserID::new(1));
        let expense = NewTransaction::new(dec!(12.50), false)
            .unwrap()
            .finalize(RecordID::generate(), UserID::new(1));

        assert_eq!(income.signed_amount(), dec!(12.50));
        assert_eq!(expense.signed_amount(), dec!(-12.50));
    }

    #[test]
    fn finalize_keeps_optional_fields() {
        let id = RecordID::generate();
        let transaction = NewTransaction::new(dec!(40), false)
            .unwrap()
            .description(Some("Concert tickets".to_owned()))
            .category(Some("Fun".to_owned()))
            .finalize(id, UserID::new(7));

        assert_eq!(transaction.id, id);
        assert_eq!(transaction.user_id, UserID::new(7));
        assert_eq!(transaction.description.as_deref(), Some("Concert tickets"));
        assert_eq!(transaction.category.as_deref(), Some("Fun"));
    }
}
