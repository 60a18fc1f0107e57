//! The daily allowance calculation.
//!
//! The allowance is the money left in the budget divided evenly over the days
//! left in the budget window, counting the query date itself. Money left is
//! the configured start money minus the end money, adjusted by every
//! transaction, minus whatever was spent on the days before the query date.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use time::Date;

use crate::{BudgetConfig, Error, Spending, Transaction};

/// The number of decimal places the allowance is rounded to.
const ALLOWANCE_DECIMAL_PLACES: u32 = 2;

/// Calculate how much money can be spent per day from `date` through the end
/// of the budget window so that the user ends up with `config.end_money`.
///
/// Transactions apply to the whole window regardless of when they were made.
/// Spendings only count if they fall on a day from the start of the window up
/// to, but not including, `date`.
///
/// The result is rounded to two decimal places, with midpoints rounded away
/// from zero.
///
/// # Errors
///
/// Returns [Error::DateOutOfRange] if `date` is before the start or after the
/// end of the budget window, or [Error::AmountOverflow] if the amounts do not
/// fit in a [Decimal] when added up.
pub fn calculate_daily_allowance(
    config: &BudgetConfig,
    transactions: &[Transaction],
    spendings: &[Spending],
    date: Date,
) -> Result<Decimal, Error> {
    if !config.contains(date) {
        return Err(Error::DateOutOfRange {
            date,
            start: config.start_date,
            end: config.end_date,
        });
    }

    let mut balance = transactions
        .iter()
        .map(Transaction::signed_amount)
        .try_fold(
            config
                .start_money
                .checked_sub(config.end_money)
                .ok_or(Error::AmountOverflow)?,
            |balance, amount| balance.checked_add(amount).ok_or(Error::AmountOverflow),
        )?;

    let spent_per_day = total_spent_per_day(spendings)?;
    let mut current_date = config.start_date;

    while current_date < date {
        let days_left = (config.end_date - current_date).whole_days();
        if days_left <= 0 {
            break;
        }

        if let Some(spent_today) = spent_per_day.get(&current_date) {
            balance = balance
                .checked_sub(*spent_today)
                .ok_or(Error::AmountOverflow)?;
        }

        current_date = match current_date.next_day() {
            Some(next_date) => next_date,
            None => break,
        };
    }

    let remaining_days = (config.end_date - date).whole_days() + 1;
    let allowance = balance
        .checked_div(Decimal::from(remaining_days))
        .ok_or(Error::AmountOverflow)?;

    let mut allowance = allowance.round_dp_with_strategy(
        ALLOWANCE_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    );
    // Always show cents, e.g. "100.00" rather than "100".
    allowance.rescale(ALLOWANCE_DECIMAL_PLACES);

    Ok(allowance)
}

/// Sum the spendings that fall on each day.
pub(crate) fn total_spent_per_day(
    spendings: &[Spending],
) -> Result<BTreeMap<Date, Decimal>, Error> {
    spendings
        .iter()
        .try_fold(BTreeMap::new(), |mut totals, spending| {
            let total = totals.entry(spending.date).or_insert(Decimal::ZERO);
            *total = total
                .checked_add(spending.amount)
                .ok_or(Error::AmountOverflow)?;

            Ok(totals)
        })
}
