//! Read-only ledger domain types.
//!
//! All monetary amounts are whole Chilean pesos as `i64`. Floating-point
//! money is forbidden workspace-wide.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use provisoria_shared::types::{AccountId, VoucherId, VoucherLineId};

/// Chart-of-accounts classification.
///
/// Owned and mutated by the chart-of-accounts collaborator; read-only here.
/// The engine only uses the type to decide a movement's direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account.
    Asset,
    /// Liability account.
    Liability,
    /// Equity account.
    Equity,
    /// Income account.
    Income,
    /// Expense account.
    Expense,
}

/// A voucher line joined with its voucher's metadata, ready for
/// classification.
///
/// The ledger source delivers these pre-ordered by voucher issue date then
/// line order; the generator relies on that ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherLineView {
    /// The line's ID.
    pub line_id: VoucherLineId,
    /// The owning voucher's ID.
    pub voucher_id: VoucherId,
    /// The account this line posts against.
    pub account_id: AccountId,
    /// The voucher's issue date.
    pub issue_date: NaiveDate,
    /// Line description.
    pub description: String,
    /// The voucher's document type (e.g., "factura", "boleta").
    pub document_type: Option<String>,
    /// The voucher's folio number.
    pub folio_number: Option<String>,
    /// The line's total amount in whole pesos. This is the movement amount.
    pub total_amount: i64,
    /// The line's debit amount in whole pesos.
    pub debit_amount: i64,
    /// The line's credit amount in whole pesos.
    pub credit_amount: i64,
    /// Order of the line within its voucher.
    pub line_order: i32,
}
