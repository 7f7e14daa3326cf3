//! Statement error types for generation and state errors.

use thiserror::Error;

use provisoria_shared::types::AccountId;

use super::types::StatementStatus;

/// Errors that can occur while rebuilding a statement's movement set.
///
/// Generation aborts on the first error, before anything is persisted; the
/// prior consistent movement set remains visible to readers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// A voucher line references an account the ledger cannot resolve.
    #[error("Voucher line references unknown account: {0}")]
    UnknownAccount(AccountId),

    /// A voucher line carries a negative total amount.
    #[error("Voucher line carries a negative amount: {0}")]
    NegativeAmount(i64),
}

/// Invalid statement status transition.
///
/// Statements move draft -> approved -> submitted, monotonically. There is
/// no reverse transition.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid status transition from {from:?} to {to:?}")]
pub struct InvalidTransition {
    /// Current status.
    pub from: StatementStatus,
    /// Target status.
    pub to: StatementStatus,
}
