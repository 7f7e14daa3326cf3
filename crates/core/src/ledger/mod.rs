//! Read-only ledger views and the account classifier.
//!
//! The reconciliation engine never owns accounts or vouchers; it only reads
//! them from the ledger collaborator. This module defines the views the
//! engine consumes and the pure classification rule that decides whether a
//! voucher line is an inflow or an outflow.

pub mod classifier;
pub mod types;

pub use classifier::{Direction, classify};
pub use types::{AccountType, VoucherLineView};
