//! Statement domain types: status state machine, totals, and movements.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use provisoria_shared::types::{AccountId, VoucherId};

use super::error::InvalidTransition;
use crate::ledger::Direction;

/// Status of a period statement in its court-submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementStatus {
    /// Statement is being prepared and may be regenerated freely.
    Draft,
    /// Statement has been approved by the responsible attorney.
    Approved,
    /// Statement has been submitted to the tribunal.
    Submitted,
}

impl StatementStatus {
    /// Returns true if the statement is still being prepared.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        matches!(self, Self::Draft)
    }
}

/// Validates a statement status transition.
///
/// Statements move draft -> approved -> submitted with no reverse path.
/// Writing the current status again is a no-op and always allowed.
///
/// # Errors
///
/// Returns `InvalidTransition` for any transition outside the monotonic
/// chain.
pub fn validate_status_transition(
    from: StatementStatus,
    to: StatementStatus,
) -> Result<(), InvalidTransition> {
    let valid = match (from, to) {
        // Same status is a no-op - always valid
        _ if from == to => true,
        (StatementStatus::Draft, StatementStatus::Approved)
        | (StatementStatus::Approved, StatementStatus::Submitted) => true,
        // No reverse transitions, no skipping draft -> submitted
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(InvalidTransition { from, to })
    }
}

/// The balances and totals stored on a statement row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementTotals {
    /// Balance carried in from the prior period (0 for a first period).
    pub opening_balance: i64,
    /// Sum of non-carry-forward inflow amounts.
    pub total_inflow: i64,
    /// Sum of non-carry-forward outflow amounts.
    pub total_outflow: i64,
    /// Balance after the last movement.
    pub closing_balance: i64,
}

/// A single generated movement, before persistence.
///
/// Movements are owned by their statement and replaced as a unit on every
/// regeneration; they are never patched individually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMovement {
    /// Movement date (voucher issue date, or the period's first day for the
    /// carry-forward movement).
    pub date: NaiveDate,
    /// Human-readable description.
    pub description: String,
    /// Source document type, if any.
    pub document_type: Option<String>,
    /// Source document folio number, if any.
    pub document_number: Option<String>,
    /// Inflow or outflow.
    pub direction: Direction,
    /// Positive amount in whole pesos.
    pub amount: i64,
    /// Running balance after applying this movement.
    pub running_balance: i64,
    /// 1-based position within the statement.
    pub order_index: i32,
    /// True only for the synthetic opening-balance movement. Classification
    /// logic keys off this flag, never off the description text.
    pub is_carry_forward: bool,
    /// The classified account, absent for the carry-forward movement.
    pub account_id: Option<AccountId>,
    /// The source voucher, absent for the carry-forward movement.
    pub voucher_id: Option<VoucherId>,
}

/// The result of one generation run, computed fully before any persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// The recomputed balances and totals.
    pub totals: StatementTotals,
    /// The full ordered movement list.
    pub movements: Vec<GeneratedMovement>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions_valid() {
        assert!(
            validate_status_transition(StatementStatus::Draft, StatementStatus::Approved).is_ok()
        );
        assert!(
            validate_status_transition(StatementStatus::Approved, StatementStatus::Submitted)
                .is_ok()
        );
    }

    #[test]
    fn test_same_status_is_noop() {
        assert!(validate_status_transition(StatementStatus::Draft, StatementStatus::Draft).is_ok());
        assert!(
            validate_status_transition(StatementStatus::Submitted, StatementStatus::Submitted)
                .is_ok()
        );
    }

    #[test]
    fn test_reverse_transitions_invalid() {
        assert!(
            validate_status_transition(StatementStatus::Approved, StatementStatus::Draft).is_err()
        );
        assert!(
            validate_status_transition(StatementStatus::Submitted, StatementStatus::Approved)
                .is_err()
        );
        assert!(
            validate_status_transition(StatementStatus::Submitted, StatementStatus::Draft).is_err()
        );
    }

    #[test]
    fn test_skipping_approval_invalid() {
        let err = validate_status_transition(StatementStatus::Draft, StatementStatus::Submitted)
            .unwrap_err();
        assert_eq!(err.from, StatementStatus::Draft);
        assert_eq!(err.to, StatementStatus::Submitted);
    }
}
