//! Balance validator: recomputes a statement's totals from its stored
//! movements and reports every mismatch.
//!
//! Validation never fails; it always returns a structured report. A
//! mismatch is a data-integrity finding for the caller, not an error.

use serde::{Deserialize, Serialize};

use super::types::{GeneratedMovement, StatementTotals};
use crate::ledger::Direction;

/// The movement fields the validator needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementView {
    /// Inflow or outflow.
    pub direction: Direction,
    /// Positive amount in whole pesos.
    pub amount: i64,
    /// Stored running balance after this movement.
    pub running_balance: i64,
    /// Stored 1-based order index.
    pub order_index: i32,
    /// True for the synthetic opening-balance movement.
    pub is_carry_forward: bool,
}

impl From<&GeneratedMovement> for MovementView {
    fn from(movement: &GeneratedMovement) -> Self {
        Self {
            direction: movement.direction,
            amount: movement.amount,
            running_balance: movement.running_balance,
            order_index: movement.order_index,
            is_carry_forward: movement.is_carry_forward,
        }
    }
}

/// Outcome of validating one statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True iff no mismatch was found.
    pub is_valid: bool,
    /// One human-readable message per mismatch.
    pub errors: Vec<String>,
}

/// Recomputes totals and balances from stored movements.
pub struct BalanceValidator;

impl BalanceValidator {
    /// Validates a statement's stored totals against its stored movements.
    ///
    /// Checks, with exact integer equality (amounts are whole pesos):
    /// - recomputed inflow/outflow over non-carry-forward movements vs the
    ///   stored totals;
    /// - `opening + inflow - outflow` vs the stored closing balance;
    /// - order indices forming the contiguous sequence 1..N;
    /// - the running-balance recurrence across the movement list.
    #[must_use]
    pub fn validate(totals: &StatementTotals, movements: &[MovementView]) -> ValidationReport {
        let mut errors = Vec::new();

        let calculated_inflow: i64 = movements
            .iter()
            .filter(|m| !m.is_carry_forward && m.direction == Direction::Inflow)
            .map(|m| m.amount)
            .sum();
        let calculated_outflow: i64 = movements
            .iter()
            .filter(|m| !m.is_carry_forward && m.direction == Direction::Outflow)
            .map(|m| m.amount)
            .sum();

        if calculated_inflow != totals.total_inflow {
            errors.push(format!(
                "Total inflow mismatch: stored {}, calculated from movements {}",
                totals.total_inflow, calculated_inflow
            ));
        }

        if calculated_outflow != totals.total_outflow {
            errors.push(format!(
                "Total outflow mismatch: stored {}, calculated from movements {}",
                totals.total_outflow, calculated_outflow
            ));
        }

        let expected_closing = totals.opening_balance + calculated_inflow - calculated_outflow;
        if expected_closing != totals.closing_balance {
            errors.push(format!(
                "Closing balance mismatch: stored {}, expected {} (opening {} + inflow {} - outflow {})",
                totals.closing_balance,
                expected_closing,
                totals.opening_balance,
                calculated_inflow,
                calculated_outflow
            ));
        }

        for (position, movement) in movements.iter().enumerate() {
            let expected_index = i32::try_from(position).unwrap_or(i32::MAX) + 1;
            if movement.order_index != expected_index {
                errors.push(format!(
                    "Order index gap: expected {expected_index}, found {}",
                    movement.order_index
                ));
            }
        }

        let mut previous_balance = totals.opening_balance;
        for movement in movements {
            let expected_balance = if movement.is_carry_forward {
                // The carry-forward restates the opening balance.
                totals.opening_balance
            } else {
                match movement.direction {
                    Direction::Inflow => previous_balance + movement.amount,
                    Direction::Outflow => previous_balance - movement.amount,
                }
            };

            if movement.running_balance != expected_balance {
                errors.push(format!(
                    "Running balance mismatch at movement {}: stored {}, expected {}",
                    movement.order_index, movement.running_balance, expected_balance
                ));
            }

            previous_balance = movement.running_balance;
        }

        ValidationReport {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movement(
        direction: Direction,
        amount: i64,
        running_balance: i64,
        order_index: i32,
        is_carry_forward: bool,
    ) -> MovementView {
        MovementView {
            direction,
            amount,
            running_balance,
            order_index,
            is_carry_forward,
        }
    }

    fn chained_statement() -> (StatementTotals, Vec<MovementView>) {
        // Predecessor closed at 100000; one 30000 outflow.
        let totals = StatementTotals {
            opening_balance: 100_000,
            total_inflow: 0,
            total_outflow: 30_000,
            closing_balance: 70_000,
        };
        let movements = vec![
            movement(Direction::Inflow, 100_000, 100_000, 1, true),
            movement(Direction::Outflow, 30_000, 70_000, 2, false),
        ];
        (totals, movements)
    }

    #[test]
    fn test_consistent_statement_is_valid() {
        let (totals, movements) = chained_statement();
        let report = BalanceValidator::validate(&totals, &movements);
        assert!(report.is_valid, "unexpected errors: {:?}", report.errors);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_empty_statement_is_valid() {
        let totals = StatementTotals {
            opening_balance: 0,
            total_inflow: 0,
            total_outflow: 0,
            closing_balance: 0,
        };
        let report = BalanceValidator::validate(&totals, &[]);
        assert!(report.is_valid);
    }

    #[test]
    fn test_tampered_amount_reports_outflow_and_closing() {
        // An externally altered movement amount (30000 -> 40000) without a
        // matching totals update must trip both the outflow total and the
        // closing balance checks.
        let (totals, mut movements) = chained_statement();
        movements[1].amount = 40_000;
        movements[1].running_balance = 60_000;

        let report = BalanceValidator::validate(&totals, &movements);

        assert!(!report.is_valid);
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.contains("Total outflow mismatch"))
        );
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.contains("Closing balance mismatch"))
        );
    }

    #[test]
    fn test_carry_forward_excluded_from_recomputed_totals() {
        // The carry-forward direction never leaks into the inflow total.
        let (totals, movements) = chained_statement();
        let report = BalanceValidator::validate(&totals, &movements);
        assert!(report.is_valid);

        // Corrupting the stored inflow total proves the carry-forward was
        // not counted: recomputed inflow stays 0.
        let corrupted = StatementTotals {
            total_inflow: 100_000,
            ..totals
        };
        let report = BalanceValidator::validate(&corrupted, &movements);
        assert!(!report.is_valid);
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.contains("stored 100000, calculated from movements 0"))
        );
    }

    #[test]
    fn test_order_index_gap_detected() {
        let (totals, mut movements) = chained_statement();
        movements[1].order_index = 3;

        let report = BalanceValidator::validate(&totals, &movements);

        assert!(!report.is_valid);
        assert!(report.errors.iter().any(|e| e.contains("Order index gap")));
    }

    #[test]
    fn test_running_balance_break_detected() {
        let (totals, mut movements) = chained_statement();
        movements[1].running_balance = 75_000;

        let report = BalanceValidator::validate(&totals, &movements);

        assert!(!report.is_valid);
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.contains("Running balance mismatch at movement 2"))
        );
    }

    #[test]
    fn test_negative_carry_forward_validates() {
        let totals = StatementTotals {
            opening_balance: -25_000,
            total_inflow: 40_000,
            total_outflow: 0,
            closing_balance: 15_000,
        };
        let movements = vec![
            movement(Direction::Outflow, 25_000, -25_000, 1, true),
            movement(Direction::Inflow, 40_000, 15_000, 2, false),
        ];

        let report = BalanceValidator::validate(&totals, &movements);
        assert!(report.is_valid, "unexpected errors: {:?}", report.errors);
    }
}
