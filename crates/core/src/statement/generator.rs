//! Movement generator: rebuilds a statement's full ordered movement list.
//!
//! This is a pure function of its inputs: the target period, the prior
//! period's closing balance (when a predecessor statement exists), and the
//! case's voucher lines for the period's date range, pre-ordered by voucher
//! issue date then line order. The caller fetches those inputs and owns the
//! atomic persistence of the result.

use provisoria_shared::PeriodKey;
use provisoria_shared::types::AccountId;

use super::error::GenerationError;
use super::types::{GeneratedMovement, GenerationOutcome, StatementTotals};
use crate::ledger::{AccountType, Direction, VoucherLineView, classify};

/// Description carried by the synthetic opening-balance movement.
///
/// Display text only; the carry-forward movement is identified by its
/// `is_carry_forward` flag, never by this string.
pub const CARRY_FORWARD_DESCRIPTION: &str = "Saldo anterior";

/// Movement generator for one (case, period).
pub struct MovementGenerator;

impl MovementGenerator {
    /// Rebuilds the ordered movement list and aggregated totals.
    ///
    /// Steps:
    /// 1. Opening balance = prior period's closing balance if a predecessor
    ///    statement exists, else 0.
    /// 2. When a predecessor exists, synthesize the carry-forward movement
    ///    at order index 1 with running balance = opening balance. Its
    ///    direction reflects the sign of the opening balance: an overdrawn
    ///    account carries forward as an outflow, not a fictitious inflow.
    /// 3. Classify each voucher line; inflows add the line's total amount
    ///    to the running balance, outflows subtract it.
    /// 4. Totals accumulate over classified lines only - the carry-forward
    ///    movement never contributes to `total_inflow`/`total_outflow`.
    ///
    /// The order counter is local to this invocation; regeneration with
    /// unchanged inputs yields identical `(direction, amount,
    /// running_balance, order_index)` tuples.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` if a line references an unresolvable
    /// account or carries a negative total amount. Nothing partial is
    /// returned; the caller's stored state stays untouched.
    pub fn generate<A>(
        period: PeriodKey,
        prior_closing: Option<i64>,
        lines: &[VoucherLineView],
        account_type_lookup: A,
    ) -> Result<GenerationOutcome, GenerationError>
    where
        A: Fn(AccountId) -> Option<AccountType>,
    {
        let opening_balance = prior_closing.unwrap_or(0);

        let mut movements = Vec::with_capacity(lines.len() + 1);
        // Fresh counter per invocation - never shared across generations.
        let mut order_index: i32 = 0;
        let mut running_balance = opening_balance;

        if prior_closing.is_some() {
            order_index += 1;
            movements.push(GeneratedMovement {
                date: period.first_day(),
                description: CARRY_FORWARD_DESCRIPTION.to_string(),
                document_type: None,
                document_number: None,
                direction: if opening_balance < 0 {
                    Direction::Outflow
                } else {
                    Direction::Inflow
                },
                amount: opening_balance.abs(),
                running_balance: opening_balance,
                order_index,
                is_carry_forward: true,
                account_id: None,
                voucher_id: None,
            });
        }

        let mut total_inflow: i64 = 0;
        let mut total_outflow: i64 = 0;

        for line in lines {
            let account_type = account_type_lookup(line.account_id)
                .ok_or(GenerationError::UnknownAccount(line.account_id))?;

            if line.total_amount < 0 {
                return Err(GenerationError::NegativeAmount(line.total_amount));
            }

            let direction = classify(account_type, line.debit_amount);
            let amount = line.total_amount;

            match direction {
                Direction::Inflow => {
                    running_balance += amount;
                    total_inflow += amount;
                }
                Direction::Outflow => {
                    running_balance -= amount;
                    total_outflow += amount;
                }
            }

            order_index += 1;
            movements.push(GeneratedMovement {
                date: line.issue_date,
                description: line.description.clone(),
                document_type: line.document_type.clone(),
                document_number: line.folio_number.clone(),
                direction,
                amount,
                running_balance,
                order_index,
                is_carry_forward: false,
                account_id: Some(line.account_id),
                voucher_id: Some(line.voucher_id),
            });
        }

        Ok(GenerationOutcome {
            totals: StatementTotals {
                opening_balance,
                total_inflow,
                total_outflow,
                closing_balance: running_balance,
            },
            movements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use provisoria_shared::types::{VoucherId, VoucherLineId};
    use std::collections::HashMap;

    fn period(year: i32, month: u32) -> PeriodKey {
        PeriodKey::new(year, month).unwrap()
    }

    fn line(
        account_id: AccountId,
        day: u32,
        total: i64,
        debit: i64,
        line_order: i32,
    ) -> VoucherLineView {
        VoucherLineView {
            line_id: VoucherLineId::new(),
            voucher_id: VoucherId::new(),
            account_id,
            issue_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            description: "Honorarios".to_string(),
            document_type: Some("factura".to_string()),
            folio_number: Some("123".to_string()),
            total_amount: total,
            debit_amount: debit,
            credit_amount: if debit > 0 { 0 } else { total },
            line_order,
        }
    }

    fn lookup(
        map: HashMap<AccountId, AccountType>,
    ) -> impl Fn(AccountId) -> Option<AccountType> {
        move |id| map.get(&id).copied()
    }

    #[test]
    fn test_first_period_single_income_line() {
        // Scenario: no predecessor, one income line of 100000.
        let income = AccountId::new();
        let lines = vec![line(income, 15, 100_000, 0, 1)];
        let accounts = lookup(HashMap::from([(income, AccountType::Income)]));

        let outcome =
            MovementGenerator::generate(period(2024, 1), None, &lines, accounts).unwrap();

        assert_eq!(outcome.movements.len(), 1);
        let movement = &outcome.movements[0];
        assert!(!movement.is_carry_forward);
        assert_eq!(movement.direction, Direction::Inflow);
        assert_eq!(movement.amount, 100_000);
        assert_eq!(movement.running_balance, 100_000);
        assert_eq!(movement.order_index, 1);

        assert_eq!(outcome.totals.opening_balance, 0);
        assert_eq!(outcome.totals.total_inflow, 100_000);
        assert_eq!(outcome.totals.total_outflow, 0);
        assert_eq!(outcome.totals.closing_balance, 100_000);
    }

    #[test]
    fn test_chained_period_carry_forward_excluded_from_totals() {
        // Scenario: predecessor closed at 100000; one asset line with zero
        // debit (classified outflow) of 30000.
        let asset = AccountId::new();
        let lines = vec![line(asset, 10, 30_000, 0, 1)];
        let accounts = lookup(HashMap::from([(asset, AccountType::Asset)]));

        let outcome =
            MovementGenerator::generate(period(2024, 2), Some(100_000), &lines, accounts).unwrap();

        assert_eq!(outcome.movements.len(), 2);

        let carry = &outcome.movements[0];
        assert!(carry.is_carry_forward);
        assert_eq!(carry.description, CARRY_FORWARD_DESCRIPTION);
        assert_eq!(carry.direction, Direction::Inflow);
        assert_eq!(carry.amount, 100_000);
        assert_eq!(carry.running_balance, 100_000);
        assert_eq!(carry.order_index, 1);
        assert_eq!(carry.account_id, None);
        assert_eq!(carry.voucher_id, None);

        let outflow = &outcome.movements[1];
        assert!(!outflow.is_carry_forward);
        assert_eq!(outflow.direction, Direction::Outflow);
        assert_eq!(outflow.amount, 30_000);
        assert_eq!(outflow.running_balance, 70_000);
        assert_eq!(outflow.order_index, 2);

        assert_eq!(outcome.totals.opening_balance, 100_000);
        assert_eq!(outcome.totals.total_inflow, 0);
        assert_eq!(outcome.totals.total_outflow, 30_000);
        assert_eq!(outcome.totals.closing_balance, 70_000);
    }

    #[test]
    fn test_zero_opening_predecessor_still_gets_carry_forward() {
        // A predecessor that closed at exactly 0 still produces the
        // carry-forward row so the court sees the chain.
        let outcome = MovementGenerator::generate(
            period(2024, 3),
            Some(0),
            &[],
            |_| Some(AccountType::Income),
        )
        .unwrap();

        assert_eq!(outcome.movements.len(), 1);
        assert!(outcome.movements[0].is_carry_forward);
        assert_eq!(outcome.movements[0].amount, 0);
        assert_eq!(outcome.movements[0].direction, Direction::Inflow);
        assert_eq!(outcome.totals.closing_balance, 0);
    }

    #[test]
    fn test_negative_opening_carries_forward_as_outflow() {
        // Overdrawn trust account: the carry-forward is signed, not a
        // fictitious inflow.
        let outcome = MovementGenerator::generate(
            period(2024, 4),
            Some(-25_000),
            &[],
            |_| Some(AccountType::Income),
        )
        .unwrap();

        let carry = &outcome.movements[0];
        assert_eq!(carry.direction, Direction::Outflow);
        assert_eq!(carry.amount, 25_000);
        assert_eq!(carry.running_balance, -25_000);
        assert_eq!(outcome.totals.opening_balance, -25_000);
        assert_eq!(outcome.totals.closing_balance, -25_000);
        assert_eq!(outcome.totals.total_inflow, 0);
        assert_eq!(outcome.totals.total_outflow, 0);
    }

    #[test]
    fn test_empty_first_period() {
        let outcome =
            MovementGenerator::generate(period(2024, 1), None, &[], |_| None).unwrap();

        assert!(outcome.movements.is_empty());
        assert_eq!(
            outcome.totals,
            StatementTotals {
                opening_balance: 0,
                total_inflow: 0,
                total_outflow: 0,
                closing_balance: 0,
            }
        );
    }

    #[test]
    fn test_unknown_account_aborts() {
        let orphan = AccountId::new();
        let lines = vec![line(orphan, 5, 10_000, 0, 1)];

        let result = MovementGenerator::generate(period(2024, 1), None, &lines, |_| None);

        assert_eq!(result, Err(GenerationError::UnknownAccount(orphan)));
    }

    #[test]
    fn test_negative_line_amount_aborts() {
        let income = AccountId::new();
        let lines = vec![line(income, 5, -500, 0, 1)];
        let accounts = lookup(HashMap::from([(income, AccountType::Income)]));

        let result = MovementGenerator::generate(period(2024, 1), None, &lines, accounts);

        assert_eq!(result, Err(GenerationError::NegativeAmount(-500)));
    }

    #[test]
    fn test_mixed_lines_running_balance() {
        let income = AccountId::new();
        let asset = AccountId::new();
        let expense = AccountId::new();
        let lines = vec![
            line(income, 3, 200_000, 0, 1),
            line(asset, 10, 50_000, 0, 1),   // outflow (no debit)
            line(asset, 12, 80_000, 80_000, 1), // inflow (debited asset)
            line(expense, 20, 40_000, 40_000, 1), // outflow (expense)
        ];
        let accounts = lookup(HashMap::from([
            (income, AccountType::Income),
            (asset, AccountType::Asset),
            (expense, AccountType::Expense),
        ]));

        let outcome =
            MovementGenerator::generate(period(2024, 1), Some(10_000), &lines, accounts).unwrap();

        let balances: Vec<i64> = outcome
            .movements
            .iter()
            .map(|m| m.running_balance)
            .collect();
        assert_eq!(balances, vec![10_000, 210_000, 160_000, 240_000, 200_000]);

        let indices: Vec<i32> = outcome.movements.iter().map(|m| m.order_index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4, 5]);

        assert_eq!(outcome.totals.total_inflow, 280_000);
        assert_eq!(outcome.totals.total_outflow, 90_000);
        assert_eq!(outcome.totals.closing_balance, 200_000);
    }

    #[test]
    fn test_regeneration_is_idempotent() {
        let income = AccountId::new();
        let asset = AccountId::new();
        let lines = vec![
            line(income, 3, 150_000, 0, 1),
            line(asset, 9, 20_000, 0, 1),
        ];
        let map = HashMap::from([
            (income, AccountType::Income),
            (asset, AccountType::Asset),
        ]);

        let first = MovementGenerator::generate(
            period(2024, 5),
            Some(60_000),
            &lines,
            lookup(map.clone()),
        )
        .unwrap();
        let second =
            MovementGenerator::generate(period(2024, 5), Some(60_000), &lines, lookup(map))
                .unwrap();

        assert_eq!(first, second);
    }
}
