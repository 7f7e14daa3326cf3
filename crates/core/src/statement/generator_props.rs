//! Property-based tests for the movement generator.
//!
//! Covers the structural invariants every generated movement set must hold:
//! order contiguity, the running-balance recurrence, the balance equation,
//! and the exclusion of the carry-forward movement from period totals.

use chrono::NaiveDate;
use proptest::prelude::*;

use provisoria_shared::PeriodKey;
use provisoria_shared::types::{AccountId, VoucherId, VoucherLineId};

use super::generator::MovementGenerator;
use super::validator::{BalanceValidator, MovementView};
use crate::ledger::{AccountType, Direction, VoucherLineView};

/// Strategy for account types.
fn account_type_strategy() -> impl Strategy<Value = AccountType> {
    prop_oneof![
        Just(AccountType::Asset),
        Just(AccountType::Liability),
        Just(AccountType::Equity),
        Just(AccountType::Income),
        Just(AccountType::Expense),
    ]
}

/// Strategy for a single voucher line with its account type attached.
fn line_strategy() -> impl Strategy<Value = (VoucherLineView, AccountType)> {
    (
        account_type_strategy(),
        0i64..1_000_000,
        prop::bool::ANY,
        1u32..=28,
        1i32..=5,
    )
        .prop_map(|(account_type, total, debited, day, line_order)| {
            let debit_amount = if debited { total } else { 0 };
            let view = VoucherLineView {
                line_id: VoucherLineId::new(),
                voucher_id: VoucherId::new(),
                account_id: AccountId::new(),
                issue_date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
                description: "movimiento".to_string(),
                document_type: None,
                folio_number: None,
                total_amount: total,
                debit_amount,
                credit_amount: total - debit_amount,
                line_order,
            };
            (view, account_type)
        })
}

/// Strategy for a generation input: optional prior closing plus lines.
fn generation_input()
-> impl Strategy<Value = (Option<i64>, Vec<(VoucherLineView, AccountType)>)> {
    (
        prop::option::of(-1_000_000i64..1_000_000),
        prop::collection::vec(line_strategy(), 0..20),
    )
}

fn generate(
    prior_closing: Option<i64>,
    tagged_lines: &[(VoucherLineView, AccountType)],
) -> super::types::GenerationOutcome {
    let lines: Vec<VoucherLineView> = tagged_lines.iter().map(|(l, _)| l.clone()).collect();
    let types: std::collections::HashMap<AccountId, AccountType> = tagged_lines
        .iter()
        .map(|(l, t)| (l.account_id, *t))
        .collect();

    MovementGenerator::generate(
        PeriodKey::new(2024, 6).unwrap(),
        prior_closing,
        &lines,
        |id| types.get(&id).copied(),
    )
    .expect("generation over known accounts cannot fail")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Order indices are exactly the contiguous sequence 1..N.
    #[test]
    fn prop_order_indices_contiguous((prior, lines) in generation_input()) {
        let outcome = generate(prior, &lines);

        for (position, movement) in outcome.movements.iter().enumerate() {
            prop_assert_eq!(movement.order_index as usize, position + 1);
        }
    }

    /// balance[i] = balance[i-1] + amount (inflow) or - amount (outflow),
    /// starting from the opening balance.
    #[test]
    fn prop_running_balance_recurrence((prior, lines) in generation_input()) {
        let outcome = generate(prior, &lines);

        let mut previous = outcome.totals.opening_balance;
        for movement in &outcome.movements {
            if movement.is_carry_forward {
                prop_assert_eq!(movement.running_balance, outcome.totals.opening_balance);
            } else {
                let expected = match movement.direction {
                    Direction::Inflow => previous + movement.amount,
                    Direction::Outflow => previous - movement.amount,
                };
                prop_assert_eq!(movement.running_balance, expected);
            }
            previous = movement.running_balance;
        }
    }

    /// closing = opening + total_inflow - total_outflow, exactly.
    #[test]
    fn prop_balance_equation((prior, lines) in generation_input()) {
        let outcome = generate(prior, &lines);

        prop_assert_eq!(
            outcome.totals.closing_balance,
            outcome.totals.opening_balance + outcome.totals.total_inflow
                - outcome.totals.total_outflow
        );
    }

    /// Totals sum only non-carry-forward movements; a carry-forward exists
    /// iff a predecessor closing was supplied, and it is always first.
    #[test]
    fn prop_carry_forward_excluded_from_totals((prior, lines) in generation_input()) {
        let outcome = generate(prior, &lines);

        let carry_count = outcome
            .movements
            .iter()
            .filter(|m| m.is_carry_forward)
            .count();
        prop_assert_eq!(carry_count, usize::from(prior.is_some()));

        if prior.is_some() {
            prop_assert!(outcome.movements[0].is_carry_forward);
        }

        let inflow: i64 = outcome
            .movements
            .iter()
            .filter(|m| !m.is_carry_forward && m.direction == Direction::Inflow)
            .map(|m| m.amount)
            .sum();
        let outflow: i64 = outcome
            .movements
            .iter()
            .filter(|m| !m.is_carry_forward && m.direction == Direction::Outflow)
            .map(|m| m.amount)
            .sum();

        prop_assert_eq!(inflow, outcome.totals.total_inflow);
        prop_assert_eq!(outflow, outcome.totals.total_outflow);
    }

    /// Regenerating with unchanged inputs yields identical movement tuples.
    #[test]
    fn prop_generation_idempotent((prior, lines) in generation_input()) {
        let first = generate(prior, &lines);
        let second = generate(prior, &lines);

        prop_assert_eq!(first.totals, second.totals);
        let tuples = |o: &super::types::GenerationOutcome| {
            o.movements
                .iter()
                .map(|m| (m.direction, m.amount, m.running_balance, m.order_index))
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(tuples(&first), tuples(&second));
    }

    /// Everything the generator emits passes the balance validator.
    #[test]
    fn prop_generated_output_validates((prior, lines) in generation_input()) {
        let outcome = generate(prior, &lines);

        let views: Vec<MovementView> =
            outcome.movements.iter().map(MovementView::from).collect();
        let report = BalanceValidator::validate(&outcome.totals, &views);

        prop_assert!(report.is_valid, "validator errors: {:?}", report.errors);
    }
}
