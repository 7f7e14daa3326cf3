//! Report data assembler.
//!
//! Composes statement, case reference, movements, and summary into the
//! read-only bundle the rendering layer consumes. Pure: the caller fetches
//! the rows; this only arranges them.

use super::filename::export_filename;
use super::types::{
    CaseReference, ReportMovement, StatementHeader, StatementReport, StatementSummary,
};
use crate::statement::StatementTotals;

/// Assembles report bundles for the rendering collaborator.
pub struct ReportAssembler;

impl ReportAssembler {
    /// Builds the report bundle from pre-fetched statement data.
    ///
    /// Movements are expected in order-index order, as the statement store
    /// returns them.
    #[must_use]
    pub fn assemble(
        statement: StatementHeader,
        case: CaseReference,
        totals: StatementTotals,
        movements: Vec<ReportMovement>,
    ) -> StatementReport {
        let export_filename = export_filename(&case.rol, &case.debtor_name, statement.period);

        StatementReport {
            statement,
            case,
            movements,
            summary: StatementSummary {
                opening_balance: totals.opening_balance,
                total_inflow: totals.total_inflow,
                total_outflow: totals.total_outflow,
                closing_balance: totals.closing_balance,
            },
            export_filename,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use provisoria_shared::PeriodKey;
    use provisoria_shared::types::{CaseId, StatementId, UserId};

    use crate::ledger::Direction;
    use crate::statement::StatementStatus;

    #[test]
    fn test_assemble_report() {
        let period = PeriodKey::new(2024, 2).unwrap();
        let statement = StatementHeader {
            id: StatementId::new(),
            period,
            status: StatementStatus::Draft,
            observations: Some("Sin observaciones".to_string()),
            generated_at: Utc::now(),
            created_by: Some(UserId::new()),
        };
        let case = CaseReference {
            case_id: CaseId::new(),
            rol: "C-1234-2023".to_string(),
            debtor_name: "Juan Pérez".to_string(),
            caption: Some("Banco v. Pérez".to_string()),
        };
        let totals = StatementTotals {
            opening_balance: 100_000,
            total_inflow: 0,
            total_outflow: 30_000,
            closing_balance: 70_000,
        };
        let movements = vec![ReportMovement {
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            description: "Saldo anterior".to_string(),
            document_type: None,
            document_number: None,
            direction: Direction::Inflow,
            amount: 100_000,
            running_balance: 100_000,
            order_index: 1,
            is_carry_forward: true,
        }];

        let report = ReportAssembler::assemble(statement, case, totals, movements);

        assert_eq!(report.summary.opening_balance, 100_000);
        assert_eq!(report.summary.closing_balance, 70_000);
        assert_eq!(report.movements.len(), 1);
        assert_eq!(
            report.export_filename,
            "C-1234-2023_juan_pérez_febrero_2024.pdf"
        );
    }
}
