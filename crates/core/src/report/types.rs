//! Report data types consumed by the rendering collaborator.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use provisoria_shared::PeriodKey;
use provisoria_shared::types::{CaseId, StatementId, UserId};

use crate::ledger::Direction;
use crate::statement::StatementStatus;

/// Reference data for the case a statement belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseReference {
    /// Case ID.
    pub case_id: CaseId,
    /// Tribunal docket number.
    pub rol: String,
    /// Debtor name.
    pub debtor_name: String,
    /// Case caption (carátula), if recorded.
    pub caption: Option<String>,
}

/// A statement header as the renderer sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementHeader {
    /// Statement ID.
    pub id: StatementId,
    /// The statement's period.
    pub period: PeriodKey,
    /// Lifecycle status.
    pub status: StatementStatus,
    /// Free-text observations for the court.
    pub observations: Option<String>,
    /// When the movement set was last generated.
    pub generated_at: DateTime<Utc>,
    /// Who created the statement, when recorded.
    pub created_by: Option<UserId>,
}

/// A movement row as the renderer sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMovement {
    /// Movement date.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Source document type, if any.
    pub document_type: Option<String>,
    /// Source document folio number, if any.
    pub document_number: Option<String>,
    /// Inflow or outflow.
    pub direction: Direction,
    /// Amount in whole pesos.
    pub amount: i64,
    /// Running balance after this movement.
    pub running_balance: i64,
    /// 1-based position within the statement.
    pub order_index: i32,
    /// True for the synthetic opening-balance row.
    pub is_carry_forward: bool,
}

/// Aggregated balances for the report footer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatementSummary {
    /// Balance carried in from the prior period.
    pub opening_balance: i64,
    /// Period inflow total.
    pub total_inflow: i64,
    /// Period outflow total.
    pub total_outflow: i64,
    /// Balance after the last movement.
    pub closing_balance: i64,
}

/// The complete read-only bundle handed to the rendering layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementReport {
    /// Statement header.
    pub statement: StatementHeader,
    /// The owning case's reference data.
    pub case: CaseReference,
    /// Ordered movements.
    pub movements: Vec<ReportMovement>,
    /// Balance summary.
    pub summary: StatementSummary,
    /// Deterministic export filename for the rendered PDF.
    pub export_filename: String,
}
