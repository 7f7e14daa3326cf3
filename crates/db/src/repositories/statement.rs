//! Period statement repository.
//!
//! Owns the statement rows and their movement sets. A movement set is
//! computed in full by the pure generator before anything is written, then
//! replaced as a unit inside one transaction. Regenerations of the same
//! statement are serialized through a per-statement lock, so concurrent
//! requests cannot interleave their delete-and-insert phases.

use std::sync::Arc;

use dashmap::DashMap;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use tokio::sync::Mutex;
use uuid::Uuid;

use provisoria_core::statement::{
    GeneratedMovement, GenerationError, GenerationOutcome, InvalidTransition, MovementGenerator,
    StatementStatus, validate_status_transition,
};
use provisoria_shared::{PeriodError, PeriodKey};

use crate::entities::{
    period_statements, sea_orm_active_enums, statement_movements,
};
use crate::repositories::{CaseRepository, LedgerSourceRepository};

/// Error types for statement operations.
#[derive(Debug, thiserror::Error)]
pub enum StatementError {
    /// A statement already exists for this case and period.
    #[error("A statement already exists for period {year}-{month:02}")]
    DuplicatePeriod {
        /// Period year.
        year: i32,
        /// Period month.
        month: u32,
    },

    /// Statement not found.
    #[error("Statement not found: {0}")]
    StatementNotFound(Uuid),

    /// Case not found.
    #[error("Case not found: {0}")]
    CaseNotFound(Uuid),

    /// The requested period is not a valid calendar month.
    #[error("Invalid period: {0}")]
    InvalidPeriod(#[from] PeriodError),

    /// Only draft statements may be regenerated.
    #[error("Statement {0} is no longer a draft and cannot be regenerated")]
    NotDraft(Uuid),

    /// Invalid status transition.
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    /// Movement generation failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a period statement.
#[derive(Debug, Clone)]
pub struct CreateStatementInput {
    /// The owning case.
    pub case_id: Uuid,
    /// Period year.
    pub period_year: i32,
    /// Period month (1-12).
    pub period_month: u32,
    /// Free-text observations for the court.
    pub observations: Option<String>,
    /// Who created the statement.
    pub created_by: Option<Uuid>,
}

/// A statement with its ordered movement set.
#[derive(Debug, Clone)]
pub struct StatementWithMovements {
    /// The statement row.
    pub statement: period_statements::Model,
    /// Movements in order-index order.
    pub movements: Vec<statement_movements::Model>,
}

/// Aggregated figures over a set of one case's statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct FinancialSummary {
    /// Number of matching statements.
    pub statement_count: usize,
    /// Inflow total across the matching statements.
    pub total_inflow: i64,
    /// Outflow total across the matching statements.
    pub total_outflow: i64,
    /// Sum of the closing balances of the matching statements.
    pub total_closing: i64,
}

/// Period statement repository.
#[derive(Debug, Clone)]
pub struct StatementRepository {
    db: DatabaseConnection,
    cases: CaseRepository,
    ledger: LedgerSourceRepository,
    regeneration_locks: Arc<DashMap<Uuid, Arc<Mutex<()>>>>,
}

impl StatementRepository {
    /// Creates a new statement repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            cases: CaseRepository::new(db.clone()),
            ledger: LedgerSourceRepository::new(db.clone()),
            db,
            regeneration_locks: Arc::new(DashMap::new()),
        }
    }

    /// Creates a statement for a case and period, generating its movement
    /// set immediately.
    ///
    /// The case's rol and debtor name are snapshotted onto the statement,
    /// so a later correction of the case row cannot rewrite a statement
    /// already filed with the court. The movement set is generated in full
    /// before any row is written; a generation failure leaves no statement
    /// behind.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The period is not a valid calendar month
    /// - The case does not exist
    /// - A statement already exists for the (case, period) pair
    /// - Movement generation or a database operation fails
    pub async fn create(
        &self,
        input: CreateStatementInput,
    ) -> Result<StatementWithMovements, StatementError> {
        let period = PeriodKey::new(input.period_year, input.period_month)?;

        let case = self
            .cases
            .find_by_id(input.case_id)
            .await?
            .ok_or(StatementError::CaseNotFound(input.case_id))?;

        let existing = period_statements::Entity::find()
            .filter(period_statements::Column::CaseId.eq(input.case_id))
            .filter(period_statements::Column::PeriodYear.eq(period.year))
            .filter(period_statements::Column::PeriodMonth.eq(month_column(period.month)))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(StatementError::DuplicatePeriod {
                year: period.year,
                month: period.month,
            });
        }

        let outcome = self.generate_for(input.case_id, period).await?;
        let totals = outcome.totals;

        let now = chrono::Utc::now().into();
        let statement_id = Uuid::new_v4();
        let txn = self.db.begin().await?;

        let statement = period_statements::ActiveModel {
            id: Set(statement_id),
            case_id: Set(input.case_id),
            rol: Set(case.rol),
            debtor_name: Set(case.debtor_name),
            period_year: Set(period.year),
            period_month: Set(month_column(period.month)),
            opening_balance: Set(totals.opening_balance),
            total_inflow: Set(totals.total_inflow),
            total_outflow: Set(totals.total_outflow),
            closing_balance: Set(totals.closing_balance),
            status: Set(sea_orm_active_enums::StatementStatus::Draft),
            observations: Set(input.observations),
            generated_at: Set(now),
            created_by: Set(input.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let mut inserted = Vec::with_capacity(outcome.movements.len());
        for movement in &outcome.movements {
            let model = movement_active_model(statement_id, movement, now);
            inserted.push(model.insert(&txn).await?);
        }

        txn.commit().await?;

        tracing::info!(
            statement_id = %statement.id,
            case_id = %statement.case_id,
            movement_count = inserted.len(),
            closing_balance = totals.closing_balance,
            "Statement created"
        );

        Ok(StatementWithMovements {
            statement,
            movements: inserted,
        })
    }

    /// Finds a statement by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<period_statements::Model>, StatementError> {
        let statement = period_statements::Entity::find_by_id(id).one(&self.db).await?;
        Ok(statement)
    }

    /// Lists a case's statements, most recent period first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_case(
        &self,
        case_id: Uuid,
    ) -> Result<Vec<period_statements::Model>, StatementError> {
        let statements = period_statements::Entity::find()
            .filter(period_statements::Column::CaseId.eq(case_id))
            .order_by_desc(period_statements::Column::PeriodYear)
            .order_by_desc(period_statements::Column::PeriodMonth)
            .all(&self.db)
            .await?;
        Ok(statements)
    }

    /// Fetches a statement's movements in order-index order.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement does not exist or the query fails.
    pub async fn movements(
        &self,
        statement_id: Uuid,
    ) -> Result<Vec<statement_movements::Model>, StatementError> {
        self.find_by_id(statement_id)
            .await?
            .ok_or(StatementError::StatementNotFound(statement_id))?;

        let movements = statement_movements::Entity::find()
            .filter(statement_movements::Column::StatementId.eq(statement_id))
            .order_by_asc(statement_movements::Column::OrderIndex)
            .all(&self.db)
            .await?;
        Ok(movements)
    }

    /// Regenerates a draft statement's movement set from the current
    /// ledger source.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The statement does not exist
    /// - The statement is no longer a draft
    /// - Movement generation or a database operation fails
    pub async fn regenerate(
        &self,
        statement_id: Uuid,
    ) -> Result<StatementWithMovements, StatementError> {
        let statement = self
            .find_by_id(statement_id)
            .await?
            .ok_or(StatementError::StatementNotFound(statement_id))?;

        if statement.status != sea_orm_active_enums::StatementStatus::Draft {
            return Err(StatementError::NotDraft(statement_id));
        }

        self.regenerate_inner(statement).await
    }

    /// Updates a statement's status along the draft, approved, submitted
    /// chain. Writing the current status again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The statement does not exist
    /// - The transition is not a forward step in the chain
    /// - A database operation fails
    pub async fn update_status(
        &self,
        statement_id: Uuid,
        new_status: StatementStatus,
    ) -> Result<period_statements::Model, StatementError> {
        let statement = self
            .find_by_id(statement_id)
            .await?
            .ok_or(StatementError::StatementNotFound(statement_id))?;

        let current: StatementStatus = statement.status.clone().into();
        validate_status_transition(current, new_status)?;

        if current == new_status {
            return Ok(statement);
        }

        let mut active: period_statements::ActiveModel = statement.into();
        active.status = Set(new_status.into());
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Aggregates a case's statements for one year into a financial
    /// summary, narrowed to a single period when a month is given.
    ///
    /// All-zero figures when no statements match.
    ///
    /// # Errors
    ///
    /// Returns an error if the period is invalid, the case does not exist,
    /// or a query fails.
    pub async fn financial_summary(
        &self,
        case_id: Uuid,
        year: i32,
        month: Option<u32>,
    ) -> Result<FinancialSummary, StatementError> {
        PeriodKey::new(year, month.unwrap_or(1))?;

        self.cases
            .find_by_id(case_id)
            .await?
            .ok_or(StatementError::CaseNotFound(case_id))?;

        let mut query = period_statements::Entity::find()
            .filter(period_statements::Column::CaseId.eq(case_id))
            .filter(period_statements::Column::PeriodYear.eq(year));
        if let Some(month) = month {
            query = query.filter(period_statements::Column::PeriodMonth.eq(month_column(month)));
        }

        let statements = query.all(&self.db).await?;
        Ok(fold_summary(&statements))
    }

    /// Computes the full movement set, then swaps it in atomically.
    ///
    /// The generator runs to completion before the transaction starts; a
    /// generation failure leaves the stored set untouched.
    async fn regenerate_inner(
        &self,
        statement: period_statements::Model,
    ) -> Result<StatementWithMovements, StatementError> {
        let lock = self
            .regeneration_locks
            .entry(statement.id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        let period = PeriodKey::new(statement.period_year, month_value(statement.period_month))?;
        let outcome = self.generate_for(statement.case_id, period).await?;

        let now = chrono::Utc::now().into();
        let txn = self.db.begin().await?;

        statement_movements::Entity::delete_many()
            .filter(statement_movements::Column::StatementId.eq(statement.id))
            .exec(&txn)
            .await?;

        let mut inserted = Vec::with_capacity(outcome.movements.len());
        for movement in &outcome.movements {
            let model = movement_active_model(statement.id, movement, now);
            inserted.push(model.insert(&txn).await?);
        }

        let totals = outcome.totals;
        let mut active: period_statements::ActiveModel = statement.into();
        active.opening_balance = Set(totals.opening_balance);
        active.total_inflow = Set(totals.total_inflow);
        active.total_outflow = Set(totals.total_outflow);
        active.closing_balance = Set(totals.closing_balance);
        active.generated_at = Set(now);
        active.updated_at = Set(now);
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        tracing::info!(
            statement_id = %updated.id,
            movement_count = inserted.len(),
            closing_balance = totals.closing_balance,
            "Statement movements regenerated"
        );

        Ok(StatementWithMovements {
            statement: updated,
            movements: inserted,
        })
    }

    /// Runs the pure generator over the case's ledger source for one
    /// period. No writes happen here.
    async fn generate_for(
        &self,
        case_id: Uuid,
        period: PeriodKey,
    ) -> Result<GenerationOutcome, StatementError> {
        let prior_closing = self.prior_closing_balance(case_id, period).await?;

        let lines = self.ledger.voucher_lines_for_period(case_id, period).await?;
        let account_types = self.ledger.account_types().await?;

        let outcome = MovementGenerator::generate(period, prior_closing, &lines, |account_id| {
            account_types.get(&account_id).copied()
        })?;
        Ok(outcome)
    }

    /// Looks up the closing balance of the immediately preceding period's
    /// statement, if one exists.
    async fn prior_closing_balance(
        &self,
        case_id: Uuid,
        period: PeriodKey,
    ) -> Result<Option<i64>, StatementError> {
        let prior = period.prev();
        let statement = period_statements::Entity::find()
            .filter(period_statements::Column::CaseId.eq(case_id))
            .filter(period_statements::Column::PeriodYear.eq(prior.year))
            .filter(period_statements::Column::PeriodMonth.eq(month_column(prior.month)))
            .one(&self.db)
            .await?;

        Ok(statement.map(|s| s.closing_balance))
    }
}

/// Builds the active model for one generated movement.
fn movement_active_model(
    statement_id: Uuid,
    movement: &GeneratedMovement,
    now: chrono::DateTime<chrono::FixedOffset>,
) -> statement_movements::ActiveModel {
    statement_movements::ActiveModel {
        id: Set(Uuid::new_v4()),
        statement_id: Set(statement_id),
        movement_date: Set(movement.date),
        description: Set(movement.description.clone()),
        document_type: Set(movement.document_type.clone()),
        document_number: Set(movement.document_number.clone()),
        direction: Set(movement.direction.into()),
        amount: Set(movement.amount),
        running_balance: Set(movement.running_balance),
        order_index: Set(movement.order_index),
        is_carry_forward: Set(movement.is_carry_forward),
        account_id: Set(movement.account_id.map(provisoria_shared::types::AccountId::into_inner)),
        voucher_id: Set(movement.voucher_id.map(provisoria_shared::types::VoucherId::into_inner)),
        created_at: Set(now),
    }
}

/// Folds statement rows into a case-level financial summary.
///
/// All three money figures are straight sums over the matching rows, so
/// callers may pass statements in any order.
fn fold_summary(statements: &[period_statements::Model]) -> FinancialSummary {
    let mut total_inflow: i64 = 0;
    let mut total_outflow: i64 = 0;
    let mut total_closing: i64 = 0;

    for statement in statements {
        total_inflow += statement.total_inflow;
        total_outflow += statement.total_outflow;
        total_closing += statement.closing_balance;
    }

    FinancialSummary {
        statement_count: statements.len(),
        total_inflow,
        total_outflow,
        total_closing,
    }
}

/// Narrows a period month to the INTEGER column type.
///
/// `PeriodKey` guarantees months stay within 1..=12.
#[allow(clippy::cast_possible_wrap)]
const fn month_column(month: u32) -> i32 {
    month as i32
}

/// Widens the INTEGER column back to the period month type.
#[allow(clippy::cast_sign_loss)]
const fn month_value(month: i32) -> u32 {
    month as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::prelude::DateTimeWithTimeZone;

    fn statement_row(
        year: i32,
        month: i32,
        total_inflow: i64,
        total_outflow: i64,
        closing_balance: i64,
    ) -> period_statements::Model {
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        period_statements::Model {
            id: Uuid::new_v4(),
            case_id: Uuid::new_v4(),
            rol: "C-1234-2024".to_string(),
            debtor_name: "Comercial Andina SpA".to_string(),
            period_year: year,
            period_month: month,
            opening_balance: 0,
            total_inflow,
            total_outflow,
            closing_balance,
            status: sea_orm_active_enums::StatementStatus::Draft,
            observations: None,
            generated_at: now,
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_fold_summary_empty() {
        let summary = fold_summary(&[]);
        assert_eq!(summary.statement_count, 0);
        assert_eq!(summary.total_inflow, 0);
        assert_eq!(summary.total_outflow, 0);
        assert_eq!(summary.total_closing, 0);
    }

    #[test]
    fn test_fold_summary_sums_all_figures() {
        let statements = vec![
            statement_row(2024, 3, 50_000, 20_000, 130_000),
            statement_row(2024, 1, 100_000, 0, 100_000),
            statement_row(2024, 2, 0, 0, 100_000),
        ];

        let summary = fold_summary(&statements);

        assert_eq!(summary.statement_count, 3);
        assert_eq!(summary.total_inflow, 150_000);
        assert_eq!(summary.total_outflow, 20_000);
        assert_eq!(summary.total_closing, 330_000);
    }

    #[test]
    fn test_fold_summary_single_statement() {
        let statements = vec![statement_row(2024, 7, 80_000, 30_000, 50_000)];

        let summary = fold_summary(&statements);

        assert_eq!(summary.statement_count, 1);
        assert_eq!(summary.total_closing, 50_000);
    }
}
