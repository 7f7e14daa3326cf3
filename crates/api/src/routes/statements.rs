//! Period statement routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use provisoria_core::report::{CaseReference, ReportAssembler, ReportMovement, StatementHeader};
use provisoria_core::statement::{BalanceValidator, MovementView, StatementStatus, StatementTotals};
use provisoria_db::entities::{period_statements, sea_orm_active_enums, statement_movements};
use provisoria_db::{CaseRepository, CreateStatementInput, StatementError, StatementRepository};
use provisoria_shared::PeriodKey;
use provisoria_shared::types::{CaseId, StatementId, UserId};

use crate::AppState;

/// Creates the statement routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cases/{case_id}/statements", post(create_statement))
        .route("/cases/{case_id}/statements", get(list_statements))
        .route("/cases/{case_id}/statements/summary", get(financial_summary))
        .route("/statements/{id}", get(get_statement))
        .route("/statements/{id}/movements", get(list_movements))
        .route("/statements/{id}/regenerate", post(regenerate_statement))
        .route("/statements/{id}/status", patch(update_status))
        .route("/statements/{id}/validate", get(validate_statement))
        .route("/statements/{id}/report", get(get_report))
}

/// Request body for creating a statement.
#[derive(Debug, Deserialize)]
pub struct CreateStatementRequest {
    /// Period year.
    pub period_year: i32,
    /// Period month (1-12).
    pub period_month: u32,
    /// Free-text observations for the court.
    pub observations: Option<String>,
    /// The creating user, when known.
    pub created_by: Option<Uuid>,
}

/// Request body for updating statement status.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// New status: "draft", "approved", or "submitted".
    pub status: String,
}

/// Query parameters for the financial summary.
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// The year to summarize.
    pub year: Option<i32>,
    /// Narrows the summary to one period within the year.
    pub month: Option<u32>,
}

/// Response for a period statement.
#[derive(Debug, Serialize)]
pub struct StatementResponse {
    /// Statement ID.
    pub id: Uuid,
    /// The owning case.
    pub case_id: Uuid,
    /// Court docket number, snapshotted at creation.
    pub rol: String,
    /// Debtor name, snapshotted at creation.
    pub debtor_name: String,
    /// Period year.
    pub period_year: i32,
    /// Period month.
    pub period_month: i32,
    /// Period label, e.g. "2024-03".
    pub period: String,
    /// Balance carried in from the prior period.
    pub opening_balance: i64,
    /// Sum of period inflows.
    pub total_inflow: i64,
    /// Sum of period outflows.
    pub total_outflow: i64,
    /// Balance after the last movement.
    pub closing_balance: i64,
    /// Status: draft, approved, or submitted.
    pub status: String,
    /// Observations for the court.
    pub observations: Option<String>,
    /// When the movement set was last generated.
    pub generated_at: DateTime<Utc>,
    /// Who created the statement.
    pub created_by: Option<Uuid>,
}

impl From<period_statements::Model> for StatementResponse {
    fn from(model: period_statements::Model) -> Self {
        let period = format!("{}-{:02}", model.period_year, model.period_month);
        Self {
            id: model.id,
            case_id: model.case_id,
            rol: model.rol,
            debtor_name: model.debtor_name,
            period_year: model.period_year,
            period_month: model.period_month,
            period,
            opening_balance: model.opening_balance,
            total_inflow: model.total_inflow,
            total_outflow: model.total_outflow,
            closing_balance: model.closing_balance,
            status: status_to_string(&model.status),
            observations: model.observations,
            generated_at: model.generated_at.with_timezone(&Utc),
            created_by: model.created_by,
        }
    }
}

/// Response for a statement movement.
#[derive(Debug, Serialize)]
pub struct MovementResponse {
    /// Movement ID.
    pub id: Uuid,
    /// Movement date.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Source document type, if any.
    pub document_type: Option<String>,
    /// Source document folio number, if any.
    pub document_number: Option<String>,
    /// Direction: inflow or outflow.
    pub direction: String,
    /// Amount in whole pesos.
    pub amount: i64,
    /// Running balance after this movement.
    pub running_balance: i64,
    /// 1-based position within the statement.
    pub order_index: i32,
    /// True for the synthetic opening-balance row.
    pub is_carry_forward: bool,
    /// The classified account, absent for the carry-forward row.
    pub account_id: Option<Uuid>,
    /// The source voucher, absent for the carry-forward row.
    pub voucher_id: Option<Uuid>,
}

impl From<statement_movements::Model> for MovementResponse {
    fn from(model: statement_movements::Model) -> Self {
        Self {
            id: model.id,
            date: model.movement_date,
            description: model.description,
            document_type: model.document_type,
            document_number: model.document_number,
            direction: direction_to_string(&model.direction),
            amount: model.amount,
            running_balance: model.running_balance,
            order_index: model.order_index,
            is_carry_forward: model.is_carry_forward,
            account_id: model.account_id,
            voucher_id: model.voucher_id,
        }
    }
}

/// POST `/cases/{case_id}/statements` - Create a statement and generate
/// its movement set.
async fn create_statement(
    State(state): State<AppState>,
    Path(case_id): Path<Uuid>,
    Json(payload): Json<CreateStatementRequest>,
) -> impl IntoResponse {
    let repo = StatementRepository::new((*state.db).clone());

    let input = CreateStatementInput {
        case_id,
        period_year: payload.period_year,
        period_month: payload.period_month,
        observations: payload.observations,
        created_by: payload.created_by,
    };

    match repo.create(input).await {
        Ok(result) => {
            info!(
                case_id = %case_id,
                statement_id = %result.statement.id,
                movement_count = result.movements.len(),
                "Statement created"
            );

            let movements: Vec<MovementResponse> =
                result.movements.into_iter().map(Into::into).collect();
            (
                StatusCode::CREATED,
                Json(json!({
                    "statement": StatementResponse::from(result.statement),
                    "movements": movements,
                })),
            )
                .into_response()
        }
        Err(e) => statement_error_response(&e),
    }
}

/// GET `/cases/{case_id}/statements` - List a case's statements, most
/// recent period first.
async fn list_statements(
    State(state): State<AppState>,
    Path(case_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = StatementRepository::new((*state.db).clone());

    match repo.list_by_case(case_id).await {
        Ok(statements) => {
            let response: Vec<StatementResponse> =
                statements.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(json!({ "statements": response }))).into_response()
        }
        Err(e) => statement_error_response(&e),
    }
}

/// GET `/cases/{case_id}/statements/summary` - Aggregate a case's
/// statements into a financial summary.
async fn financial_summary(
    State(state): State<AppState>,
    Path(case_id): Path<Uuid>,
    Query(params): Query<SummaryQuery>,
) -> impl IntoResponse {
    let Some(year) = params.year else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_period",
                "message": "year query parameter is required"
            })),
        )
            .into_response();
    };

    let repo = StatementRepository::new((*state.db).clone());

    match repo.financial_summary(case_id, year, params.month).await {
        Ok(summary) => (StatusCode::OK, Json(json!(summary))).into_response(),
        Err(e) => statement_error_response(&e),
    }
}

/// GET `/statements/{id}` - Fetch one statement.
async fn get_statement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = StatementRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(Some(statement)) => {
            (StatusCode::OK, Json(json!(StatementResponse::from(statement)))).into_response()
        }
        Ok(None) => statement_not_found(id),
        Err(e) => statement_error_response(&e),
    }
}

/// GET `/statements/{id}/movements` - Fetch a statement's movements in
/// order-index order.
async fn list_movements(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = StatementRepository::new((*state.db).clone());

    match repo.movements(id).await {
        Ok(movements) => {
            let response: Vec<MovementResponse> =
                movements.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(json!({ "movements": response }))).into_response()
        }
        Err(e) => statement_error_response(&e),
    }
}

/// POST `/statements/{id}/regenerate` - Rebuild a draft statement's
/// movement set from the current ledger source.
async fn regenerate_statement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = StatementRepository::new((*state.db).clone());

    match repo.regenerate(id).await {
        Ok(result) => {
            info!(
                statement_id = %id,
                movement_count = result.movements.len(),
                "Statement regenerated"
            );

            let movements: Vec<MovementResponse> =
                result.movements.into_iter().map(Into::into).collect();
            (
                StatusCode::OK,
                Json(json!({
                    "statement": StatementResponse::from(result.statement),
                    "movements": movements,
                })),
            )
                .into_response()
        }
        Err(e) => statement_error_response(&e),
    }
}

/// PATCH `/statements/{id}/status` - Advance a statement along the
/// draft, approved, submitted chain.
async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> impl IntoResponse {
    let Some(new_status) = string_to_status(&payload.status) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_status",
                "message": "Invalid status. Must be one of: draft, approved, submitted"
            })),
        )
            .into_response();
    };

    let repo = StatementRepository::new((*state.db).clone());

    match repo.update_status(id, new_status).await {
        Ok(updated) => {
            info!(
                statement_id = %id,
                new_status = %payload.status,
                "Statement status updated"
            );
            (StatusCode::OK, Json(json!(StatementResponse::from(updated)))).into_response()
        }
        Err(e) => statement_error_response(&e),
    }
}

/// GET `/statements/{id}/validate` - Recompute totals from the stored
/// movements and report every mismatch.
async fn validate_statement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = StatementRepository::new((*state.db).clone());

    let statement = match repo.find_by_id(id).await {
        Ok(Some(statement)) => statement,
        Ok(None) => return statement_not_found(id),
        Err(e) => return statement_error_response(&e),
    };

    let movements = match repo.movements(id).await {
        Ok(movements) => movements,
        Err(e) => return statement_error_response(&e),
    };

    let totals = StatementTotals {
        opening_balance: statement.opening_balance,
        total_inflow: statement.total_inflow,
        total_outflow: statement.total_outflow,
        closing_balance: statement.closing_balance,
    };
    let views: Vec<MovementView> = movements
        .iter()
        .map(|m| MovementView {
            direction: m.direction.clone().into(),
            amount: m.amount,
            running_balance: m.running_balance,
            order_index: m.order_index,
            is_carry_forward: m.is_carry_forward,
        })
        .collect();

    let report = BalanceValidator::validate(&totals, &views);
    (StatusCode::OK, Json(json!(report))).into_response()
}

/// GET `/statements/{id}/report` - Assemble the read-only report bundle
/// for the rendering layer.
async fn get_report(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = StatementRepository::new((*state.db).clone());
    let case_repo = CaseRepository::new((*state.db).clone());

    let statement = match repo.find_by_id(id).await {
        Ok(Some(statement)) => statement,
        Ok(None) => return statement_not_found(id),
        Err(e) => return statement_error_response(&e),
    };

    let case = match case_repo.find_by_id(statement.case_id).await {
        Ok(Some(case)) => case,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "case_not_found",
                    "message": "Case not found"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error loading case");
            return internal_error();
        }
    };

    let movements = match repo.movements(id).await {
        Ok(movements) => movements,
        Err(e) => return statement_error_response(&e),
    };

    let period = match PeriodKey::new(statement.period_year, u32::try_from(statement.period_month).unwrap_or(0)) {
        Ok(period) => period,
        Err(e) => {
            error!(error = %e, statement_id = %id, "Stored period is invalid");
            return internal_error();
        }
    };

    let header = StatementHeader {
        id: StatementId::from_uuid(statement.id),
        period,
        status: statement.status.into(),
        observations: statement.observations,
        generated_at: statement.generated_at.with_timezone(&Utc),
        created_by: statement.created_by.map(UserId::from_uuid),
    };
    // rol and debtor name come from the statement's creation-time snapshot,
    // not the live case row.
    let case_ref = CaseReference {
        case_id: CaseId::from_uuid(case.id),
        rol: statement.rol,
        debtor_name: statement.debtor_name,
        caption: case.caption,
    };
    let totals = StatementTotals {
        opening_balance: statement.opening_balance,
        total_inflow: statement.total_inflow,
        total_outflow: statement.total_outflow,
        closing_balance: statement.closing_balance,
    };
    let report_movements: Vec<ReportMovement> = movements
        .into_iter()
        .map(|m| ReportMovement {
            date: m.movement_date,
            description: m.description,
            document_type: m.document_type,
            document_number: m.document_number,
            direction: m.direction.into(),
            amount: m.amount,
            running_balance: m.running_balance,
            order_index: m.order_index,
            is_carry_forward: m.is_carry_forward,
        })
        .collect();

    let report = ReportAssembler::assemble(header, case_ref, totals, report_movements);
    (StatusCode::OK, Json(json!(report))).into_response()
}

// Helper functions

fn statement_error_response(e: &StatementError) -> Response {
    match e {
        StatementError::DuplicatePeriod { year, month } => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "duplicate_period",
                "message": format!("A statement already exists for period {year}-{month:02}")
            })),
        )
            .into_response(),
        StatementError::StatementNotFound(id) => statement_not_found(*id),
        StatementError::CaseNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "case_not_found",
                "message": "Case not found"
            })),
        )
            .into_response(),
        StatementError::InvalidPeriod(err) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_period",
                "message": err.to_string()
            })),
        )
            .into_response(),
        StatementError::NotDraft(_) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "not_draft",
                "message": "Only draft statements can be regenerated"
            })),
        )
            .into_response(),
        StatementError::InvalidTransition(err) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_status_transition",
                "message": err.to_string()
            })),
        )
            .into_response(),
        StatementError::Generation(err) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "generation_failed",
                "message": err.to_string()
            })),
        )
            .into_response(),
        StatementError::Database(err) => {
            error!(error = %err, "Database error in statement operation");
            internal_error()
        }
    }
}

fn statement_not_found(id: Uuid) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "statement_not_found",
            "message": format!("Statement not found: {id}")
        })),
    )
        .into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An error occurred"
        })),
    )
        .into_response()
}

fn status_to_string(status: &sea_orm_active_enums::StatementStatus) -> String {
    match status {
        sea_orm_active_enums::StatementStatus::Draft => "draft".to_string(),
        sea_orm_active_enums::StatementStatus::Approved => "approved".to_string(),
        sea_orm_active_enums::StatementStatus::Submitted => "submitted".to_string(),
    }
}

fn direction_to_string(direction: &sea_orm_active_enums::MovementDirection) -> String {
    match direction {
        sea_orm_active_enums::MovementDirection::Inflow => "inflow".to_string(),
        sea_orm_active_enums::MovementDirection::Outflow => "outflow".to_string(),
    }
}

fn string_to_status(s: &str) -> Option<StatementStatus> {
    match s.to_lowercase().as_str() {
        "draft" => Some(StatementStatus::Draft),
        "approved" => Some(StatementStatus::Approved),
        "submitted" => Some(StatementStatus::Submitted),
        _ => None,
    }
}
