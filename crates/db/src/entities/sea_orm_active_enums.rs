//! `SeaORM` active enums mirroring the Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Chart-of-accounts classification.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account.
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Liability account.
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Equity account.
    #[sea_orm(string_value = "equity")]
    Equity,
    /// Income account.
    #[sea_orm(string_value = "income")]
    Income,
    /// Expense account.
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<AccountType> for provisoria_core::ledger::AccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Equity => Self::Equity,
            AccountType::Income => Self::Income,
            AccountType::Expense => Self::Expense,
        }
    }
}

/// Voucher lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "voucher_status")]
#[serde(rename_all = "lowercase")]
pub enum VoucherStatus {
    /// Voucher is being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Voucher has been issued.
    #[sea_orm(string_value = "issued")]
    Issued,
    /// Voucher has been voided.
    #[sea_orm(string_value = "voided")]
    Voided,
}

/// Period statement lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "statement_status")]
#[serde(rename_all = "lowercase")]
pub enum StatementStatus {
    /// Statement is being prepared.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Statement has been approved.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Statement has been submitted to the tribunal.
    #[sea_orm(string_value = "submitted")]
    Submitted,
}

impl From<StatementStatus> for provisoria_core::statement::StatementStatus {
    fn from(value: StatementStatus) -> Self {
        match value {
            StatementStatus::Draft => Self::Draft,
            StatementStatus::Approved => Self::Approved,
            StatementStatus::Submitted => Self::Submitted,
        }
    }
}

impl From<provisoria_core::statement::StatementStatus> for StatementStatus {
    fn from(value: provisoria_core::statement::StatementStatus) -> Self {
        match value {
            provisoria_core::statement::StatementStatus::Draft => Self::Draft,
            provisoria_core::statement::StatementStatus::Approved => Self::Approved,
            provisoria_core::statement::StatementStatus::Submitted => Self::Submitted,
        }
    }
}

/// Movement direction.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "movement_direction")]
#[serde(rename_all = "lowercase")]
pub enum MovementDirection {
    /// Money entering the trust account.
    #[sea_orm(string_value = "inflow")]
    Inflow,
    /// Money leaving the trust account.
    #[sea_orm(string_value = "outflow")]
    Outflow,
}

impl From<MovementDirection> for provisoria_core::ledger::Direction {
    fn from(value: MovementDirection) -> Self {
        match value {
            MovementDirection::Inflow => Self::Inflow,
            MovementDirection::Outflow => Self::Outflow,
        }
    }
}

impl From<provisoria_core::ledger::Direction> for MovementDirection {
    fn from(value: provisoria_core::ledger::Direction) -> Self {
        match value {
            provisoria_core::ledger::Direction::Inflow => Self::Inflow,
            provisoria_core::ledger::Direction::Outflow => Self::Outflow,
        }
    }
}
