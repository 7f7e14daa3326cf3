//! `SeaORM` Entity for the statement_movements table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::MovementDirection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "statement_movements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub statement_id: Uuid,
    pub movement_date: Date,
    pub description: String,
    pub document_type: Option<String>,
    pub document_number: Option<String>,
    pub direction: MovementDirection,
    pub amount: i64,
    pub running_balance: i64,
    pub order_index: i32,
    pub is_carry_forward: bool,
    pub account_id: Option<Uuid>,
    pub voucher_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::period_statements::Entity",
        from = "Column::StatementId",
        to = "super::period_statements::Column::Id"
    )]
    PeriodStatements,
}

impl Related<super::period_statements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PeriodStatements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
