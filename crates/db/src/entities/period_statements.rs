//! `SeaORM` Entity for the period_statements table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::StatementStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "period_statements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub case_id: Uuid,
    pub rol: String,
    pub debtor_name: String,
    pub period_year: i32,
    pub period_month: i32,
    pub opening_balance: i64,
    pub total_inflow: i64,
    pub total_outflow: i64,
    pub closing_balance: i64,
    pub status: StatementStatus,
    pub observations: Option<String>,
    pub generated_at: DateTimeWithTimeZone,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cases::Entity",
        from = "Column::CaseId",
        to = "super::cases::Column::Id"
    )]
    Cases,
    #[sea_orm(has_many = "super::statement_movements::Entity")]
    StatementMovements,
}

impl Related<super::cases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cases.def()
    }
}

impl Related<super::statement_movements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StatementMovements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
