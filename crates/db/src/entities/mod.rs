//! `SeaORM` entity definitions.

pub mod accounts;
pub mod cases;
pub mod period_statements;
pub mod sea_orm_active_enums;
pub mod statement_movements;
pub mod voucher_lines;
pub mod vouchers;
