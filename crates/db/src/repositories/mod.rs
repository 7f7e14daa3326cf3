//! Repository layer for database operations.

pub mod case;
pub mod ledger_source;
pub mod statement;

pub use case::CaseRepository;
pub use ledger_source::LedgerSourceRepository;
pub use statement::{
    CreateStatementInput, FinancialSummary, StatementError, StatementRepository,
    StatementWithMovements,
};
