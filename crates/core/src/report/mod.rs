//! Report data assembly for the rendering collaborator.

pub mod assembler;
pub mod filename;
pub mod types;

pub use assembler::ReportAssembler;
pub use filename::{export_filename, sanitize_debtor_name};
pub use types::{
    CaseReference, ReportMovement, StatementHeader, StatementReport, StatementSummary,
};
