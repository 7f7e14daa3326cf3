//! Period statement generation and balance validation.
//!
//! This module implements the Cuenta Provisoria reconciliation engine:
//! - Movement generation with carry-forward chaining across periods
//! - The statement status state machine
//! - Balance validation over stored movement sets
//! - Error types for generation and state transitions

pub mod error;
pub mod generator;
pub mod types;
pub mod validator;

#[cfg(test)]
mod generator_props;

pub use error::{GenerationError, InvalidTransition};
pub use generator::{CARRY_FORWARD_DESCRIPTION, MovementGenerator};
pub use types::{
    GeneratedMovement, GenerationOutcome, StatementStatus, StatementTotals,
    validate_status_transition,
};
pub use validator::{BalanceValidator, MovementView, ValidationReport};
