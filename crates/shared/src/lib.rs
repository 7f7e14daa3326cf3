//! Shared types, errors, and configuration for Provisoria.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - The period key identifying one trust-account statement per case
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use types::{PeriodError, PeriodKey};
