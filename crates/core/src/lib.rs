//! Core business logic for Provisoria.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, the reconciliation algorithm, and the
//! validation rules live here.
//!
//! # Modules
//!
//! - `ledger` - Read-only voucher/account views and the account classifier
//! - `statement` - Period statement generation and balance validation
//! - `report` - Report data assembly for the rendering collaborator

pub mod ledger;
pub mod report;
pub mod statement;
