//! The module contains the errors the engine can report.
//!
//! Settlement preconditions (empty roster, no expenses) surface as
//! [`NothingToSettle`]; everything else is a boundary rejection raised while
//! building members and expenses or mutating a [`Ledger`].
//!
//! Orphaned references and zero-headcount expenses inside the settlement
//! pipeline are tolerated silently and never become errors.
//!
//! [`NothingToSettle`]: EngineError::NothingToSettle
//! [`Ledger`]: super::Ledger
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("Nothing to settle: {0}")]
    NothingToSettle(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid member: {0}")]
    InvalidMember(String),
    #[error("Invalid expense: {0}")]
    InvalidExpense(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
}
