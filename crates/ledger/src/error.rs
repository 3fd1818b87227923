//! Ledger errors

use crate::hash::ChainError;
use thiserror::Error;

/// Errors that can occur in ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A transaction was offered to the store that must never hold it
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("No pending transactions to mine")]
    NoPendingTransactions,

    #[error("Chain integrity error: {0}")]
    ChainIntegrity(#[from] ChainError),
}
