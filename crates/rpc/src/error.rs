//! Dispatch errors

use thiserror::Error;
use tollchain_core::DriverResponse;
use tollchain_crypto::CryptoError;
use tollchain_engine::GateError;
use tollchain_ledger::LedgerError;

/// Errors from sealing, placing and reopening records
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Record is not acknowledged yet: {0}")]
    NotTerminal(DriverResponse),

    #[error("Quarantine case not found: {0}")]
    CaseNotFound(usize),

    #[error("Transaction not found: block {block}, transaction {tx}")]
    TransactionNotFound { block: u64, tx: usize },

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Gate(#[from] GateError),
}
