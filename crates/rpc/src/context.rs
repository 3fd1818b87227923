//! Application context - wires everything together

use crate::config::AppConfig;
use crate::dispatch::RoutingDispatcher;
use crate::error::DispatchError;
use serde::{Deserialize, Serialize};
use tollchain_core::AcknowledgedRecord;
use tollchain_crypto::{CipherKey, CryptoError, PayloadCipher};
use tollchain_ledger::{Block, LedgerError, LedgerStore, QuarantineStore, Transaction};

/// Application context - owns the process-lifetime services
///
/// Built once at startup and passed by reference; there are no globals.
pub struct AppContext {
    cipher: PayloadCipher,
    ledger: LedgerStore,
    quarantine: QuarantineStore,
}

/// `{chain, pending, quarantine}` snapshot for presentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    pub chain: Vec<Block>,
    pub pending: Vec<Transaction>,
    pub quarantine: Vec<Transaction>,
}

impl AppContext {
    /// Create a context with a fresh ledger (genesis only) and empty quarantine
    pub fn new(key: &CipherKey) -> Self {
        Self {
            cipher: PayloadCipher::new(key),
            ledger: LedgerStore::new(),
            quarantine: QuarantineStore::new(),
        }
    }

    /// Resolve the key from configuration, then build the context
    pub fn from_config(config: &AppConfig) -> Result<Self, CryptoError> {
        let key = config.resolve_key()?;
        Ok(Self::new(&key))
    }

    pub fn dispatcher(&self) -> RoutingDispatcher<'_> {
        RoutingDispatcher::new(&self.cipher, &self.ledger, &self.quarantine)
    }

    pub fn cipher(&self) -> &PayloadCipher {
        &self.cipher
    }

    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    pub fn quarantine(&self) -> &QuarantineStore {
        &self.quarantine
    }

    pub fn mine(&self) -> Result<Block, LedgerError> {
        self.ledger.mine()
    }

    pub fn verify_chain(&self) -> Result<(), LedgerError> {
        self.ledger.verify_chain()
    }

    /// Decrypt a quarantined case for an authorized reviewer
    pub fn open_quarantined(&self, case: usize) -> Result<AcknowledgedRecord, DispatchError> {
        let tx = self
            .quarantine
            .get(case)
            .ok_or(DispatchError::CaseNotFound(case))?;
        Ok(self.cipher.decrypt(&tx.nonce, &tx.ciphertext)?)
    }

    /// Decrypt a committed transaction
    pub fn open_committed(
        &self,
        block: u64,
        tx: usize,
    ) -> Result<AcknowledgedRecord, DispatchError> {
        let not_found = DispatchError::TransactionNotFound { block, tx };
        let found = self.ledger.block(block).ok_or(not_found)?;
        let transaction = found
            .transactions()
            .get(tx)
            .ok_or(DispatchError::TransactionNotFound { block, tx })?;
        Ok(self
            .cipher
            .decrypt(&transaction.nonce, &transaction.ciphertext)?)
    }

    pub fn export(&self) -> LedgerExport {
        LedgerExport {
            chain: self.ledger.blocks(),
            pending: self.ledger.pending(),
            quarantine: self.quarantine.list(),
        }
    }
}
