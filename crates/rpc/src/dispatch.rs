//! Routing dispatcher
//!
//! Seals a finalized record and places it into exactly one store:
//! REJECTED goes to quarantine, AUTO_SAFE and CONFIRMED go to the ledger's
//! pending pool (not mined yet).

use crate::error::DispatchError;
use serde::Serialize;
use tollchain_core::{AcknowledgedRecord, DriverResponse};
use tollchain_crypto::PayloadCipher;
use tollchain_engine::ResponseGate;
use tollchain_ledger::{LedgerStore, QuarantineStore, Transaction};

/// Where a record ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "store", rename_all = "snake_case")]
pub enum Placement {
    /// In the ledger's pending pool, which now holds `pool_size` transactions
    Pending { pool_size: usize },
    /// In quarantine at case index `case`
    Quarantined { case: usize },
}

/// Borrows the long-lived services; cheap to create per call
pub struct RoutingDispatcher<'a> {
    cipher: &'a PayloadCipher,
    ledger: &'a LedgerStore,
    quarantine: &'a QuarantineStore,
}

impl<'a> RoutingDispatcher<'a> {
    pub fn new(
        cipher: &'a PayloadCipher,
        ledger: &'a LedgerStore,
        quarantine: &'a QuarantineStore,
    ) -> Self {
        Self {
            cipher,
            ledger,
            quarantine,
        }
    }

    /// Encrypt the full triple and attach the plaintext index metadata
    pub fn seal(&self, record: &AcknowledgedRecord) -> Result<Transaction, DispatchError> {
        let sealed = self.cipher.encrypt(record)?;
        Ok(Transaction::new(
            sealed.nonce,
            sealed.ciphertext,
            record.driver_response,
            Some(record.vehicle().to_string()),
            Some(record.exit_point().to_string()),
        ))
    }

    /// Seal and place a record
    pub fn dispatch(&self, record: &AcknowledgedRecord) -> Result<Placement, DispatchError> {
        if !record.driver_response.is_terminal() {
            return Err(DispatchError::NotTerminal(record.driver_response));
        }

        let tx = self.seal(record)?;

        let placement = match record.driver_response {
            DriverResponse::Rejected => Placement::Quarantined {
                case: self.quarantine.append(tx)?,
            },
            _ => Placement::Pending {
                pool_size: self.ledger.add_transaction(tx)?,
            },
        };

        tracing::info!(
            vehicle = record.vehicle(),
            response = %record.driver_response,
            ?placement,
            "record dispatched"
        );
        Ok(placement)
    }

    /// Finalize a gate and dispatch its record
    pub fn dispatch_gate(&self, gate: ResponseGate) -> Result<Placement, DispatchError> {
        let record = gate.finalize()?;
        self.dispatch(&record)
    }
}
