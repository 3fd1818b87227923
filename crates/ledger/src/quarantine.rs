//! Quarantine registry for rejected guidance
//!
//! Append-only, insertion-ordered, no hash linkage. Nothing here is ever
//! moved into the chain; cases are enumerated by index and opened on demand
//! by an authorized caller holding the cipher.

use crate::error::LedgerError;
use crate::transaction::Transaction;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Append-only store of REJECTED transactions
pub struct QuarantineStore {
    cases: Mutex<Vec<Transaction>>,
}

impl QuarantineStore {
    pub fn new() -> Self {
        Self {
            cases: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Transaction>> {
        self.cases.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a rejected transaction. Returns its case index.
    pub fn append(&self, tx: Transaction) -> Result<usize, LedgerError> {
        if !tx.is_rejected() {
            return Err(LedgerError::InvariantViolation(format!(
                "only REJECTED transactions can be quarantined, got {}",
                tx.driver_response
            )));
        }

        let mut cases = self.lock();
        let index = cases.len();
        tracing::debug!(
            case = index,
            vehicle = tx.vehicle.as_deref().unwrap_or("-"),
            exit_point = tx.exit_point.as_deref().unwrap_or("-"),
            "transaction quarantined"
        );
        cases.push(tx);
        Ok(index)
    }

    pub fn get(&self, index: usize) -> Option<Transaction> {
        self.lock().get(index).cloned()
    }

    /// Snapshot in insertion order
    pub fn list(&self) -> Vec<Transaction> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Default for QuarantineStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tollchain_core::DriverResponse;

    fn tx(response: DriverResponse, vehicle: &str) -> Transaction {
        Transaction::new(
            "a1".repeat(12),
            "0badc0de",
            response,
            Some(vehicle.to_string()),
            Some("I-87 Exit 7A".to_string()),
        )
    }

    #[test]
    fn test_append_assigns_sequential_indices() {
        let store = QuarantineStore::new();
        assert_eq!(store.append(tx(DriverResponse::Rejected, "V1")).unwrap(), 0);
        assert_eq!(store.append(tx(DriverResponse::Rejected, "V2")).unwrap(), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap().vehicle.as_deref(), Some("V2"));
        assert!(store.get(2).is_none());
    }

    #[test]
    fn test_non_rejected_refused() {
        let store = QuarantineStore::new();
        for response in [DriverResponse::AutoSafe, DriverResponse::Confirmed] {
            let result = store.append(tx(response, "V1"));
            assert!(matches!(result, Err(LedgerError::InvariantViolation(_))));
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let store = QuarantineStore::new();
        for v in ["A", "B", "C"] {
            store.append(tx(DriverResponse::Rejected, v)).unwrap();
        }
        let vehicles: Vec<_> = store
            .list()
            .into_iter()
            .filter_map(|tx| tx.vehicle)
            .collect();
        assert_eq!(vehicles, vec!["A", "B", "C"]);
    }
}
