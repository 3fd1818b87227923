//! Hash-chained block store with a pending pool
//!
//! Chain and pending pool sit behind one mutex, so `add_transaction` and the
//! snapshot-and-clear step of `mine` are serialized against each other and a
//! transaction can never land in two blocks or be dropped between them.

use crate::block::{Block, BlockData};
use crate::error::LedgerError;
use crate::hash::verify_chain;
use crate::transaction::Transaction;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard, PoisonError};

struct LedgerState {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
}

/// In-memory, append-only hash chain
///
/// Construct once and share by reference (or `Arc`) for the life of the
/// process. Durability is the caller's concern.
pub struct LedgerStore {
    state: Mutex<LedgerState>,
}

impl LedgerStore {
    /// Create a store holding only the genesis block
    pub fn new() -> Self {
        let genesis = Block::genesis(Utc::now());
        tracing::debug!(hash = %genesis.hash, "genesis block created");

        Self {
            state: Mutex::new(LedgerState {
                chain: vec![genesis],
                pending: Vec::new(),
            }),
        }
    }

    // State is only written after every fallible step, so a poisoned
    // guard still holds a consistent chain.
    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append to the pending pool. Returns the pool size after the append.
    ///
    /// REJECTED transactions are refused regardless of what the caller did.
    pub fn add_transaction(&self, tx: Transaction) -> Result<usize, LedgerError> {
        if tx.is_rejected() {
            tracing::error!(
                vehicle = tx.vehicle.as_deref().unwrap_or("-"),
                "refused REJECTED transaction for the chain"
            );
            return Err(LedgerError::InvariantViolation(
                "REJECTED transactions cannot enter the chain".to_string(),
            ));
        }

        let mut state = self.lock();
        tracing::debug!(
            vehicle = tx.vehicle.as_deref().unwrap_or("-"),
            response = %tx.driver_response,
            "transaction added to pending pool"
        );
        state.pending.push(tx);
        Ok(state.pending.len())
    }

    /// Commit the whole pending pool into a new block
    pub fn mine(&self) -> Result<Block, LedgerError> {
        let mut state = self.lock();

        if state.pending.is_empty() {
            return Err(LedgerError::NoPendingTransactions);
        }

        let (index, prev_hash) = match state.chain.last() {
            Some(head) => (head.index + 1, head.hash.clone()),
            None => {
                return Err(LedgerError::InvariantViolation(
                    "chain has no genesis block".to_string(),
                ))
            }
        };

        let snapshot = std::mem::take(&mut state.pending);
        let count = snapshot.len();
        let block = Block::new(
            index,
            Utc::now(),
            BlockData::Transactions(snapshot),
            prev_hash,
        );
        state.chain.push(block.clone());

        tracing::info!(
            index = block.index,
            transactions = count,
            hash = %block.hash,
            "block mined"
        );
        Ok(block)
    }

    /// Recompute every hash and link
    pub fn verify_chain(&self) -> Result<(), LedgerError> {
        let state = self.lock();
        verify_chain(&state.chain).map_err(LedgerError::from)
    }

    /// Snapshot of the chain, genesis first
    pub fn blocks(&self) -> Vec<Block> {
        self.lock().chain.clone()
    }

    pub fn block(&self, index: u64) -> Option<Block> {
        let state = self.lock();
        usize::try_from(index)
            .ok()
            .and_then(|i| state.chain.get(i).cloned())
    }

    /// Most recent block
    pub fn head(&self) -> Option<Block> {
        self.lock().chain.last().cloned()
    }

    /// Number of blocks, genesis included
    pub fn len(&self) -> usize {
        self.lock().chain.len()
    }

    /// Always false: genesis exists from construction
    pub fn is_empty(&self) -> bool {
        self.lock().chain.is_empty()
    }

    /// Snapshot of the pending pool
    pub fn pending(&self) -> Vec<Transaction> {
        self.lock().pending.clone()
    }

    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new()
    }
}
