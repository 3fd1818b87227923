//! Hash chain utilities for ledger integrity
//!
//! # Canonical encoding
//! SHA-256 over, in this order:
//! 1. `index`: 8-byte little-endian
//! 2. `timestamp`: RFC 3339, UTC, microseconds, `Z` suffix
//! 3. `data`: `0x00` + marker message for genesis, or `0x01` + 8-byte LE
//!    count + per transaction `nonce, ciphertext, driver_response, vehicle,
//!    exit_point`
//! 4. `prev_hash`
//!
//! Strings are prefixed with their 4-byte LE length; optional strings with a
//! presence byte. The `hash` field is never an input.

use crate::block::{Block, BlockData};
use crate::transaction::Transaction;
use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

/// `prev_hash` of the genesis block
pub const GENESIS_PREV_HASH: &str = "0";

const TAG_GENESIS: u8 = 0x00;
const TAG_TRANSACTIONS: u8 = 0x01;

/// Hash of a block's content (excluding the hash field itself)
pub fn calculate_block_hash(block: &Block) -> String {
    block_hash(block.index, &block.timestamp, &block.data, &block.prev_hash)
}

pub(crate) fn block_hash(
    index: u64,
    timestamp: &DateTime<Utc>,
    data: &BlockData,
    prev_hash: &str,
) -> String {
    let mut hasher = Sha256::new();

    hasher.update(index.to_le_bytes());
    update_str(&mut hasher, &canonical_timestamp(timestamp));

    match data {
        BlockData::Genesis(marker) => {
            hasher.update([TAG_GENESIS]);
            update_str(&mut hasher, &marker.msg);
        }
        BlockData::Transactions(txs) => {
            hasher.update([TAG_TRANSACTIONS]);
            hasher.update((txs.len() as u64).to_le_bytes());
            for tx in txs {
                update_transaction(&mut hasher, tx);
            }
        }
    }

    update_str(&mut hasher, prev_hash);

    hex::encode(hasher.finalize())
}

/// Timestamp text as it enters the hash
pub fn canonical_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn update_transaction(hasher: &mut Sha256, tx: &Transaction) {
    update_str(hasher, &tx.nonce);
    update_str(hasher, &tx.ciphertext);
    update_str(hasher, tx.driver_response.as_ref());
    update_opt_str(hasher, tx.vehicle.as_deref());
    update_opt_str(hasher, tx.exit_point.as_deref());
}

fn update_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u32).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn update_opt_str(hasher: &mut Sha256, value: Option<&str>) {
    match value {
        Some(v) => {
            hasher.update([1u8]);
            update_str(hasher, v);
        }
        None => hasher.update([0u8]),
    }
}

/// Verify hash chain integrity
///
/// Checks, block by block: index equals position, `prev_hash` links to the
/// predecessor's stored hash (`"0"` for genesis), and the stored hash matches
/// the recomputed one. Stops at the first offending block.
pub fn verify_chain(blocks: &[Block]) -> Result<(), ChainError> {
    let mut prev_hash = GENESIS_PREV_HASH.to_string();

    for (position, block) in blocks.iter().enumerate() {
        let position = position as u64;

        if block.index != position {
            return Err(ChainError::InvalidIndex {
                position,
                actual: block.index,
            });
        }

        if block.prev_hash != prev_hash {
            return Err(ChainError::BrokenLink {
                index: block.index,
                expected: prev_hash,
                actual: block.prev_hash.clone(),
            });
        }

        let calculated = calculate_block_hash(block);
        if block.hash != calculated {
            return Err(ChainError::InvalidHash {
                index: block.index,
                expected: calculated,
                actual: block.hash.clone(),
            });
        }

        prev_hash = block.hash.clone();
    }

    Ok(())
}

/// Errors in hash chain verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    BrokenLink {
        index: u64,
        expected: String,
        actual: String,
    },
    InvalidHash {
        index: u64,
        expected: String,
        actual: String,
    },
    InvalidIndex {
        position: u64,
        actual: u64,
    },
}

impl ChainError {
    /// Position of the first offending block
    pub fn index(&self) -> u64 {
        match self {
            ChainError::BrokenLink { index, .. } => *index,
            ChainError::InvalidHash { index, .. } => *index,
            ChainError::InvalidIndex { position, .. } => *position,
        }
    }
}

impl std::fmt::Display for ChainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainError::BrokenLink {
                index,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Broken link at block {}: expected prev_hash '{}', got '{}'",
                    index, expected, actual
                )
            }
            ChainError::InvalidHash {
                index,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid hash at block {}: expected '{}', got '{}'",
                    index, expected, actual
                )
            }
            ChainError::InvalidIndex { position, actual } => {
                write!(
                    f,
                    "Invalid index at position {}: got {}",
                    position, actual
                )
            }
        }
    }
}

impl std::error::Error for ChainError {}
