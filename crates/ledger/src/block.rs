//! Blocks of the hash chain

use crate::hash::{block_hash, GENESIS_PREV_HASH};
use crate::transaction::Transaction;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Marker payload of block 0
pub const GENESIS_MESSAGE: &str = "Genesis Block";

/// `{"msg": "Genesis Block"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisMarker {
    pub msg: String,
}

impl Default for GenesisMarker {
    fn default() -> Self {
        Self {
            msg: GENESIS_MESSAGE.to_string(),
        }
    }
}

/// Block payload: the genesis marker object or an array of transactions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockData {
    Genesis(GenesisMarker),
    Transactions(Vec<Transaction>),
}

impl BlockData {
    /// Committed transactions; empty for genesis
    pub fn transactions(&self) -> &[Transaction] {
        match self {
            BlockData::Genesis(_) => &[],
            BlockData::Transactions(txs) => txs,
        }
    }

    pub fn is_genesis(&self) -> bool {
        matches!(self, BlockData::Genesis(_))
    }
}

/// An immutable block
///
/// `hash` is a function of the other four fields (see `hash::block_hash`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: DateTime<Utc>,
    pub data: BlockData,
    pub prev_hash: String,
    pub hash: String,
}

impl Block {
    /// Build a block and seal it with its hash
    pub fn new(index: u64, timestamp: DateTime<Utc>, data: BlockData, prev_hash: String) -> Self {
        // Stored precision equals hashed precision
        let timestamp = timestamp.trunc_subsecs(6);
        let hash = block_hash(index, &timestamp, &data, &prev_hash);
        Self {
            index,
            timestamp,
            data,
            prev_hash,
            hash,
        }
    }

    /// Block 0 with the fixed marker and sentinel predecessor
    pub fn genesis(timestamp: DateTime<Utc>) -> Self {
        Self::new(
            0,
            timestamp,
            BlockData::Genesis(GenesisMarker::default()),
            GENESIS_PREV_HASH.to_string(),
        )
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.data.transactions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tollchain_core::DriverResponse;

    fn tx() -> Transaction {
        Transaction::new(
            "11".repeat(12),
            "deadbeef",
            DriverResponse::Confirmed,
            Some("NY-JKL2024".to_string()),
            Some("Queens Blvd".to_string()),
        )
    }

    #[test]
    fn test_genesis_shape() {
        let genesis = Block::genesis(Utc::now());
        assert_eq!(genesis.index, 0);
        assert_eq!(genesis.prev_hash, "0");
        assert!(genesis.data.is_genesis());

        let json = serde_json::to_value(&genesis).unwrap();
        assert_eq!(json["data"]["msg"], "Genesis Block");
        assert_eq!(json["hash"].as_str().unwrap().len(), 64);
    }

    #[test]
    fn test_transaction_block_export() {
        let block = Block::new(
            1,
            Utc::now(),
            BlockData::Transactions(vec![tx()]),
            "ab".repeat(32),
        );

        let json = serde_json::to_value(&block).unwrap();
        assert!(json["data"].is_array());
        assert_eq!(json["data"][0]["driver_response"], "CONFIRMED");
        assert!(json["timestamp"].is_string());

        let parsed: Block = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, block);
    }

    #[test]
    fn test_timestamp_truncated_to_micros() {
        let block = Block::genesis(Utc::now());
        assert_eq!(block.timestamp.timestamp_subsec_nanos() % 1_000, 0);
    }
}
