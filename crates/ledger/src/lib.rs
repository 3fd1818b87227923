//! TollChain Ledger - Tamper-evident storage
//!
//! Two mutually exclusive stores for sealed transactions:
//! - `LedgerStore`: hash-chained, append-only block log with a pending pool
//! - `QuarantineStore`: append-only registry of REJECTED transactions, never linked into the chain
//!
//! # Key Types
//! - `Transaction`: Sealed payload plus plaintext index metadata
//! - `Block`: Index, timestamp, data, prev_hash and the hash over all of them
//! - `ChainError`: First hash or linkage mismatch found by `verify_chain`

pub mod block;
pub mod error;
pub mod hash;
pub mod quarantine;
pub mod store;
pub mod transaction;

pub use block::{Block, BlockData, GenesisMarker, GENESIS_MESSAGE};
pub use error::LedgerError;
pub use hash::{calculate_block_hash, verify_chain, ChainError, GENESIS_PREV_HASH};
pub use quarantine::QuarantineStore;
pub use store::LedgerStore;
pub use transaction::Transaction;
