//! TollChain RPC - Service wiring and CLI orchestration
//!
//! This crate owns the construct-once service instances (cipher, ledger,
//! quarantine), the routing dispatcher that places sealed records into one of
//! the two stores, and the `tollchain` binary.

pub mod commands;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;

pub use config::{AppConfig, OverspeedPolicy};
pub use context::{AppContext, LedgerExport};
pub use dispatch::{Placement, RoutingDispatcher};
pub use error::DispatchError;
