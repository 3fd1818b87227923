//! # TollChain Engine
//!
//! Deterministic rule evaluation and the driver acknowledgment gate.
//!
//! ## Flow
//! ```text
//! Event ──► evaluate() ──► Decision ──► ResponseGate
//!                                        ├── !overspeed ──► AUTO_SAFE
//!                                        └──  overspeed ──► AWAITING_DRIVER ──► CONFIRMED | REJECTED
//! ```
//!
//! The gate only leaves `AWAITING_DRIVER` on an explicit [`Acknowledgment`].

mod error;
mod evaluate;
mod gate;

pub use error::GateError;
pub use evaluate::{
    evaluate, route_for, toll_for, ALTERNATE_1_THRESHOLD, ALTERNATE_2_THRESHOLD, OVERSPEED_COMMENT,
    SAFE_COMMENT,
};
pub use gate::{Acknowledgment, ResponseGate, Transition};
