//! Gate errors

use thiserror::Error;
use tollchain_core::DriverResponse;

/// Errors from the acknowledgment gate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("Gate already in terminal state {0}")]
    AlreadyTerminal(DriverResponse),

    #[error("Gate is {0}, no driver acknowledgment expected")]
    NotAwaitingDriver(DriverResponse),

    #[error("Gate is {0}, driver has not acknowledged yet")]
    NotTerminal(DriverResponse),
}
