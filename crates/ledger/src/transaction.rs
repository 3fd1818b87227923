//! Sealed transactions

use serde::{Deserialize, Serialize};
use tollchain_core::DriverResponse;

/// A sealed Event + Decision + DriverResponse triple.
///
/// Only `driver_response`, `vehicle` and `exit_point` are kept in clear, for
/// indexing; everything else is inside `ciphertext`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// 96-bit AEAD nonce, 24 hex chars
    pub nonce: String,
    /// Hex ciphertext including the tag
    pub ciphertext: String,
    pub driver_response: DriverResponse,
    pub vehicle: Option<String>,
    pub exit_point: Option<String>,
}

impl Transaction {
    pub fn new(
        nonce: impl Into<String>,
        ciphertext: impl Into<String>,
        driver_response: DriverResponse,
        vehicle: Option<String>,
        exit_point: Option<String>,
    ) -> Self {
        Self {
            nonce: nonce.into(),
            ciphertext: ciphertext.into(),
            driver_response,
            vehicle,
            exit_point,
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.driver_response == DriverResponse::Rejected
    }
}
