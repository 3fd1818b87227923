//! The sealed payload: what a transaction's ciphertext decrypts to

use crate::decision::Decision;
use crate::event::Event;
use crate::response::DriverResponse;
use serde::{Deserialize, Serialize};

/// Event + Decision + terminal DriverResponse
///
/// Field order is the serialization order, which makes the JSON form
/// canonical for a given value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcknowledgedRecord {
    pub event: Event,
    pub decision: Decision,
    pub driver_response: DriverResponse,
}

impl AcknowledgedRecord {
    /// Plaintext index metadata: vehicle id
    pub fn vehicle(&self) -> &str {
        self.event.vehicle()
    }

    /// Plaintext index metadata: exit point
    pub fn exit_point(&self) -> &str {
        self.event.exit_point()
    }
}
