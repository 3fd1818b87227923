//! Driver acknowledgment states

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Acknowledgment state of a Decision
///
/// `Pending` and `AwaitingDriver` are transient; the other three are terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverResponse {
    /// Decision produced, gate not yet evaluated
    Pending,
    /// No overspeed: accepted without asking the driver
    AutoSafe,
    /// Overspeed: waiting for the driver to confirm or reject
    AwaitingDriver,
    /// Driver accepted the guidance
    Confirmed,
    /// Driver refused the guidance; never eligible for the chain
    Rejected,
}

impl DriverResponse {
    /// Whether no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DriverResponse::AutoSafe | DriverResponse::Confirmed | DriverResponse::Rejected
        )
    }

    /// Whether a transaction carrying this response may be chained
    pub fn is_chain_eligible(&self) -> bool {
        matches!(self, DriverResponse::AutoSafe | DriverResponse::Confirmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_wire_names() {
        assert_eq!(DriverResponse::AutoSafe.to_string(), "AUTO_SAFE");
        assert_eq!(
            serde_json::to_string(&DriverResponse::AwaitingDriver).unwrap(),
            "\"AWAITING_DRIVER\""
        );
        assert_eq!(
            DriverResponse::from_str("REJECTED").unwrap(),
            DriverResponse::Rejected
        );
    }

    #[test]
    fn test_terminal_states() {
        assert!(!DriverResponse::Pending.is_terminal());
        assert!(!DriverResponse::AwaitingDriver.is_terminal());
        assert!(DriverResponse::AutoSafe.is_terminal());
        assert!(DriverResponse::Confirmed.is_terminal());
        assert!(DriverResponse::Rejected.is_terminal());
    }

    #[test]
    fn test_rejected_is_not_chain_eligible() {
        assert!(!DriverResponse::Rejected.is_chain_eligible());
        assert!(DriverResponse::Confirmed.is_chain_eligible());
    }
}
