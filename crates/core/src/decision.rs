//! Decision output types

use crate::toll::Toll;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Recommended route, ordered from least to most diverted
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Route {
    Fastest,
    #[serde(rename = "ALTERNATE_1")]
    #[strum(serialize = "ALTERNATE_1")]
    Alternate1,
    #[serde(rename = "ALTERNATE_2")]
    #[strum(serialize = "ALTERNATE_2")]
    Alternate2,
}

/// Verdict derived from a single Event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub toll: Toll,
    pub route: Route,
    pub overspeed: bool,
    pub decision_correct: bool,
    pub comment: String,
}

impl Decision {
    /// Whether the driver has to acknowledge this decision
    pub fn requires_acknowledgment(&self) -> bool {
        self.overspeed
    }
}
