//! Trip records as exported by roadside sensor datasets
//!
//! A trip row carries raw speeds in km/h but no congestion figure. The
//! congestion is estimated from how close the vehicle runs to the limit.

use crate::error::ValidationError;
use crate::event::{Event, IngestRecord};
use serde::{Deserialize, Serialize};

/// Lower bound of the congestion estimate
pub const MIN_CONGESTION_ESTIMATE: f64 = 0.1;

/// One row of a trip dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub plate: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub entry_point: Option<String>,
    pub exit_point: Option<String>,
    #[serde(default)]
    pub entry_time: Option<String>,
    #[serde(default)]
    pub exit_time: Option<String>,
    pub speed_kmph: f64,
    pub speed_limit_kmph: f64,
}

impl TripRecord {
    /// Convert to the ingestion contract, estimating congestion
    pub fn to_ingest_record(&self) -> IngestRecord {
        let speed = round_to(self.speed_kmph, 2);
        let limit = round_to(self.speed_limit_kmph, 2);

        IngestRecord {
            vehicle: self.plate.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            entry_point: self.entry_point.clone(),
            exit_point: self.exit_point.clone(),
            entry_time: self.entry_time.clone(),
            exit_time: self.exit_time.clone(),
            speed: Some(speed),
            speed_limit: Some(limit),
            congestion: Some(estimate_congestion(speed, limit)),
            // Derived from the timestamps during validation
            travel_time_min: None,
        }
    }

    /// Convert and validate
    pub fn into_event(self) -> Result<Event, ValidationError> {
        self.to_ingest_record().validate()
    }
}

/// `speed / limit`, clamped to `[0.1, 1.0]`, two decimals
pub fn estimate_congestion(speed: f64, limit: f64) -> f64 {
    if !speed.is_finite() || !limit.is_finite() {
        return f64::NAN;
    }
    let ratio = speed / limit.max(1.0);
    round_to(ratio.clamp(MIN_CONGESTION_ESTIMATE, 1.0), 2)
}

fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}
