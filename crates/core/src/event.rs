//! Vehicle telemetry events and the ingestion boundary
//!
//! Producers hand over an [`IngestRecord`] in which every field is optional.
//! [`Event`] can only be obtained through [`Event::try_from`], so everything
//! downstream (the decision engine, the cipher, the ledger) works on values
//! that already passed validation. Deserializing an `Event` goes through the
//! same path.

use crate::error::ValidationError;
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Raw producer record, as received at the ingestion boundary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestRecord {
    #[serde(default)]
    pub vehicle: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub entry_point: Option<String>,
    #[serde(default)]
    pub exit_point: Option<String>,
    #[serde(default)]
    pub entry_time: Option<String>,
    #[serde(default)]
    pub exit_time: Option<String>,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub speed_limit: Option<f64>,
    #[serde(default)]
    pub congestion: Option<f64>,
    #[serde(default)]
    pub travel_time_min: Option<f64>,
}

impl IngestRecord {
    /// Record with the fields the core needs, everything else left empty
    pub fn new(
        vehicle: impl Into<String>,
        exit_point: impl Into<String>,
        speed: f64,
        speed_limit: f64,
        congestion: f64,
    ) -> Self {
        Self {
            vehicle: Some(vehicle.into()),
            exit_point: Some(exit_point.into()),
            speed: Some(speed),
            speed_limit: Some(speed_limit),
            congestion: Some(congestion),
            ..Default::default()
        }
    }

    /// Validate into an Event
    pub fn validate(self) -> Result<Event, ValidationError> {
        Event::try_from(self)
    }
}

/// Validated, immutable telemetry for one trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IngestRecord")]
pub struct Event {
    vehicle: String,
    phone: Option<String>,
    email: Option<String>,
    entry_point: Option<String>,
    exit_point: String,
    entry_time: Option<NaiveDateTime>,
    exit_time: Option<NaiveDateTime>,
    speed: f64,
    speed_limit: f64,
    congestion: f64,
    travel_time_min: Option<f64>,
}

impl Event {
    /// Build an event from the fields the core requires
    pub fn new(
        vehicle: impl Into<String>,
        exit_point: impl Into<String>,
        speed: f64,
        speed_limit: f64,
        congestion: f64,
    ) -> Result<Self, ValidationError> {
        IngestRecord::new(vehicle, exit_point, speed, speed_limit, congestion).validate()
    }

    pub fn vehicle(&self) -> &str {
        &self.vehicle
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn entry_point(&self) -> Option<&str> {
        self.entry_point.as_deref()
    }

    pub fn exit_point(&self) -> &str {
        &self.exit_point
    }

    pub fn entry_time(&self) -> Option<NaiveDateTime> {
        self.entry_time
    }

    pub fn exit_time(&self) -> Option<NaiveDateTime> {
        self.exit_time
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn speed_limit(&self) -> f64 {
        self.speed_limit
    }

    /// Congestion in `[0, 1]`
    pub fn congestion(&self) -> f64 {
        self.congestion
    }

    pub fn travel_time_min(&self) -> Option<f64> {
        self.travel_time_min
    }
}

impl TryFrom<IngestRecord> for Event {
    type Error = ValidationError;

    fn try_from(record: IngestRecord) -> Result<Self, Self::Error> {
        let vehicle = required_text("vehicle", record.vehicle)?;
        let exit_point = required_text("exit_point", record.exit_point)?;

        let speed = required_number("speed", record.speed)?;
        if speed < 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "speed",
                value: speed,
                reason: "must be >= 0",
            });
        }

        let speed_limit = required_number("speed_limit", record.speed_limit)?;
        if speed_limit <= 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "speed_limit",
                value: speed_limit,
                reason: "must be > 0",
            });
        }

        let congestion = required_number("congestion", record.congestion)?;
        if !(0.0..=1.0).contains(&congestion) {
            return Err(ValidationError::OutOfRange {
                field: "congestion",
                value: congestion,
                reason: "must be within [0, 1]",
            });
        }

        let entry_time = optional_timestamp("entry_time", record.entry_time)?;
        let exit_time = optional_timestamp("exit_time", record.exit_time)?;

        let travel_time_min = match record.travel_time_min {
            Some(minutes) => {
                let minutes = finite("travel_time_min", minutes)?;
                if minutes < 0.0 {
                    return Err(ValidationError::OutOfRange {
                        field: "travel_time_min",
                        value: minutes,
                        reason: "must be >= 0",
                    });
                }
                Some(minutes)
            }
            None => None,
        };

        let travel_time_min = match (entry_time, exit_time) {
            (Some(entry), Some(exit)) => {
                if exit < entry {
                    return Err(ValidationError::InvalidTimeRange {
                        entry: entry.to_string(),
                        exit: exit.to_string(),
                    });
                }
                travel_time_min.or_else(|| Some(travel_minutes(entry, exit)))
            }
            _ => travel_time_min,
        };

        Ok(Self {
            vehicle,
            phone: optional_text(record.phone),
            email: optional_text(record.email),
            entry_point: optional_text(record.entry_point),
            exit_point,
            entry_time,
            exit_time,
            speed,
            speed_limit,
            congestion,
            travel_time_min,
        })
    }
}

/// Trip duration in minutes, one decimal place
pub(crate) fn travel_minutes(entry: NaiveDateTime, exit: NaiveDateTime) -> f64 {
    let minutes = (exit - entry).num_milliseconds() as f64 / 60_000.0;
    (minutes * 10.0).round() / 10.0
}

fn required_text(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField(field))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(trimmed.to_string())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required_number(field: &'static str, value: Option<f64>) -> Result<f64, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField(field))?;
    finite(field, value)
}

fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { field, value })
    }
}

fn optional_timestamp(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<NaiveDateTime>, ValidationError> {
    match optional_text(value) {
        Some(text) => parse_timestamp(&text)
            .map(Some)
            .ok_or(ValidationError::InvalidTimestamp { field, value: text }),
        None => Ok(None),
    }
}

/// Accepts naive ISO-8601 (`T` or space separated) and RFC 3339 with offset
pub(crate) fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.naive_utc()))
}
