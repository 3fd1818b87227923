//! TollChain Core - Domain types
//!
//! This crate contains the records that flow through the TollChain pipeline:
//! - `Event`: Validated vehicle telemetry for a single trip
//! - `Decision`: Toll, route and speed-compliance verdict derived from an Event
//! - `DriverResponse`: Acknowledgment state of a Decision
//! - `AcknowledgedRecord`: The Event + Decision + DriverResponse triple that gets sealed
//! - `Toll`: Non-negative, cent-precision currency amount

pub mod decision;
pub mod error;
pub mod event;
pub mod ingest;
pub mod record;
pub mod response;
pub mod toll;

pub use decision::{Decision, Route};
pub use error::ValidationError;
pub use event::{Event, IngestRecord};
pub use ingest::TripRecord;
pub use record::AcknowledgedRecord;
pub use response::DriverResponse;
pub use toll::{Toll, TollError};
