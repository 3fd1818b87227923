//! CLI commands

use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use tollchain_core::{Decision, Event, TripRecord};
use tollchain_engine::{evaluate, ResponseGate};
use tollchain_ledger::LedgerError;

use crate::config::OverspeedPolicy;
use crate::context::AppContext;
use crate::dispatch::Placement;

/// One input record after parsing and validation
#[derive(Debug)]
pub struct LoadedEvent {
    /// 1-based position in the input (array element or line number)
    pub position: usize,
    pub result: anyhow::Result<Event>,
}

/// Counters for a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub processed: usize,
    pub pending: usize,
    pub quarantined: usize,
    pub skipped: usize,
    pub invalid: usize,
    pub mined_block: Option<u64>,
}

/// Load events from a JSON array, a JSON-lines file or a CSV trip dataset.
///
/// A file that cannot be read, or a JSON array that does not parse, fails the
/// whole load. A single bad record only fails its own entry. Files with a
/// `.csv` extension are always read as trip records.
pub fn load_events(path: &Path, trips: bool) -> anyhow::Result<Vec<LoadedEvent>> {
    if is_csv(path) {
        return load_trip_csv(path);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let values: Vec<(usize, anyhow::Result<Value>)> = if content.trim_start().starts_with('[') {
        let array: Vec<Value> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON array in {}", path.display()))?;
        array
            .into_iter()
            .enumerate()
            .map(|(i, value)| (i + 1, Ok(value)))
            .collect()
    } else {
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| (i + 1, serde_json::from_str::<Value>(line).map_err(anyhow::Error::from)))
            .collect()
    };

    Ok(values
        .into_iter()
        .map(|(position, value)| LoadedEvent {
            position,
            result: value.and_then(|value| parse_event(value, trips)),
        })
        .collect())
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Header row names the `TripRecord` columns; empty cells are absent fields
fn load_trip_csv(path: &Path) -> anyhow::Result<Vec<LoadedEvent>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    Ok(reader
        .deserialize::<TripRecord>()
        .enumerate()
        .map(|(i, row)| LoadedEvent {
            position: i + 1,
            result: row
                .map_err(anyhow::Error::from)
                .and_then(|trip| Ok(trip.into_event()?)),
        })
        .collect())
}

fn parse_event(value: Value, trips: bool) -> anyhow::Result<Event> {
    if trips {
        let trip: TripRecord = serde_json::from_value(value)?;
        Ok(trip.into_event()?)
    } else {
        Ok(serde_json::from_value(value)?)
    }
}

/// Evaluate without touching any store
pub fn evaluate_events(events: &[LoadedEvent]) -> Vec<(usize, Option<Decision>)> {
    events
        .iter()
        .map(|loaded| {
            let decision = match &loaded.result {
                Ok(event) => Some(evaluate(event)),
                Err(e) => {
                    tracing::warn!(position = loaded.position, error = %e, "invalid record");
                    None
                }
            };
            (loaded.position, decision)
        })
        .collect()
}

/// Print the decision for each event, one JSON object per line
pub fn print_decisions(events: &[LoadedEvent]) -> anyhow::Result<()> {
    for (position, decision) in evaluate_events(events) {
        if let Some(decision) = decision {
            let line = serde_json::json!({ "position": position, "decision": decision });
            println!("{}", serde_json::to_string(&line)?);
        }
    }
    Ok(())
}

/// Evaluate, gate, dispatch, then mine once and verify the chain
pub fn run(
    ctx: &AppContext,
    events: Vec<LoadedEvent>,
    policy: OverspeedPolicy,
) -> anyhow::Result<RunSummary> {
    let mut summary = RunSummary::default();
    let dispatcher = ctx.dispatcher();

    for loaded in events {
        let event = match loaded.result {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(position = loaded.position, error = %e, "invalid record");
                summary.invalid += 1;
                continue;
            }
        };

        let decision = evaluate(&event);
        let mut gate = ResponseGate::open(event, decision);

        if gate.is_awaiting_driver() {
            match policy.acknowledgment() {
                Some(ack) => {
                    gate.acknowledge(ack)?;
                }
                None => {
                    tracing::warn!(
                        position = loaded.position,
                        vehicle = gate.event().vehicle(),
                        "awaiting driver, skipped"
                    );
                    summary.skipped += 1;
                    continue;
                }
            }
        }

        match dispatcher.dispatch_gate(gate)? {
            Placement::Pending { .. } => summary.pending += 1,
            Placement::Quarantined { .. } => summary.quarantined += 1,
        }
        summary.processed += 1;
    }

    summary.mined_block = match ctx.mine() {
        Ok(block) => Some(block.index),
        Err(LedgerError::NoPendingTransactions) => {
            tracing::warn!("no pending transactions, nothing mined");
            None
        }
        Err(e) => return Err(e.into()),
    };

    ctx.verify_chain()?;
    tracing::info!(?summary, "run complete");
    Ok(summary)
}
