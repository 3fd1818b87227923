//! Driver acknowledgment gate

use crate::error::GateError;
use crate::evaluate::evaluate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tollchain_core::{AcknowledgedRecord, Decision, DriverResponse, Event};

/// Explicit driver input; the only way out of `AWAITING_DRIVER`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Acknowledgment {
    Confirm,
    Reject,
}

/// One recorded state change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: DriverResponse,
    pub to: DriverResponse,
    pub at: DateTime<Utc>,
}

/// Acknowledgment state machine for a single Decision
///
/// ```text
/// PENDING ──(!overspeed)──► AUTO_SAFE
///    └─────(overspeed)───► AWAITING_DRIVER ──Confirm──► CONFIRMED
///                                          └─Reject───► REJECTED
/// ```
///
/// A new Decision needs a new gate; terminal states have no way out.
#[derive(Debug, Clone)]
pub struct ResponseGate {
    event: Event,
    decision: Decision,
    state: DriverResponse,
    history: Vec<Transition>,
}

impl ResponseGate {
    /// Open a gate for a decision and take the automatic first step
    pub fn open(event: Event, decision: Decision) -> Self {
        let mut gate = Self {
            event,
            decision,
            state: DriverResponse::Pending,
            history: Vec::new(),
        };

        let next = if gate.decision.requires_acknowledgment() {
            DriverResponse::AwaitingDriver
        } else {
            DriverResponse::AutoSafe
        };
        gate.transition(next);
        gate
    }

    /// Evaluate an event and open a gate on the result
    pub fn for_event(event: Event) -> Self {
        let decision = evaluate(&event);
        Self::open(event, decision)
    }

    pub fn state(&self) -> DriverResponse {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn is_awaiting_driver(&self) -> bool {
        self.state == DriverResponse::AwaitingDriver
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn decision(&self) -> &Decision {
        &self.decision
    }

    pub fn history(&self) -> &[Transition] {
        &self.history
    }

    /// Apply the driver's answer
    pub fn acknowledge(&mut self, ack: Acknowledgment) -> Result<DriverResponse, GateError> {
        match self.state {
            DriverResponse::AwaitingDriver => {}
            state if state.is_terminal() => return Err(GateError::AlreadyTerminal(state)),
            state => return Err(GateError::NotAwaitingDriver(state)),
        }

        let next = match ack {
            Acknowledgment::Confirm => DriverResponse::Confirmed,
            Acknowledgment::Reject => DriverResponse::Rejected,
        };
        self.transition(next);

        tracing::debug!(
            vehicle = self.event.vehicle(),
            response = %next,
            "driver acknowledged decision"
        );
        Ok(next)
    }

    pub fn confirm(&mut self) -> Result<DriverResponse, GateError> {
        self.acknowledge(Acknowledgment::Confirm)
    }

    pub fn reject(&mut self) -> Result<DriverResponse, GateError> {
        self.acknowledge(Acknowledgment::Reject)
    }

    /// Consume a terminal gate into the record that gets sealed
    pub fn finalize(self) -> Result<AcknowledgedRecord, GateError> {
        if !self.state.is_terminal() {
            return Err(GateError::NotTerminal(self.state));
        }

        Ok(AcknowledgedRecord {
            event: self.event,
            decision: self.decision,
            driver_response: self.state,
        })
    }

    fn transition(&mut self, to: DriverResponse) {
        self.history.push(Transition {
            from: self.state,
            to,
            at: Utc::now(),
        });
        self.state = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(speed: f64) -> ResponseGate {
        let event = Event::new("FL-DEF9090", "Times Square", speed, 100.0, 0.5).unwrap();
        ResponseGate::for_event(event)
    }

    #[test]
    fn test_safe_decision_is_auto_approved() {
        let gate = gate(80.0);
        assert_eq!(gate.state(), DriverResponse::AutoSafe);
        assert!(gate.is_terminal());
        assert_eq!(gate.history().len(), 1);
        assert_eq!(gate.history()[0].from, DriverResponse::Pending);
    }

    #[test]
    fn test_overspeed_waits_for_driver() {
        let gate = gate(120.0);
        assert_eq!(gate.state(), DriverResponse::AwaitingDriver);
        assert!(!gate.is_terminal());
    }

    #[test]
    fn test_confirm() {
        let mut gate = gate(120.0);
        assert_eq!(gate.confirm(), Ok(DriverResponse::Confirmed));
        assert_eq!(gate.state(), DriverResponse::Confirmed);
        assert_eq!(gate.history().len(), 2);
    }

    #[test]
    fn test_reject() {
        let mut gate = gate(120.0);
        assert_eq!(gate.reject(), Ok(DriverResponse::Rejected));
        let record = gate.finalize().unwrap();
        assert_eq!(record.driver_response, DriverResponse::Rejected);
    }

    #[test]
    fn test_no_transition_out_of_terminal() {
        let mut gate = gate(120.0);
        gate.reject().unwrap();
        assert_eq!(
            gate.confirm(),
            Err(GateError::AlreadyTerminal(DriverResponse::Rejected))
        );
        assert_eq!(gate.state(), DriverResponse::Rejected);
    }

    #[test]
    fn test_auto_safe_ignores_acknowledgment() {
        let mut gate = gate(80.0);
        assert_eq!(
            gate.reject(),
            Err(GateError::AlreadyTerminal(DriverResponse::AutoSafe))
        );
        assert_eq!(gate.state(), DriverResponse::AutoSafe);
    }

    #[test]
    fn test_finalize_requires_terminal_state() {
        let gate = gate(120.0);
        assert!(matches!(
            gate.finalize(),
            Err(GateError::NotTerminal(DriverResponse::AwaitingDriver))
        ));
    }

    #[test]
    fn test_finalize_carries_event_and_decision() {
        let gate = gate(80.0);
        let decision = gate.decision().clone();
        let record = gate.finalize().unwrap();
        assert_eq!(record.decision, decision);
        assert_eq!(record.vehicle(), "FL-DEF9090");
        assert_eq!(record.exit_point(), "Times Square");
        assert_eq!(record.driver_response, DriverResponse::AutoSafe);
    }
}
