//! Rule-based decision engine
//!
//! `evaluate` is a pure, total function of the Event: no hidden state, no I/O.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tollchain_core::{Decision, Event, Route, Toll};

/// Base toll charged on every trip
const BASE_TOLL: Decimal = Decimal::ONE;

/// Toll added per unit of congestion
const CONGESTION_SURCHARGE: Decimal = Decimal::TWO;

/// Congestion at or above which traffic is sent to ALTERNATE_1
pub const ALTERNATE_1_THRESHOLD: f64 = 0.4;

/// Congestion at or above which traffic is sent to ALTERNATE_2
pub const ALTERNATE_2_THRESHOLD: f64 = 0.8;

pub const SAFE_COMMENT: &str = "Safe driving, decision OK.";
pub const OVERSPEED_COMMENT: &str = "Overspeed detected. Driver must confirm or reject guidance.";

/// `round(1.0 + congestion * 2.0, 2)`
///
/// Computed and rounded in exact decimal arithmetic, half-to-even on the
/// decimal value. Binary float rounding can land one cent lower on exact
/// half-cent results (congestion `0.0075` gives `1.02` here, not `1.01`).
pub fn toll_for(event: &Event) -> Toll {
    // Event guarantees a finite congestion in [0, 1]
    let congestion = Decimal::from_f64(event.congestion()).unwrap_or_default();
    Toll::saturating(BASE_TOLL + congestion * CONGESTION_SURCHARGE)
}

/// Route by congestion band
pub fn route_for(event: &Event) -> Route {
    let congestion = event.congestion();
    if congestion < ALTERNATE_1_THRESHOLD {
        Route::Fastest
    } else if congestion < ALTERNATE_2_THRESHOLD {
        Route::Alternate1
    } else {
        Route::Alternate2
    }
}

/// Map an Event to its Decision
pub fn evaluate(event: &Event) -> Decision {
    let overspeed = event.speed() > event.speed_limit();
    let decision_correct = !overspeed;

    let comment = if decision_correct {
        SAFE_COMMENT
    } else {
        OVERSPEED_COMMENT
    };

    Decision {
        toll: toll_for(event),
        route: route_for(event),
        overspeed,
        decision_correct,
        comment: comment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn event(speed: f64, limit: f64, congestion: f64) -> Event {
        Event::new("TX-LMN3307", "I-95 Exit 15", speed, limit, congestion).unwrap()
    }

    #[test]
    fn test_overspeed_scenario() {
        let decision = evaluate(&event(120.0, 100.0, 0.6));
        assert_eq!(decision.toll.value(), dec!(2.2));
        assert_eq!(decision.route, Route::Alternate1);
        assert!(decision.overspeed);
        assert!(!decision.decision_correct);
        assert_eq!(decision.comment, OVERSPEED_COMMENT);
    }

    #[test]
    fn test_safe_scenario() {
        let decision = evaluate(&event(80.0, 100.0, 0.2));
        assert_eq!(decision.toll.value(), dec!(1.4));
        assert_eq!(decision.route, Route::Fastest);
        assert!(!decision.overspeed);
        assert!(decision.decision_correct);
        assert_eq!(decision.comment, SAFE_COMMENT);
    }

    #[test]
    fn test_speed_at_limit_is_not_overspeed() {
        assert!(!evaluate(&event(100.0, 100.0, 0.5)).overspeed);
    }

    #[test]
    fn test_route_band_edges() {
        assert_eq!(route_for(&event(50.0, 60.0, 0.0)), Route::Fastest);
        assert_eq!(route_for(&event(50.0, 60.0, 0.39)), Route::Fastest);
        assert_eq!(route_for(&event(50.0, 60.0, 0.4)), Route::Alternate1);
        assert_eq!(route_for(&event(50.0, 60.0, 0.79)), Route::Alternate1);
        assert_eq!(route_for(&event(50.0, 60.0, 0.8)), Route::Alternate2);
        assert_eq!(route_for(&event(50.0, 60.0, 1.0)), Route::Alternate2);
    }

    #[test]
    fn test_toll_range() {
        assert_eq!(toll_for(&event(50.0, 60.0, 0.0)).value(), dec!(1));
        assert_eq!(toll_for(&event(50.0, 60.0, 1.0)).value(), dec!(3));
        assert_eq!(toll_for(&event(50.0, 60.0, 0.333)).value(), dec!(1.67));
    }

    #[test]
    fn test_toll_half_cent_rounds_on_decimal_value() {
        // 1.015 and 1.025 are exact halves in decimal
        assert_eq!(toll_for(&event(50.0, 60.0, 0.0075)).value(), dec!(1.02));
        assert_eq!(toll_for(&event(50.0, 60.0, 0.0125)).value(), dec!(1.02));
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let samples = [
            (120.0, 100.0, 0.6),
            (80.0, 100.0, 0.2),
            (96.56, 88.51, 1.0),
            (0.0, 40.23, 0.1),
            (112.65, 104.61, 0.85),
        ];

        for (speed, limit, congestion) in samples {
            let e = event(speed, limit, congestion);
            let first = evaluate(&e);
            let second = evaluate(&e.clone());
            assert_eq!(first, second);
            assert_eq!(
                serde_json::to_vec(&first).unwrap(),
                serde_json::to_vec(&second).unwrap()
            );
        }
    }
}
