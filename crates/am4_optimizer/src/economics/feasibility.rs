use std::fmt;

use serde::Serialize;

use crate::problem::{aircraft::Aircraft, kilometers::Kilometers, route::Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    RangeExceeded,
    RunwayTooShort,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::RangeExceeded => write!(f, "range_exceeded"),
            RejectionReason::RunwayTooShort => write!(f, "runway_too_short"),
        }
    }
}

/// Why an aircraft cannot fly a route, with the figures that failed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rejection {
    pub reason: RejectionReason,
    /// Maximum range or required runway length.
    pub limit: f64,
    /// Route distance or shortest runway.
    pub actual: f64,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            RejectionReason::RangeExceeded => write!(
                f,
                "{}: route is {:.0} km, aircraft range is {:.0} km",
                self.reason, self.actual, self.limit
            ),
            RejectionReason::RunwayTooShort => write!(
                f,
                "{}: shortest runway is {:.0} ft, aircraft needs {:.0} ft",
                self.reason, self.actual, self.limit
            ),
        }
    }
}

/// Range first, then runways. Limits are inclusive.
pub fn check(
    range_km: f64,
    runway_required_ft: f64,
    distance: Kilometers,
    origin_runway_ft: f64,
    destination_runway_ft: f64,
) -> Result<(), Rejection> {
    if distance.value() > range_km {
        return Err(Rejection {
            reason: RejectionReason::RangeExceeded,
            limit: range_km,
            actual: distance.value(),
        });
    }

    let shortest_runway = origin_runway_ft.min(destination_runway_ft);
    if shortest_runway < runway_required_ft {
        return Err(Rejection {
            reason: RejectionReason::RunwayTooShort,
            limit: runway_required_ft,
            actual: shortest_runway,
        });
    }

    Ok(())
}

pub fn check_route(aircraft: &Aircraft, route: &Route) -> Result<(), Rejection> {
    check(
        aircraft.range_km(),
        aircraft.runway_ft(),
        route.distance(),
        route.origin().runway_ft(),
        route.destination().runway_ft(),
    )
}
