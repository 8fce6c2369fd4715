use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{EngineError, economics::evaluator::EvaluationOptions, problem::kilometers::Kilometers};

pub const MAX_RESULTS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AirportFilter {
    #[default]
    All,
    Only(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AircraftFilter {
    #[default]
    All,
    Only(Vec<String>),
}

/// Which (route, aircraft) pairs a search considers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchScope {
    /// One aircraft on one route.
    Route {
        origin: String,
        destination: String,
        aircraft: String,
    },
    /// A set of aircraft on one route.
    RouteFleet {
        origin: String,
        destination: String,
        aircraft: AircraftFilter,
    },
    /// Every destination reachable from one or several origins.
    FromOrigins {
        origins: Vec<String>,
        aircraft: AircraftFilter,
    },
    CrossProduct {
        origins: AirportFilter,
        destinations: AirportFilter,
        aircraft: AircraftFilter,
    },
}

/// Inclusive bounds; a missing side is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Bounds<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub fn new(min: Option<T>, max: Option<T>) -> Self {
        Bounds { min, max }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    fn is_ordered(&self) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }
}

/// Route filters applied before any economic work. Flight time is measured at
/// the fastest cruise setting of the query.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RouteConstraint {
    pub distance: Bounds<Kilometers>,
    pub flight_time: Bounds<SignedDuration>,
}

impl RouteConstraint {
    pub fn validate(&self) -> Result<(), EngineError> {
        for km in [self.distance.min, self.distance.max].into_iter().flatten() {
            if !(km.value().is_finite() && km.value() >= 0.0) {
                return Err(EngineError::invalid_argument(
                    "constraint",
                    format!("distance bounds must be finite and non-negative, got {}", km.value()),
                ));
            }
        }
        for time in [self.flight_time.min, self.flight_time.max]
            .into_iter()
            .flatten()
        {
            if time.is_negative() {
                return Err(EngineError::invalid_argument(
                    "constraint",
                    format!("flight time bounds must not be negative, got {time}"),
                ));
            }
        }

        if !self.distance.is_ordered() || !self.flight_time.is_ordered() {
            return Err(EngineError::invalid_argument(
                "constraint",
                "the lower bound is above the upper bound",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Threads {
    Single,
    #[default]
    Auto,
    Multi(usize),
}

impl Threads {
    pub fn number_of_threads(&self) -> usize {
        match self {
            Threads::Single => 1,
            Threads::Multi(num) => *num,
            Threads::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchQuery {
    pub scope: SearchScope,
    #[serde(default)]
    pub constraint: RouteConstraint,
    #[serde(default)]
    pub options: EvaluationOptions,
    /// Number of results to keep, best first.
    pub k: usize,
    #[serde(default)]
    pub threads: Threads,
}

impl SearchQuery {
    pub fn new(scope: SearchScope, k: usize) -> Self {
        SearchQuery {
            scope,
            constraint: RouteConstraint::default(),
            options: EvaluationOptions::default(),
            k,
            threads: Threads::default(),
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(1..=MAX_RESULTS).contains(&self.k) {
            return Err(EngineError::invalid_argument(
                "k",
                format!("must be within [1, {MAX_RESULTS}], got {}", self.k),
            ));
        }
        if self.threads == Threads::Multi(0) {
            return Err(EngineError::invalid_argument(
                "threads",
                "must be at least 1",
            ));
        }
        self.constraint.validate()
    }
}
