use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::problem::kmh::Kmh;

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize, JsonSchema)]
pub struct Kilometers(f64);

impl Kilometers {
    pub const ZERO: Kilometers = Kilometers(0.0);

    pub fn new(value: f64) -> Self {
        Kilometers(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Hours needed to cover this distance at `speed`.
    pub fn hours_at(&self, speed: Kmh) -> f64 {
        self.0 / speed.value()
    }

    /// [`Kilometers::hours_at`] as a duration, saturating at
    /// [`SignedDuration::MAX`] when out of range.
    pub fn flight_time(&self, speed: Kmh) -> SignedDuration {
        SignedDuration::try_from_secs_f64(self.hours_at(speed) * 3600.0)
            .unwrap_or(SignedDuration::MAX)
    }
}

impl Eq for Kilometers {}

impl PartialOrd for Kilometers {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Kilometers {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}
