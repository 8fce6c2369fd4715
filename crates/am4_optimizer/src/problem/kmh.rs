use std::ops::Mul;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize, JsonSchema)]
pub struct Kmh(f64);

impl Kmh {
    pub fn new(value: f64) -> Self {
        Kmh(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Mul<f64> for Kmh {
    type Output = Kmh;

    fn mul(self, factor: f64) -> Kmh {
        Kmh(self.0 * factor)
    }
}
