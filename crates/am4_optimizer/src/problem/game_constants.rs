//! Game-balance constants. Every coefficient the economic models use lives
//! here, so the models themselves carry no literals.

use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    EngineError,
    error::ensure_non_negative,
    problem::{
        cabin::{CargoValues, PaxValues},
        kilometers::Kilometers,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    Easy,
    Realism,
}

/// Linear price curve of one class: the reference ("auto") price grows with
/// distance, and nobody buys above `elasticity` times that reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PriceCurve {
    pub per_km: f64,
    pub base: f64,
    pub elasticity: f64,
}

impl PriceCurve {
    pub const fn new(per_km: f64, base: f64, elasticity: f64) -> Self {
        PriceCurve {
            per_km,
            base,
            elasticity,
        }
    }

    pub fn reference_price(&self, distance: Kilometers) -> f64 {
        self.per_km * distance.value() + self.base
    }

    /// The price at which demand drops to zero.
    pub fn choke_price(&self, distance: Kilometers) -> f64 {
        self.elasticity * self.reference_price(distance)
    }

    fn validate(&self, name: &'static str) -> Result<(), EngineError> {
        ensure_non_negative(name, self.per_km)?;
        ensure_non_negative(name, self.base)?;
        if !(self.elasticity.is_finite() && self.elasticity > 0.0) {
            return Err(EngineError::invalid_argument(
                name,
                format!("elasticity must be positive, got {}", self.elasticity),
            ));
        }
        Ok(())
    }
}

/// `daily demand = scale * sqrt(market_o * market_d) * (1 + d / reference_distance)^-decay`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DemandCoefficients {
    pub pax: PaxValues<f64>,
    /// lbs per day.
    pub cargo: CargoValues<f64>,
    pub reference_distance_km: f64,
    pub decay_exponent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PricingCoefficients {
    /// Dollars per seat.
    pub pax: PaxValues<PriceCurve>,
    /// Dollars per lb.
    pub cargo: CargoValues<PriceCurve>,
}

/// Range of cruise settings, as a fraction of the aircraft's nominal cruise speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CruiseLimits {
    pub min_speed_factor: f64,
    pub max_speed_factor: f64,
    /// Fuel burn per km scales with `speed_factor ^ fuel_exponent`.
    pub fuel_exponent: f64,
}

/// Staff training bonuses, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Training {
    pub fuel_pct: f64,
    pub co2_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GameConstants {
    pub mode: GameMode,
    /// Dollars per 1000 lbs of fuel.
    pub fuel_price: f64,
    /// Dollars per 1000 CO2 quotas.
    pub co2_price: f64,
    /// Fraction of demand that converts into bookings, in `(0, 1]`.
    pub reputation: f64,
    /// Game-wide multiplier on aircraft speed.
    pub speed_multiplier: f64,
    /// Ground time between two flights.
    pub turnaround: SignedDuration,
    /// Share of the hold usable by large cargo.
    pub cargo_large_efficiency: f64,
    /// Wear cost of one trip, as a fraction of the purchase price.
    pub wear_ratio: f64,
    pub training: Training,
    pub demand: DemandCoefficients,
    pub pricing: PricingCoefficients,
    pub cruise: CruiseLimits,
}

impl GameConstants {
    /// Approximation of the published easy-mode mechanics. The optimal
    /// ticket sits at 1.10/1.08/1.06 times the reference price for Y/J/F.
    pub fn easy() -> Self {
        GameConstants {
            mode: GameMode::Easy,
            speed_multiplier: 1.5,
            pricing: PricingCoefficients {
                pax: PaxValues::new(
                    PriceCurve::new(0.4, 170.0, 2.2),
                    PriceCurve::new(0.8, 560.0, 2.16),
                    PriceCurve::new(1.2, 1200.0, 2.12),
                ),
                cargo: CargoValues::new(
                    PriceCurve::new(0.000948, 0.852, 2.2),
                    PriceCurve::new(0.000690, 0.283, 2.16),
                ),
            },
            ..Self::realism()
        }
    }

    /// Approximation of the published realism-mode mechanics.
    pub fn realism() -> Self {
        GameConstants {
            mode: GameMode::Realism,
            fuel_price: 700.0,
            co2_price: 120.0,
            reputation: 0.87,
            speed_multiplier: 1.0,
            turnaround: SignedDuration::from_mins(30),
            cargo_large_efficiency: 0.7,
            wear_ratio: 0.000_002,
            training: Training::default(),
            demand: DemandCoefficients {
                pax: PaxValues::new(20.0, 5.0, 2.0),
                cargo: CargoValues::new(8_000.0, 5_000.0),
                reference_distance_km: 5_000.0,
                decay_exponent: 0.3,
            },
            pricing: PricingCoefficients {
                pax: PaxValues::new(
                    PriceCurve::new(0.3, 150.0, 2.2),
                    PriceCurve::new(0.6, 500.0, 2.16),
                    PriceCurve::new(0.9, 1000.0, 2.12),
                ),
                cargo: CargoValues::new(
                    PriceCurve::new(0.000776, 0.851, 2.2),
                    PriceCurve::new(0.000518, 0.246, 2.16),
                ),
            },
            cruise: CruiseLimits {
                min_speed_factor: 0.6,
                max_speed_factor: 1.0,
                fuel_exponent: 2.0,
            },
        }
    }

    pub fn for_mode(mode: GameMode) -> Self {
        match mode {
            GameMode::Easy => Self::easy(),
            GameMode::Realism => Self::realism(),
        }
    }

    pub fn turnaround_hours(&self) -> f64 {
        self.turnaround.as_secs_f64() / 3600.0
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        ensure_non_negative("fuel_price", self.fuel_price)?;
        ensure_non_negative("co2_price", self.co2_price)?;
        ensure_non_negative("wear_ratio", self.wear_ratio)?;

        ensure_fraction("reputation", self.reputation)?;
        ensure_fraction("cargo_large_efficiency", self.cargo_large_efficiency)?;
        ensure_positive("speed_multiplier", self.speed_multiplier)?;

        if self.turnaround.is_negative() {
            return Err(EngineError::invalid_argument(
                "turnaround",
                format!("must not be negative, got {}", self.turnaround),
            ));
        }

        for (name, pct) in [
            ("training.fuel_pct", self.training.fuel_pct),
            ("training.co2_pct", self.training.co2_pct),
        ] {
            if !(pct.is_finite() && (0.0..100.0).contains(&pct)) {
                return Err(EngineError::invalid_argument(
                    name,
                    format!("must be within [0, 100), got {pct}"),
                ));
            }
        }

        for (_, scale) in self.demand.pax.iter() {
            ensure_non_negative("demand.pax", scale)?;
        }
        for (_, scale) in self.demand.cargo.iter() {
            ensure_non_negative("demand.cargo", scale)?;
        }
        ensure_positive(
            "demand.reference_distance_km",
            self.demand.reference_distance_km,
        )?;
        ensure_non_negative("demand.decay_exponent", self.demand.decay_exponent)?;

        for (_, curve) in self.pricing.pax.iter() {
            curve.validate("pricing.pax")?;
        }
        for (_, curve) in self.pricing.cargo.iter() {
            curve.validate("pricing.cargo")?;
        }

        let cruise = &self.cruise;
        ensure_positive("cruise.min_speed_factor", cruise.min_speed_factor)?;
        ensure_non_negative("cruise.fuel_exponent", cruise.fuel_exponent)?;
        if !(cruise.max_speed_factor.is_finite()
            && cruise.max_speed_factor >= cruise.min_speed_factor)
        {
            return Err(EngineError::invalid_argument(
                "cruise.max_speed_factor",
                format!(
                    "must be at least the minimum {}, got {}",
                    cruise.min_speed_factor, cruise.max_speed_factor
                ),
            ));
        }

        Ok(())
    }
}

fn ensure_positive(name: &'static str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::invalid_argument(
            name,
            format!("must be positive, got {value}"),
        ))
    }
}

fn ensure_fraction(name: &'static str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(EngineError::invalid_argument(
            name,
            format!("must be within (0, 1], got {value}"),
        ))
    }
}
