use serde::Serialize;

use crate::{
    EngineError,
    error::ensure_finite,
    problem::{
        cabin::{CargoValues, PaxValues},
        game_constants::DemandCoefficients,
        kilometers::Kilometers,
    },
};

/// 2^64, the first whole number a `u64` cannot hold.
const UNITS_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Daily demand of a route at a zero-price baseline. Passengers per class,
/// lbs per cargo class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RouteDemand {
    pub pax: PaxValues<u64>,
    pub cargo: CargoValues<u64>,
}

/// Demand available to a single departure, after reputation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TripDemand {
    pub pax: PaxValues<f64>,
    pub cargo: CargoValues<f64>,
}

/// `scale * sqrt(market_o * market_d) * (1 + d / d_ref)^-decay`, floored to
/// whole units. Symmetric in the two markets and non-decreasing in each.
///
/// Fails with [`EngineError::NonFinite`] when a class does not fit in a `u64`.
pub fn daily_demand(
    origin_market: f64,
    destination_market: f64,
    distance: Kilometers,
    coefficients: &DemandCoefficients,
) -> Result<RouteDemand, EngineError> {
    let market = (origin_market.max(0.0) * destination_market.max(0.0)).sqrt();
    let decay = (1.0 + distance.value() / coefficients.reference_distance_km)
        .powf(-coefficients.decay_exponent);
    let base = market * decay;

    let units = |scale: f64| -> Result<u64, EngineError> {
        let units = ensure_finite("demand", (scale * base).floor())?;
        if units >= UNITS_LIMIT {
            return Err(EngineError::NonFinite { quantity: "demand" });
        }
        Ok(units as u64)
    };

    let pax = &coefficients.pax;
    let cargo = &coefficients.cargo;
    Ok(RouteDemand {
        pax: PaxValues::new(units(pax.economy)?, units(pax.business)?, units(pax.first)?),
        cargo: CargoValues::new(units(cargo.large)?, units(cargo.heavy)?),
    })
}

impl RouteDemand {
    /// Spreads the daily demand over `trips_per_day` departures. Fewer than one
    /// trip a day accumulates several days of demand per departure.
    pub fn per_trip(&self, trips_per_day: f64, reputation: f64) -> TripDemand {
        let share = |daily: u64| daily as f64 * reputation / trips_per_day;
        TripDemand {
            pax: self.pax.map(|_, daily| share(daily)),
            cargo: self.cargo.map(|_, daily| share(daily)),
        }
    }
}
