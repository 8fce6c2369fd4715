//! Ticket pricing on a linear demand curve.
//!
//! At price `p` a class with per-trip demand `D` and choke price `P` sells
//! `D * (1 - p / P)` units. Revenue `p * D * (1 - p / P)` peaks at `p = P / 2`,
//! where half of the demand buys. When the class has fewer seats than that,
//! revenue rises all the way up to the capacity, so the best price is the one
//! that sells exactly the capacity: `p = P * (1 - C / D)`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    EngineError,
    error::ensure_non_negative,
    problem::{
        cabin::{CargoClass, CargoValues, PaxClass, PaxSeats, PaxValues},
        game_constants::{PriceCurve, PricingCoefficients},
        kilometers::Kilometers,
    },
};

use super::demand::TripDemand;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Ticket {
    pub price: f64,
    pub load: f64,
    pub capacity: f64,
    pub load_factor: f64,
    pub revenue: f64,
}

impl Ticket {
    fn new(price: f64, load: f64, capacity: f64) -> Self {
        Ticket {
            price,
            load,
            capacity,
            load_factor: if capacity > 0.0 { load / capacity } else { 0.0 },
            revenue: price * load,
        }
    }
}

/// Caller-chosen prices. Classes without a price are priced optimally.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct FixedPrices {
    pub pax: Option<PaxValues<f64>>,
    pub cargo: Option<CargoValues<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PricePolicy {
    /// Revenue-maximizing closed form.
    #[default]
    Optimal,
    Fixed(FixedPrices),
}

impl PricePolicy {
    pub fn validate(&self) -> Result<(), EngineError> {
        if let PricePolicy::Fixed(prices) = self {
            if let Some(pax) = &prices.pax {
                for (_, price) in pax.iter() {
                    ensure_non_negative("price", price)?;
                }
            }
            if let Some(cargo) = &prices.cargo {
                for (_, price) in cargo.iter() {
                    ensure_non_negative("price", price)?;
                }
            }
        }
        Ok(())
    }
}

/// Prices one class of one route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassPricer {
    choke_price: f64,
    fixed_price: Option<f64>,
}

impl ClassPricer {
    pub fn new(curve: &PriceCurve, distance: Kilometers, fixed_price: Option<f64>) -> Self {
        ClassPricer {
            choke_price: curve.choke_price(distance),
            fixed_price,
        }
    }

    pub fn ticket(&self, demand: f64, capacity: f64) -> Ticket {
        match self.fixed_price {
            Some(price) => fixed_ticket(price, self.choke_price, demand, capacity),
            None => optimal_ticket(self.choke_price, demand, capacity),
        }
    }

    /// Units this class would sell with unlimited capacity. Seats past this
    /// count never sell.
    pub fn unconstrained_load(&self, demand: f64) -> f64 {
        self.ticket(demand, f64::INFINITY).load
    }
}

/// Pricers and per-trip demand of every class of a route, for one schedule.
#[derive(Debug, Clone, Copy)]
pub struct TripMarket {
    pub pax: PaxValues<ClassPricer>,
    pub cargo: CargoValues<ClassPricer>,
    pub demand: TripDemand,
}

impl TripMarket {
    pub fn new(
        pricing: &PricingCoefficients,
        policy: &PricePolicy,
        distance: Kilometers,
        demand: TripDemand,
    ) -> Self {
        let fixed = match policy {
            PricePolicy::Optimal => FixedPrices::default(),
            PricePolicy::Fixed(prices) => *prices,
        };

        TripMarket {
            pax: pricing.pax.map(|class, curve| {
                ClassPricer::new(&curve, distance, fixed.pax.map(|prices| prices.get(class)))
            }),
            cargo: pricing.cargo.map(|class, curve| {
                ClassPricer::new(
                    &curve,
                    distance,
                    fixed.cargo.map(|prices| prices.get(class)),
                )
            }),
            demand,
        }
    }

    pub fn pax_ticket(&self, class: PaxClass, seats: u32) -> Ticket {
        self.pax
            .get(class)
            .ticket(self.demand.pax.get(class), f64::from(seats))
    }

    pub fn cargo_ticket(&self, class: CargoClass, capacity_lbs: f64) -> Ticket {
        self.cargo
            .get(class)
            .ticket(self.demand.cargo.get(class), capacity_lbs)
    }

    pub fn pax_tickets(&self, seats: &PaxSeats) -> PaxValues<Ticket> {
        seats.map(|class, count| self.pax_ticket(class, count))
    }

    pub fn cargo_tickets(&self, capacities: &CargoValues<f64>) -> CargoValues<Ticket> {
        capacities.map(|class, lbs| self.cargo_ticket(class, lbs))
    }

    pub fn pax_unconstrained_load(&self, class: PaxClass) -> f64 {
        self.pax
            .get(class)
            .unconstrained_load(self.demand.pax.get(class))
    }

    pub fn cargo_unconstrained_load(&self, class: CargoClass) -> f64 {
        self.cargo
            .get(class)
            .unconstrained_load(self.demand.cargo.get(class))
    }
}

pub fn optimal_ticket(choke_price: f64, demand: f64, capacity: f64) -> Ticket {
    let unconstrained_price = choke_price / 2.0;
    if demand <= 0.0 || capacity <= 0.0 {
        return Ticket::new(unconstrained_price, 0.0, capacity.max(0.0));
    }

    let half_demand = demand / 2.0;
    if capacity >= half_demand {
        Ticket::new(unconstrained_price, half_demand, capacity)
    } else {
        Ticket::new(choke_price * (1.0 - capacity / demand), capacity, capacity)
    }
}

pub fn fixed_ticket(price: f64, choke_price: f64, demand: f64, capacity: f64) -> Ticket {
    let willing = if choke_price > 0.0 {
        (demand * (1.0 - price / choke_price)).clamp(0.0, demand.max(0.0))
    } else {
        0.0
    };

    Ticket::new(price, willing.min(capacity.max(0.0)), capacity.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconstrained_optimum() {
        let ticket = optimal_ticket(2_100.0, 300.0, 400.0);
        assert_eq!(ticket.price, 1_050.0);
        assert_eq!(ticket.load, 150.0);
        assert_eq!(ticket.revenue, 157_500.0);
        assert_eq!(ticket.load_factor, 0.375);
    }

    #[test]
    fn test_capacity_bound_optimum() {
        let ticket = optimal_ticket(2_100.0, 300.0, 100.0);
        assert_eq!(ticket.load, 100.0);
        assert!((ticket.price - 1_400.0).abs() < 1e-9);
        assert_eq!(ticket.load_factor, 1.0);

        // no other price beats it under the same cap
        for step in 0..=2_100 {
            let other = fixed_ticket(f64::from(step), 2_100.0, 300.0, 100.0);
            assert!(other.revenue <= ticket.revenue + 1e-6);
        }
    }

    #[test]
    fn test_optimal_load_never_exceeds_demand_or_capacity() {
        for demand in [0.0, 0.5, 3.0, 75.0, 300.0, 10_000.0] {
            for capacity in [0.0, 1.0, 37.0, 150.0, 1_000.0] {
                let ticket = optimal_ticket(4_600.0, demand, capacity);
                assert!(ticket.load <= demand.min(capacity));
                assert!(ticket.load_factor <= 1.0);
            }
        }
    }

    #[test]
    fn test_zero_demand_has_zero_revenue() {
        let ticket = optimal_ticket(2_100.0, 0.0, 100.0);
        assert_eq!(ticket.revenue, 0.0);
        assert_eq!(ticket.load, 0.0);

        let ticket = fixed_ticket(10.0, 2_100.0, 0.0, 100.0);
        assert_eq!(ticket.revenue, 0.0);
    }

    #[test]
    fn test_fixed_price() {
        // (1 - 1050 / 2100) * 300 = 150 willing, 120 seats
        let ticket = fixed_ticket(1_050.0, 2_100.0, 300.0, 120.0);
        assert_eq!(ticket.load, 120.0);
        assert_eq!(ticket.revenue, 126_000.0);

        // priced out of the market
        let ticket = fixed_ticket(2_500.0, 2_100.0, 300.0, 120.0);
        assert_eq!(ticket.load, 0.0);

        // free tickets fill the plane up to demand
        let ticket = fixed_ticket(0.0, 2_100.0, 300.0, 400.0);
        assert_eq!(ticket.load, 300.0);
    }

    #[test]
    fn test_class_pricer() {
        let curve = PriceCurve::new(0.5, 100.0, 2.0);
        let pricer = ClassPricer::new(&curve, Kilometers::new(1_000.0), None);
        assert_eq!(pricer.unconstrained_load(300.0), 150.0);

        let pricer = ClassPricer::new(&curve, Kilometers::new(1_000.0), Some(300.0));
        // choke 1200, (1 - 0.25) * 300
        assert_eq!(pricer.unconstrained_load(300.0), 225.0);
    }

    #[test]
    fn test_trip_market_mixes_fixed_and_optimal_prices() {
        let constants = crate::test_utils::create_scenario_constants();
        let demand = TripDemand {
            pax: PaxValues::new(300.0, 75.0, 37.5),
            cargo: CargoValues::new(0.0, 0.0),
        };
        let policy = PricePolicy::Fixed(FixedPrices {
            pax: Some(PaxValues::new(1_050.0, 0.0, 0.0)),
            cargo: None,
        });

        let market = TripMarket::new(
            &constants.pricing,
            &policy,
            Kilometers::new(3_000.0),
            demand,
        );
        let tickets = market.pax_tickets(&PaxSeats::new(100, 20, 10));
        assert_eq!(tickets.economy.price, 1_050.0);
        assert_eq!(tickets.economy.load, 100.0);

        let optimal = TripMarket::new(
            &constants.pricing,
            &PricePolicy::Optimal,
            Kilometers::new(3_000.0),
            demand,
        );
        let tickets = optimal.pax_tickets(&PaxSeats::new(100, 20, 10));
        assert!((tickets.economy.revenue - 140_000.0).abs() < 1e-6);
        assert_eq!(optimal.cargo_ticket(CargoClass::Large, 1_000.0).revenue, 0.0);
    }

    #[test]
    fn test_policy_validation() {
        let policy = PricePolicy::Fixed(FixedPrices {
            pax: Some(PaxValues::new(100.0, -1.0, 300.0)),
            cargo: None,
        });
        assert!(policy.validate().is_err());
        assert!(PricePolicy::Optimal.validate().is_ok());
    }
}
