//! Chooses how to split an aircraft's capacity between classes.
//!
//! Fuel, crew, maintenance, wear and lease do not depend on the split, so the
//! best configuration maximizes the sum of per-class contributions: ticket
//! revenue minus the CO2 charged on what the class carries and offers. A class
//! never gets more seats than its unconstrained optimal load, since a seat past
//! that point sells nothing and still pays CO2.

use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    EngineError,
    problem::{
        aircraft::AircraftKind,
        cabin::{CargoClass, CargoHold, CargoSplit, Configuration, PaxCabin, PaxClass, PaxSeats},
    },
};

use super::{cost::Payload, pricing::TripMarket};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", content = "order", rename_all = "snake_case")]
pub enum ConfigAlgorithm {
    /// Exhaustive search for the most profitable split.
    #[default]
    Auto,
    /// Fill the cabin class by class in the given order.
    PaxOrder([PaxClass; 3]),
    /// Give the hold to one cargo class first.
    CargoOrder(CargoClass),
}

impl fmt::Display for ConfigAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigAlgorithm::Auto => write!(f, "AUTO"),
            ConfigAlgorithm::PaxOrder(order) => {
                for class in order {
                    write!(f, "{}", class.code())?;
                }
                Ok(())
            }
            ConfigAlgorithm::CargoOrder(class) => write!(f, "{}", class.code()),
        }
    }
}

impl FromStr for ConfigAlgorithm {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().to_ascii_uppercase();
        match value.as_str() {
            "AUTO" => return Ok(ConfigAlgorithm::Auto),
            "L" => return Ok(ConfigAlgorithm::CargoOrder(CargoClass::Large)),
            "H" => return Ok(ConfigAlgorithm::CargoOrder(CargoClass::Heavy)),
            _ => {}
        }

        let classes: SmallVec<[PaxClass; 3]> =
            value.chars().filter_map(PaxClass::from_code).collect();
        let is_permutation = value.len() == 3
            && classes.len() == 3
            && PaxClass::ALL.iter().all(|class| classes.contains(class));
        if !is_permutation {
            return Err(EngineError::invalid_argument(
                "configuration",
                format!("unknown configuration algorithm `{value}`"),
            ));
        }

        Ok(ConfigAlgorithm::PaxOrder([classes[0], classes[1], classes[2]]))
    }
}

/// Configuration search over one trip market.
pub struct ConfigurationSearch<'a> {
    market: &'a TripMarket,
    co2_unit_cost: f64,
    large_efficiency: f64,
    step: u32,
}

impl<'a> ConfigurationSearch<'a> {
    pub fn new(market: &'a TripMarket, co2_unit_cost: f64, large_efficiency: f64, step: u32) -> Self {
        ConfigurationSearch {
            market,
            co2_unit_cost,
            large_efficiency,
            step: step.max(1),
        }
    }

    /// Cabin and hold are independent, so a combi aircraft optimizes each on its own.
    pub fn best(&self, kind: &AircraftKind, algorithm: ConfigAlgorithm) -> Configuration {
        match kind {
            AircraftKind::Passenger(cabin) => Configuration::Pax {
                seats: self.pax(cabin, algorithm),
            },
            AircraftKind::Cargo(hold) => Configuration::Cargo {
                split: self.cargo(hold, algorithm),
            },
            AircraftKind::Combi { cabin, hold } => Configuration::Combi {
                seats: self.pax(cabin, algorithm),
                split: self.cargo(hold, algorithm),
            },
        }
    }

    fn pax(&self, cabin: &PaxCabin, algorithm: ConfigAlgorithm) -> PaxSeats {
        match algorithm {
            ConfigAlgorithm::PaxOrder(order) => self.fill_pax(cabin, order),
            ConfigAlgorithm::Auto | ConfigAlgorithm::CargoOrder(_) => self.enumerate_pax(cabin),
        }
    }

    fn cargo(&self, hold: &CargoHold, algorithm: ConfigAlgorithm) -> CargoSplit {
        match algorithm {
            ConfigAlgorithm::CargoOrder(first) => self.fill_cargo(hold, first),
            ConfigAlgorithm::Auto | ConfigAlgorithm::PaxOrder(_) => self.enumerate_cargo(hold),
        }
    }

    fn pax_class_profit(&self, class: PaxClass, seats: u32) -> f64 {
        let ticket = self.market.pax_ticket(class, seats);
        ticket.revenue - self.co2_unit_cost * Payload::of_pax_class(class, &ticket).co2_units()
    }

    fn pax_cap(&self, cabin: &PaxCabin, class: PaxClass) -> u32 {
        let useful = self.market.pax_unconstrained_load(class).ceil();
        // `as` saturates
        cabin.class_limit(class).min(useful as u32)
    }

    fn class_candidates(&self, class: PaxClass, cap: u32) -> SmallVec<[(u32, f64); 32]> {
        (0..cap)
            .step_by(self.step as usize)
            .chain(std::iter::once(cap))
            .map(|seats| (seats, self.pax_class_profit(class, seats)))
            .collect()
    }

    /// Enumerates first and business seats on the step grid, and picks the
    /// economy count from a table of the best economy profit per leftover
    /// budget. Ties keep the first candidate met.
    pub fn enumerate_pax(&self, cabin: &PaxCabin) -> PaxSeats {
        let budget = cabin.seat_units;
        let economy_cap = self.pax_cap(cabin, PaxClass::Economy);

        let mut best_economy = Vec::with_capacity(economy_cap as usize + 1);
        let mut running = (0, self.pax_class_profit(PaxClass::Economy, 0));
        for seats in 0..=economy_cap {
            let profit = self.pax_class_profit(PaxClass::Economy, seats);
            if profit > running.1 {
                running = (seats, profit);
            }
            best_economy.push(running);
        }

        let first = self.class_candidates(PaxClass::First, self.pax_cap(cabin, PaxClass::First));
        let business = self.class_candidates(
            PaxClass::Business,
            self.pax_cap(cabin, PaxClass::Business),
        );

        let mut best: Option<(PaxSeats, f64)> = None;
        for &(first_seats, first_profit) in &first {
            let used_by_first = first_seats * PaxClass::First.seat_units();
            for &(business_seats, business_profit) in &business {
                let used = used_by_first + business_seats * PaxClass::Business.seat_units();
                if used > budget {
                    break;
                }

                let left = (budget - used).min(economy_cap);
                let (economy_seats, economy_profit) = best_economy[left as usize];
                let profit = first_profit + business_profit + economy_profit;
                if best.is_none_or(|(_, best_profit)| profit > best_profit) {
                    best = Some((
                        PaxSeats::new(economy_seats, business_seats, first_seats),
                        profit,
                    ));
                }
            }
        }

        best.map(|(seats, _)| seats).unwrap_or_default()
    }

    /// Every class but the last takes what it can sell; the last one takes
    /// whatever budget is left.
    pub fn fill_pax(&self, cabin: &PaxCabin, order: [PaxClass; 3]) -> PaxSeats {
        let mut remaining = cabin.seat_units;
        let mut seats = PaxSeats::default();

        for (position, class) in order.into_iter().enumerate() {
            let fits = cabin
                .max_seats
                .get(class)
                .min(remaining / class.seat_units());
            let count = if position + 1 < order.len() {
                fits.min(self.pax_cap(cabin, class))
            } else {
                fits
            };
            seats.set(class, count);
            remaining -= count * class.seat_units();
        }

        seats
    }

    fn cargo_profit(&self, hold: &CargoHold, split: CargoSplit) -> f64 {
        let tickets = self
            .market
            .cargo_tickets(&split.capacities(hold, self.large_efficiency));
        tickets
            .iter()
            .map(|(_, ticket)| {
                ticket.revenue - self.co2_unit_cost * Payload::of_cargo_class(&ticket).co2_units()
            })
            .sum()
    }

    pub fn enumerate_cargo(&self, hold: &CargoHold) -> CargoSplit {
        let step = self.step.min(u32::from(CargoSplit::MAX_PCT)) as usize;
        let candidates = (0..CargoSplit::MAX_PCT)
            .step_by(step)
            .chain(std::iter::once(CargoSplit::MAX_PCT));

        let mut best: Option<(CargoSplit, f64)> = None;
        for large_pct in candidates {
            let split = CargoSplit { large_pct };
            let profit = self.cargo_profit(hold, split);
            if best.is_none_or(|(_, best_profit)| profit > best_profit) {
                best = Some((split, profit));
            }
        }

        best.map(|(split, _)| split)
            .unwrap_or(CargoSplit { large_pct: 0 })
    }

    /// Gives `first` the share of the hold it can sell, the other class the rest.
    pub fn fill_cargo(&self, hold: &CargoHold, first: CargoClass) -> CargoSplit {
        let capacity = f64::from(hold.capacity_lbs);
        let lbs_per_pct = match first {
            CargoClass::Large => capacity * self.large_efficiency / 100.0,
            CargoClass::Heavy => capacity / 100.0,
        };

        let wanted = self.market.cargo_unconstrained_load(first) / lbs_per_pct;
        let pct = if wanted.is_finite() {
            wanted.ceil().clamp(0.0, f64::from(CargoSplit::MAX_PCT)) as u8
        } else {
            CargoSplit::MAX_PCT
        };

        match first {
            CargoClass::Large => CargoSplit { large_pct: pct },
            CargoClass::Heavy => CargoSplit {
                large_pct: CargoSplit::MAX_PCT - pct,
            },
        }
    }
}
