//! Passenger cabins, cargo holds and the configurations an aircraft can fly with.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaxClass {
    Economy,
    Business,
    First,
}

impl PaxClass {
    pub const ALL: [PaxClass; 3] = [PaxClass::Economy, PaxClass::Business, PaxClass::First];

    /// Cabin space taken by one seat of this class.
    pub fn seat_units(self) -> u32 {
        match self {
            PaxClass::Economy => 1,
            PaxClass::Business => 2,
            PaxClass::First => 3,
        }
    }

    pub fn code(self) -> char {
        match self {
            PaxClass::Economy => 'Y',
            PaxClass::Business => 'J',
            PaxClass::First => 'F',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'Y' => Some(PaxClass::Economy),
            'J' => Some(PaxClass::Business),
            'F' => Some(PaxClass::First),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CargoClass {
    Large,
    Heavy,
}

impl CargoClass {
    pub const ALL: [CargoClass; 2] = [CargoClass::Large, CargoClass::Heavy];

    pub fn code(self) -> char {
        match self {
            CargoClass::Large => 'L',
            CargoClass::Heavy => 'H',
        }
    }
}

/// One value per passenger class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct PaxValues<T> {
    pub economy: T,
    pub business: T,
    pub first: T,
}

impl<T: Copy> PaxValues<T> {
    pub fn new(economy: T, business: T, first: T) -> Self {
        PaxValues {
            economy,
            business,
            first,
        }
    }

    pub fn get(&self, class: PaxClass) -> T {
        match class {
            PaxClass::Economy => self.economy,
            PaxClass::Business => self.business,
            PaxClass::First => self.first,
        }
    }

    pub fn set(&mut self, class: PaxClass, value: T) {
        match class {
            PaxClass::Economy => self.economy = value,
            PaxClass::Business => self.business = value,
            PaxClass::First => self.first = value,
        }
    }

    pub fn map<U: Copy>(&self, mut f: impl FnMut(PaxClass, T) -> U) -> PaxValues<U> {
        PaxValues {
            economy: f(PaxClass::Economy, self.economy),
            business: f(PaxClass::Business, self.business),
            first: f(PaxClass::First, self.first),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PaxClass, T)> + '_ {
        PaxClass::ALL.into_iter().map(|class| (class, self.get(class)))
    }
}

/// One value per cargo class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct CargoValues<T> {
    pub large: T,
    pub heavy: T,
}

impl<T: Copy> CargoValues<T> {
    pub fn new(large: T, heavy: T) -> Self {
        CargoValues { large, heavy }
    }

    pub fn get(&self, class: CargoClass) -> T {
        match class {
            CargoClass::Large => self.large,
            CargoClass::Heavy => self.heavy,
        }
    }

    pub fn map<U: Copy>(&self, mut f: impl FnMut(CargoClass, T) -> U) -> CargoValues<U> {
        CargoValues {
            large: f(CargoClass::Large, self.large),
            heavy: f(CargoClass::Heavy, self.heavy),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (CargoClass, T)> + '_ {
        CargoClass::ALL.into_iter().map(|class| (class, self.get(class)))
    }
}

/// Seats per passenger class.
pub type PaxSeats = PaxValues<u32>;

impl PaxSeats {
    pub fn seat_units(&self) -> u64 {
        self.iter()
            .map(|(class, seats)| u64::from(seats) * u64::from(class.seat_units()))
            .sum()
    }

    pub fn total_seats(&self) -> u64 {
        self.iter().map(|(_, seats)| u64::from(seats)).sum()
    }
}

impl fmt::Display for PaxSeats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Y {}J {}F", self.economy, self.business, self.first)
    }
}

/// A passenger cabin: a budget of seat units plus a seat ceiling per class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PaxCabin {
    pub seat_units: u32,
    pub max_seats: PaxSeats,
}

impl PaxCabin {
    /// A cabin whose class ceilings are bounded by the budget alone.
    pub fn with_budget(seat_units: u32) -> Self {
        PaxCabin {
            seat_units,
            max_seats: PaxValues::new(seat_units, seat_units / 2, seat_units / 3),
        }
    }

    /// The largest seat count of `class` that fits in the cabin on its own.
    pub fn class_limit(&self, class: PaxClass) -> u32 {
        self.max_seats
            .get(class)
            .min(self.seat_units / class.seat_units())
    }

    pub fn validate(&self, seats: &PaxSeats) -> Result<(), EngineError> {
        for (class, count) in seats.iter() {
            if count > self.max_seats.get(class) {
                return Err(EngineError::invalid_argument(
                    "configuration",
                    format!(
                        "{count} {} seats exceed the cabin maximum of {}",
                        class.code(),
                        self.max_seats.get(class)
                    ),
                ));
            }
        }

        let used = seats.seat_units();
        if used > u64::from(self.seat_units) {
            return Err(EngineError::invalid_argument(
                "configuration",
                format!(
                    "{seats} uses {used} seat units, the cabin has {}",
                    self.seat_units
                ),
            ));
        }

        Ok(())
    }
}

/// A cargo hold, measured in lbs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CargoHold {
    pub capacity_lbs: u32,
}

/// Share of the hold given to large cargo; the rest carries heavy cargo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CargoSplit {
    pub large_pct: u8,
}

impl CargoSplit {
    pub const MAX_PCT: u8 = 100;

    pub fn heavy_pct(&self) -> u8 {
        Self::MAX_PCT.saturating_sub(self.large_pct)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.large_pct > Self::MAX_PCT {
            return Err(EngineError::invalid_argument(
                "configuration",
                format!("large cargo share {}% exceeds 100%", self.large_pct),
            ));
        }
        Ok(())
    }

    /// Usable lbs per cargo class. Large cargo packs less densely, so its
    /// share is scaled by `large_efficiency`.
    pub fn capacities(&self, hold: &CargoHold, large_efficiency: f64) -> CargoValues<f64> {
        let capacity = f64::from(hold.capacity_lbs);
        CargoValues {
            large: (capacity * large_efficiency * f64::from(self.large_pct) / 100.0).floor(),
            heavy: (capacity * f64::from(self.heavy_pct()) / 100.0).floor(),
        }
    }
}

impl fmt::Display for CargoSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}% L {}% H", self.large_pct, self.heavy_pct())
    }
}

/// The capacity split an aircraft flies with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Configuration {
    Pax { seats: PaxSeats },
    Cargo { split: CargoSplit },
    Combi { seats: PaxSeats, split: CargoSplit },
}

impl Configuration {
    pub fn seats(&self) -> Option<&PaxSeats> {
        match self {
            Configuration::Pax { seats } | Configuration::Combi { seats, .. } => Some(seats),
            Configuration::Cargo { .. } => None,
        }
    }

    pub fn split(&self) -> Option<&CargoSplit> {
        match self {
            Configuration::Cargo { split } | Configuration::Combi { split, .. } => Some(split),
            Configuration::Pax { .. } => None,
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Configuration::Pax { seats } => write!(f, "{seats}"),
            Configuration::Cargo { split } => write!(f, "{split}"),
            Configuration::Combi { seats, split } => write!(f, "{seats} + {split}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_units() {
        let seats = PaxSeats::new(100, 20, 10);
        assert_eq!(seats.seat_units(), 170);
        assert_eq!(seats.total_seats(), 130);
        assert_eq!(seats.to_string(), "100Y 20J 10F");
    }

    #[test]
    fn test_cabin_validation() {
        let cabin = PaxCabin::with_budget(200);
        assert_eq!(cabin.max_seats, PaxSeats::new(200, 100, 66));
        assert_eq!(cabin.class_limit(PaxClass::First), 66);

        assert!(cabin.validate(&PaxSeats::new(100, 20, 10)).is_ok());
        assert!(cabin.validate(&PaxSeats::new(200, 0, 0)).is_ok());
        // over the seat-unit budget
        assert!(cabin.validate(&PaxSeats::new(150, 20, 10)).is_err());
        // over the first class ceiling
        assert!(cabin.validate(&PaxSeats::new(0, 0, 67)).is_err());
    }

    #[test]
    fn test_huge_configuration_is_rejected() {
        let cabin = PaxCabin {
            seat_units: 200,
            max_seats: PaxSeats::new(u32::MAX, u32::MAX, u32::MAX),
        };
        let seats = PaxSeats::new(0, 0, 1_500_000_000);

        assert_eq!(seats.seat_units(), 4_500_000_000);
        assert!(matches!(
            cabin.validate(&seats),
            Err(EngineError::InvalidArgument {
                name: "configuration",
                ..
            })
        ));
    }

    #[test]
    fn test_cargo_capacities() {
        let hold = CargoHold {
            capacity_lbs: 100_000,
        };
        let split = CargoSplit { large_pct: 60 };

        assert_eq!(split.heavy_pct(), 40);
        assert_eq!(
            split.capacities(&hold, 0.7),
            CargoValues::new(42_000.0, 40_000.0)
        );
        assert!(CargoSplit { large_pct: 101 }.validate().is_err());
    }

    #[test]
    fn test_configuration_serde() {
        let configuration = Configuration::Pax {
            seats: PaxSeats::new(100, 20, 10),
        };
        let json = serde_json::to_string(&configuration).unwrap();
        assert_eq!(
            json,
            r#"{"type":"pax","seats":{"economy":100,"business":20,"first":10}}"#
        );
        let parsed: Configuration = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, configuration);
    }
}
