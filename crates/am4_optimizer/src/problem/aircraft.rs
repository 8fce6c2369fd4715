use serde::Serialize;

use crate::{
    define_index_newtype,
    problem::{
        cabin::{CargoHold, PaxCabin},
        kmh::Kmh,
    },
};

define_index_newtype!(AircraftIdx, Aircraft);

/// What an aircraft carries. Each variant brings its own capacity,
/// demand and revenue rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AircraftKind {
    Passenger(PaxCabin),
    Cargo(CargoHold),
    Combi { cabin: PaxCabin, hold: CargoHold },
}

impl AircraftKind {
    pub fn cabin(&self) -> Option<&PaxCabin> {
        match self {
            AircraftKind::Passenger(cabin) | AircraftKind::Combi { cabin, .. } => Some(cabin),
            AircraftKind::Cargo(_) => None,
        }
    }

    pub fn hold(&self) -> Option<&CargoHold> {
        match self {
            AircraftKind::Cargo(hold) | AircraftKind::Combi { hold, .. } => Some(hold),
            AircraftKind::Passenger(_) => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AircraftKind::Passenger(_) => "pax",
            AircraftKind::Cargo(_) => "cargo",
            AircraftKind::Combi { .. } => "combi",
        }
    }
}

/// Cost coefficients of one aircraft type, in game dollars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AircraftCosts {
    pub purchase_price: f64,
    pub lease_per_day: f64,
    /// Cost of one maintenance check.
    pub check_cost: f64,
    /// Flight hours between two checks.
    pub maintenance_interval_hours: f64,
    pub crew_cost_per_hour: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Aircraft {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) kind: AircraftKind,
    pub(crate) range_km: f64,
    pub(crate) speed: Kmh,
    pub(crate) runway_ft: f64,
    /// lbs of fuel per km.
    pub(crate) fuel_burn: f64,
    /// CO2 quotas per km and per carried unit.
    pub(crate) co2_rate: f64,
    pub(crate) costs: AircraftCosts,
}

impl Aircraft {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: AircraftKind,
        range_km: f64,
        speed: Kmh,
        runway_ft: f64,
        fuel_burn: f64,
        co2_rate: f64,
        costs: AircraftCosts,
    ) -> Self {
        Aircraft {
            id: id.into(),
            name: name.into(),
            kind,
            range_km,
            speed,
            runway_ft,
            fuel_burn,
            co2_rate,
            costs,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &AircraftKind {
        &self.kind
    }

    pub fn range_km(&self) -> f64 {
        self.range_km
    }

    pub fn speed(&self) -> Kmh {
        self.speed
    }

    pub fn runway_ft(&self) -> f64 {
        self.runway_ft
    }

    pub fn fuel_burn(&self) -> f64 {
        self.fuel_burn
    }

    pub fn co2_rate(&self) -> f64 {
        self.co2_rate
    }

    pub fn costs(&self) -> &AircraftCosts {
        &self.costs
    }
}
