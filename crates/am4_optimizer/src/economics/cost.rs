use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    EngineError,
    problem::{
        aircraft::Aircraft,
        cabin::{CargoValues, PaxClass, PaxValues},
        game_constants::{CruiseLimits, GameConstants},
        kilometers::Kilometers,
        kmh::Kmh,
    },
};

use super::pricing::Ticket;

/// Cruise speed as a fraction of the aircraft's nominal cruise speed. Slower
/// flights burn less fuel per km but take longer.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, JsonSchema)]
pub struct CruiseSetting(f64);

impl CruiseSetting {
    pub const NOMINAL: CruiseSetting = CruiseSetting(1.0);

    pub fn new(speed_factor: f64, limits: &CruiseLimits) -> Result<Self, EngineError> {
        if !speed_factor.is_finite()
            || speed_factor < limits.min_speed_factor
            || speed_factor > limits.max_speed_factor
        {
            return Err(EngineError::invalid_argument(
                "cruise",
                format!(
                    "speed factor must be within [{}, {}], got {speed_factor}",
                    limits.min_speed_factor, limits.max_speed_factor
                ),
            ));
        }
        Ok(CruiseSetting(speed_factor))
    }

    pub fn speed_factor(&self) -> f64 {
        self.0
    }

    /// `steps` settings evenly spread from the fastest to the slowest allowed.
    pub fn stepped(limits: &CruiseLimits, steps: u8) -> Vec<CruiseSetting> {
        match steps {
            0 => Vec::new(),
            1 => vec![CruiseSetting(limits.max_speed_factor)],
            _ => {
                let span = limits.max_speed_factor - limits.min_speed_factor;
                let last = f64::from(steps - 1);
                (0..steps)
                    .map(|step| {
                        CruiseSetting(limits.max_speed_factor - span * f64::from(step) / last)
                    })
                    .collect()
            }
        }
    }
}

/// Ground speed of `aircraft` at a cruise setting.
pub fn effective_speed(
    aircraft: &Aircraft,
    cruise: CruiseSetting,
    constants: &GameConstants,
) -> Kmh {
    aircraft.speed() * (constants.speed_multiplier * cruise.speed_factor())
}

/// What a trip carries, in the units CO2 is charged on: seat units for
/// passengers, thousands of lbs for cargo.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Payload {
    pub carried_units: f64,
    pub offered_units: f64,
}

impl Payload {
    pub fn of_pax_class(class: PaxClass, ticket: &Ticket) -> Payload {
        Payload {
            carried_units: ticket.load * f64::from(class.seat_units()),
            offered_units: ticket.capacity,
        }
    }

    pub fn of_cargo_class(ticket: &Ticket) -> Payload {
        Payload {
            carried_units: ticket.load / 1000.0,
            offered_units: ticket.capacity / 1000.0,
        }
    }

    pub fn of_pax(tickets: &PaxValues<Ticket>) -> Payload {
        tickets
            .iter()
            .map(|(class, ticket)| Payload::of_pax_class(class, &ticket))
            .fold(Payload::default(), Payload::combine)
    }

    pub fn of_cargo(tickets: &CargoValues<Ticket>) -> Payload {
        tickets
            .iter()
            .map(|(_, ticket)| Payload::of_cargo_class(&ticket))
            .fold(Payload::default(), Payload::combine)
    }

    pub fn combine(self, other: Payload) -> Payload {
        Payload {
            carried_units: self.carried_units + other.carried_units,
            offered_units: self.offered_units + other.offered_units,
        }
    }

    pub fn co2_units(&self) -> f64 {
        self.carried_units + self.offered_units
    }
}

/// Cost of one trip, in game dollars unless stated otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TripCost {
    pub fuel_lbs: f64,
    pub fuel: f64,
    pub co2_quotas: f64,
    pub co2: f64,
    pub crew: f64,
    pub maintenance: f64,
    pub wear: f64,
    pub lease: f64,
    pub total: f64,
}

pub struct CostModel<'a> {
    aircraft: &'a Aircraft,
    constants: &'a GameConstants,
    distance: Kilometers,
}

impl<'a> CostModel<'a> {
    pub fn new(aircraft: &'a Aircraft, distance: Kilometers, constants: &'a GameConstants) -> Self {
        CostModel {
            aircraft,
            constants,
            distance,
        }
    }

    pub fn fuel_lbs(&self, cruise: CruiseSetting) -> f64 {
        let burn = self.distance.value()
            * self.aircraft.fuel_burn()
            * cruise
                .speed_factor()
                .powf(self.constants.cruise.fuel_exponent);
        burn * (1.0 - self.constants.training.fuel_pct / 100.0)
    }

    /// Dollars per CO2 unit carried or offered on this route.
    pub fn co2_cost_per_unit(&self) -> f64 {
        self.co2_quotas_per_unit() * self.constants.co2_price / 1000.0
    }

    fn co2_quotas_per_unit(&self) -> f64 {
        self.distance.value()
            * self.aircraft.co2_rate()
            * (1.0 - self.constants.training.co2_pct / 100.0)
    }

    pub fn trip_cost(
        &self,
        cruise: CruiseSetting,
        flight_hours: f64,
        trips_per_day: f64,
        payload: Payload,
    ) -> TripCost {
        let costs = self.aircraft.costs();

        let fuel_lbs = self.fuel_lbs(cruise);
        let fuel = fuel_lbs * self.constants.fuel_price / 1000.0;
        let co2_quotas = self.co2_quotas_per_unit() * payload.co2_units();
        let co2 = co2_quotas * self.constants.co2_price / 1000.0;
        let crew = costs.crew_cost_per_hour * flight_hours;
        let maintenance = costs.check_cost * flight_hours / costs.maintenance_interval_hours;
        let wear = costs.purchase_price * self.constants.wear_ratio;
        let lease = costs.lease_per_day / trips_per_day;

        TripCost {
            fuel_lbs,
            fuel,
            co2_quotas,
            co2,
            crew,
            maintenance,
            wear,
            lease,
            total: fuel + co2 + crew + maintenance + wear + lease,
        }
    }
}
