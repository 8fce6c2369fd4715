use fxhash::FxHashMap;
use tracing::{debug, instrument};

use crate::{
    EngineError, EntityKind,
    error::DatasetIssue,
    problem::{
        aircraft::{Aircraft, AircraftIdx, AircraftKind},
        airport::{Airport, AirportIdx},
        cabin::{CargoHold, PaxCabin},
    },
};

/// The immutable reference tables. Built once, then shared by reference
/// between any number of concurrent queries.
#[derive(Debug)]
pub struct Dataset {
    airports: Vec<Airport>,
    aircraft: Vec<Aircraft>,
    airport_ids: FxHashMap<String, AirportIdx>,
    aircraft_ids: FxHashMap<String, AircraftIdx>,
    /// Position of each entry when sorted by id.
    airport_ranks: Vec<u32>,
    aircraft_ranks: Vec<u32>,
}

impl Dataset {
    /// Validates the tables and indexes them by id. Ids are case-insensitive.
    #[instrument(skip_all, level = "debug")]
    pub fn load(airports: Vec<Airport>, aircraft: Vec<Aircraft>) -> Result<Self, EngineError> {
        if airports.is_empty() {
            return Err(DatasetIssue::Empty(EntityKind::Airport).into());
        }
        if aircraft.is_empty() {
            return Err(DatasetIssue::Empty(EntityKind::Aircraft).into());
        }

        let mut airport_ids = FxHashMap::default();
        for (index, airport) in airports.iter().enumerate() {
            validate_airport(airport)?;
            if airport_ids
                .insert(normalize_id(airport.id()), AirportIdx::new(index))
                .is_some()
            {
                return Err(DatasetIssue::DuplicateId {
                    kind: EntityKind::Airport,
                    id: airport.id().to_owned(),
                }
                .into());
            }
        }

        let mut aircraft_ids = FxHashMap::default();
        for (index, aircraft) in aircraft.iter().enumerate() {
            validate_aircraft(aircraft)?;
            if aircraft_ids
                .insert(normalize_id(aircraft.id()), AircraftIdx::new(index))
                .is_some()
            {
                return Err(DatasetIssue::DuplicateId {
                    kind: EntityKind::Aircraft,
                    id: aircraft.id().to_owned(),
                }
                .into());
            }
        }

        debug!(
            airports = airports.len(),
            aircraft = aircraft.len(),
            "Dataset loaded"
        );

        let airport_ranks = id_ranks(airports.iter().map(Airport::id));
        let aircraft_ranks = id_ranks(aircraft.iter().map(Aircraft::id));

        Ok(Dataset {
            airports,
            aircraft,
            airport_ids,
            aircraft_ids,
            airport_ranks,
            aircraft_ranks,
        })
    }

    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    pub fn aircraft_list(&self) -> &[Aircraft] {
        &self.aircraft
    }

    pub fn airport(&self, index: AirportIdx) -> &Airport {
        &self.airports[index]
    }

    pub fn aircraft(&self, index: AircraftIdx) -> &Aircraft {
        &self.aircraft[index]
    }

    pub fn airport_idx(&self, id: &str) -> Result<AirportIdx, EngineError> {
        self.airport_ids
            .get(&normalize_id(id))
            .copied()
            .ok_or_else(|| EngineError::not_found(EntityKind::Airport, id))
    }

    pub fn aircraft_idx(&self, id: &str) -> Result<AircraftIdx, EngineError> {
        self.aircraft_ids
            .get(&normalize_id(id))
            .copied()
            .ok_or_else(|| EngineError::not_found(EntityKind::Aircraft, id))
    }

    /// Rank of the airport's id in lexicographic order.
    pub fn airport_rank(&self, index: AirportIdx) -> u32 {
        self.airport_ranks[index.get()]
    }

    pub fn aircraft_rank(&self, index: AircraftIdx) -> u32 {
        self.aircraft_ranks[index.get()]
    }

    pub fn airport_indices(&self) -> impl DoubleEndedIterator<Item = AirportIdx> + Clone {
        AirportIdx::all(self.airports.len())
    }

    pub fn aircraft_indices(&self) -> impl DoubleEndedIterator<Item = AircraftIdx> + Clone {
        AircraftIdx::all(self.aircraft.len())
    }
}

fn id_ranks<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<u32> {
    let mut order: Vec<(&str, usize)> = ids.enumerate().map(|(index, id)| (id, index)).collect();
    order.sort_unstable();

    let mut ranks = vec![0; order.len()];
    for (rank, (_, index)) in order.into_iter().enumerate() {
        ranks[index] = rank as u32;
    }
    ranks
}

fn normalize_id(id: &str) -> String {
    id.trim().to_uppercase()
}

fn out_of_domain(kind: EntityKind, id: &str, field: &'static str, value: f64) -> EngineError {
    DatasetIssue::OutOfDomain {
        kind,
        id: id.to_owned(),
        field,
        value,
    }
    .into()
}

fn require_non_negative(
    kind: EntityKind,
    id: &str,
    field: &'static str,
    value: f64,
) -> Result<(), EngineError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(out_of_domain(kind, id, field, value))
    }
}

fn require_positive(
    kind: EntityKind,
    id: &str,
    field: &'static str,
    value: f64,
) -> Result<(), EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(out_of_domain(kind, id, field, value))
    }
}

pub(crate) fn validate_airport(airport: &Airport) -> Result<(), EngineError> {
    let kind = EntityKind::Airport;
    let id = airport.id();
    if id.trim().is_empty() {
        return Err(DatasetIssue::MissingField {
            kind,
            id: id.to_owned(),
        }
        .into());
    }

    require_positive(kind, id, "runway_ft", airport.runway_ft())?;
    require_non_negative(kind, id, "market_size", airport.market_size())
}

fn validate_cabin(id: &str, cabin: &PaxCabin) -> Result<(), EngineError> {
    let kind = EntityKind::Aircraft;
    if cabin.seat_units == 0 {
        return Err(out_of_domain(kind, id, "seat_units", 0.0));
    }
    if cabin.max_seats.iter().all(|(_, seats)| seats == 0) {
        return Err(out_of_domain(kind, id, "max_seats", 0.0));
    }
    Ok(())
}

fn validate_hold(id: &str, hold: &CargoHold) -> Result<(), EngineError> {
    if hold.capacity_lbs == 0 {
        return Err(out_of_domain(EntityKind::Aircraft, id, "capacity_lbs", 0.0));
    }
    Ok(())
}

fn validate_aircraft(aircraft: &Aircraft) -> Result<(), EngineError> {
    let kind = EntityKind::Aircraft;
    let id = aircraft.id();
    if id.trim().is_empty() || aircraft.name().trim().is_empty() {
        return Err(DatasetIssue::MissingField {
            kind,
            id: id.to_owned(),
        }
        .into());
    }

    match aircraft.kind() {
        AircraftKind::Passenger(cabin) => validate_cabin(id, cabin)?,
        AircraftKind::Cargo(hold) => validate_hold(id, hold)?,
        AircraftKind::Combi { cabin, hold } => {
            validate_cabin(id, cabin)?;
            validate_hold(id, hold)?;
        }
    }

    require_positive(kind, id, "range_km", aircraft.range_km())?;
    require_positive(kind, id, "speed", aircraft.speed().value())?;
    require_non_negative(kind, id, "runway_ft", aircraft.runway_ft())?;
    require_non_negative(kind, id, "fuel_burn", aircraft.fuel_burn())?;
    require_non_negative(kind, id, "co2_rate", aircraft.co2_rate())?;

    let costs = aircraft.costs();
    require_non_negative(kind, id, "purchase_price", costs.purchase_price)?;
    require_non_negative(kind, id, "lease_per_day", costs.lease_per_day)?;
    require_non_negative(kind, id, "check_cost", costs.check_cost)?;
    require_positive(
        kind,
        id,
        "maintenance_interval_hours",
        costs.maintenance_interval_hours,
    )?;
    require_non_negative(kind, id, "crew_cost_per_hour", costs.crew_cost_per_hour)
}
