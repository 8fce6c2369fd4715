use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    EngineError, EntityKind,
    error::DatasetIssue,
    problem::{
        aircraft::{Aircraft, AircraftCosts, AircraftKind},
        airport::Airport,
        cabin::{CargoHold, PaxCabin, PaxSeats},
        dataset::Dataset,
        kmh::Kmh,
        location::Location,
    },
};

/// Reference tables as read from a file.
#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Dataset")]
pub struct JsonDataset {
    pub airports: Vec<JsonAirport>,
    pub aircraft: Vec<JsonAircraft>,
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Airport")]
pub struct JsonAirport {
    pub id: String,
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub runway_ft: f64,
    pub market_size: f64,
    pub hub: Option<bool>,
}

impl JsonAirport {
    pub fn build_airport(self) -> Result<Airport, EngineError> {
        let out_of_domain = |field: &'static str, value: f64| -> EngineError {
            DatasetIssue::OutOfDomain {
                kind: EntityKind::Airport,
                id: self.id.clone(),
                field,
                value,
            }
            .into()
        };

        let location = Location::from_lat_lon(self.lat, self.lon).map_err(|error| match error {
            EngineError::InvalidArgument { name: "lat", .. } => out_of_domain("lat", self.lat),
            _ => out_of_domain("lon", self.lon),
        })?;

        let name = self.name.unwrap_or_else(|| self.id.clone());
        Ok(Airport::new(self.id, name, location, self.runway_ft, self.market_size)
            .with_hub(self.hub.unwrap_or(false)))
    }
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, tag = "type", rename_all = "snake_case")]
pub enum JsonAircraftKind {
    Pax {
        seat_units: u32,
        /// Per-class seat ceilings; defaults to what the budget allows.
        max_seats: Option<PaxSeats>,
    },
    Cargo {
        capacity_lbs: u32,
    },
    Combi {
        seat_units: u32,
        max_seats: Option<PaxSeats>,
        capacity_lbs: u32,
    },
}

fn cabin(seat_units: u32, max_seats: Option<PaxSeats>) -> PaxCabin {
    match max_seats {
        Some(max_seats) => PaxCabin {
            seat_units,
            max_seats,
        },
        None => PaxCabin::with_budget(seat_units),
    }
}

impl From<JsonAircraftKind> for AircraftKind {
    fn from(kind: JsonAircraftKind) -> Self {
        match kind {
            JsonAircraftKind::Pax {
                seat_units,
                max_seats,
            } => AircraftKind::Passenger(cabin(seat_units, max_seats)),
            JsonAircraftKind::Cargo { capacity_lbs } => {
                AircraftKind::Cargo(CargoHold { capacity_lbs })
            }
            JsonAircraftKind::Combi {
                seat_units,
                max_seats,
                capacity_lbs,
            } => AircraftKind::Combi {
                cabin: cabin(seat_units, max_seats),
                hold: CargoHold { capacity_lbs },
            },
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Aircraft")]
pub struct JsonAircraft {
    pub id: String,
    pub name: String,
    pub kind: JsonAircraftKind,
    pub range_km: f64,
    pub speed_kmh: f64,
    pub runway_ft: f64,
    /// lbs per km.
    pub fuel_burn: f64,
    /// Quotas per km and per carried unit.
    pub co2_rate: f64,
    pub purchase_price: f64,
    pub lease_per_day: Option<f64>,
    pub check_cost: f64,
    pub maintenance_interval_hours: f64,
    pub crew_cost_per_hour: f64,
}

impl From<JsonAircraft> for Aircraft {
    fn from(aircraft: JsonAircraft) -> Self {
        Aircraft::new(
            aircraft.id,
            aircraft.name,
            aircraft.kind.into(),
            aircraft.range_km,
            Kmh::new(aircraft.speed_kmh),
            aircraft.runway_ft,
            aircraft.fuel_burn,
            aircraft.co2_rate,
            AircraftCosts {
                purchase_price: aircraft.purchase_price,
                lease_per_day: aircraft.lease_per_day.unwrap_or(0.0),
                check_cost: aircraft.check_cost,
                maintenance_interval_hours: aircraft.maintenance_interval_hours,
                crew_cost_per_hour: aircraft.crew_cost_per_hour,
            },
        )
    }
}

impl JsonDataset {
    #[instrument(skip_all, level = "debug")]
    pub fn build_dataset(self) -> Result<Dataset, EngineError> {
        let airports = self
            .airports
            .into_iter()
            .map(JsonAirport::build_airport)
            .collect::<Result<Vec<_>, _>>()?;
        let aircraft = self.aircraft.into_iter().map(Aircraft::from).collect();

        Dataset::load(airports, aircraft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"{
        "airports": [
            { "id": "HKG", "name": "Hong Kong", "lat": 22.31, "lon": 113.91, "runway_ft": 12467, "market_size": 88, "hub": true },
            { "id": "LHR", "lat": 51.47, "lon": -0.45, "runway_ft": 12799, "market_size": 93 }
        ],
        "aircraft": [
            {
                "id": "a388",
                "name": "A380-800",
                "kind": { "type": "pax", "seat_units": 600 },
                "range_km": 14500,
                "speed_kmh": 1049,
                "runway_ft": 9800,
                "fuel_burn": 21.0,
                "co2_rate": 0.18,
                "purchase_price": 215000000,
                "check_cost": 290000,
                "maintenance_interval_hours": 450,
                "crew_cost_per_hour": 4800
            },
            {
                "id": "b748f",
                "name": "B747-8F",
                "kind": { "type": "cargo", "capacity_lbs": 308000 },
                "range_km": 8130,
                "speed_kmh": 988,
                "runway_ft": 10200,
                "fuel_burn": 19.8,
                "co2_rate": 0.16,
                "purchase_price": 180000000,
                "lease_per_day": 12000,
                "check_cost": 240000,
                "maintenance_interval_hours": 450,
                "crew_cost_per_hour": 2600
            }
        ]
    }"#;

    #[test]
    fn test_build_dataset() {
        let json: JsonDataset = serde_json::from_str(DATASET).unwrap();
        let dataset = json.build_dataset().unwrap();

        let hkg = dataset.airport(dataset.airport_idx("hkg").unwrap());
        assert!(hkg.is_hub());
        assert_eq!(hkg.name(), "Hong Kong");

        let lhr = dataset.airport(dataset.airport_idx("LHR").unwrap());
        assert_eq!(lhr.name(), "LHR");
        assert!(!lhr.is_hub());

        let a388 = dataset.aircraft(dataset.aircraft_idx("A388").unwrap());
        assert_eq!(
            a388.kind().cabin().map(|cabin| cabin.max_seats),
            Some(PaxSeats::new(600, 300, 200))
        );
        assert_eq!(a388.costs().lease_per_day, 0.0);
    }

    #[test]
    fn test_invalid_coordinates() {
        let json: JsonDataset = serde_json::from_str(&DATASET.replace("51.47", "91.0")).unwrap();
        assert!(matches!(
            json.build_dataset(),
            Err(EngineError::DatasetInvalid(DatasetIssue::OutOfDomain {
                field: "lat",
                ..
            }))
        ));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = serde_json::from_str::<JsonDataset>(&DATASET.replace("\"hub\"", "\"hubs\""));
        assert!(result.is_err());
    }
}
