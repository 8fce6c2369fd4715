use jiff::SignedDuration;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::problem::{
    aircraft::{Aircraft, AircraftCosts, AircraftKind},
    airport::Airport,
    cabin::{CargoHold, CargoValues, PaxCabin, PaxValues},
    dataset::Dataset,
    game_constants::{DemandCoefficients, GameConstants, PriceCurve, PricingCoefficients, Training},
    kmh::Kmh,
    location::Location,
};

pub fn create_airport(id: &str, lat: f64, lon: f64) -> Airport {
    create_airport_with(id, lat, lon, 10_000.0, 50.0)
}

pub fn create_airport_with(id: &str, lat: f64, lon: f64, runway_ft: f64, market_size: f64) -> Airport {
    Airport::new(
        id,
        format!("{id} airport"),
        Location::from_lat_lon(lat, lon).unwrap(),
        runway_ft,
        market_size,
    )
}

pub fn create_costs() -> AircraftCosts {
    AircraftCosts {
        purchase_price: 50_000_000.0,
        lease_per_day: 4_000.0,
        check_cost: 10_000.0,
        maintenance_interval_hours: 500.0,
        crew_cost_per_hour: 500.0,
    }
}

/// 200 seat units, 600 km/h, 5 lbs of fuel and 0.1 CO2 quota per km.
pub fn create_pax_aircraft(id: &str, range_km: f64, runway_ft: f64) -> Aircraft {
    Aircraft::new(
        id,
        format!("{id} airliner"),
        AircraftKind::Passenger(PaxCabin::with_budget(200)),
        range_km,
        Kmh::new(600.0),
        runway_ft,
        5.0,
        0.1,
        create_costs(),
    )
}

pub fn create_cargo_aircraft(id: &str, capacity_lbs: u32) -> Aircraft {
    Aircraft::new(
        id,
        format!("{id} freighter"),
        AircraftKind::Cargo(CargoHold { capacity_lbs }),
        10_000.0,
        Kmh::new(600.0),
        5_000.0,
        5.0,
        0.1,
        create_costs(),
    )
}

/// Constants with round numbers: no distance decay, no reputation loss and a
/// one hour turnaround.
pub fn create_scenario_constants() -> GameConstants {
    let realism = GameConstants::realism();
    GameConstants {
        fuel_price: 800.0,
        co2_price: 120.0,
        reputation: 1.0,
        speed_multiplier: 1.0,
        turnaround: SignedDuration::from_hours(1),
        wear_ratio: 0.000_01,
        training: Training::default(),
        demand: DemandCoefficients {
            pax: PaxValues::new(2.0, 0.5, 0.25),
            cargo: CargoValues::new(100.0, 50.0),
            reference_distance_km: 1_000.0,
            decay_exponent: 0.0,
        },
        pricing: PricingCoefficients {
            pax: PaxValues::new(
                PriceCurve::new(0.3, 150.0, 2.0),
                PriceCurve::new(0.6, 500.0, 2.0),
                PriceCurve::new(0.9, 1_000.0, 2.0),
            ),
            cargo: realism.pricing.cargo,
        },
        ..realism
    }
}

pub fn create_synthetic_airports(count: usize, seed: u64) -> Vec<Airport> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|index| {
            let lat = rng.random_range(-60.0..60.0);
            let lon = rng.random_range(-180.0..180.0);
            let runway = rng.random_range(4_000.0..14_000.0_f64).round();
            let market = rng.random_range(1.0..100.0_f64).round();
            create_airport_with(&format!("AP{index:03}"), lat, lon, runway, market)
        })
        .collect()
}

pub fn create_synthetic_aircraft(count: usize, seed: u64) -> Vec<Aircraft> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|index| {
            let id = format!("AC{index:02}");
            let mut aircraft = if index % 4 == 3 {
                create_cargo_aircraft(&id, rng.random_range(20_000..150_000))
            } else {
                let mut aircraft = create_pax_aircraft(&id, 0.0, 0.0);
                aircraft.kind = AircraftKind::Passenger(PaxCabin::with_budget(
                    rng.random_range(50..300),
                ));
                aircraft
            };
            aircraft.range_km = rng.random_range(1_500.0..15_000.0_f64).round();
            aircraft.runway_ft = rng.random_range(3_000.0..11_000.0_f64).round();
            aircraft.speed = Kmh::new(rng.random_range(400.0..950.0_f64).round());
            aircraft
        })
        .collect()
}

pub fn create_synthetic_dataset(airports: usize, aircraft: usize, seed: u64) -> Dataset {
    Dataset::load(
        create_synthetic_airports(airports, seed),
        create_synthetic_aircraft(aircraft, seed.wrapping_add(1)),
    )
    .unwrap()
}
