#![allow(dead_code)]

use std::sync::Arc;

use am4_optimizer::{
    problem::{
        aircraft::{Aircraft, AircraftCosts, AircraftKind},
        airport::Airport,
        cabin::{CargoHold, CargoValues, PaxCabin, PaxValues},
        dataset::Dataset,
        game_constants::{DemandCoefficients, GameConstants, PriceCurve, PricingCoefficients},
        kmh::Kmh,
        location::{Location, MEAN_EARTH_RADIUS_KM},
    },
    search::engine::Engine,
};
use jiff::SignedDuration;
use rand::{Rng, SeedableRng, rngs::SmallRng};

pub fn create_airport(id: &str, lat: f64, lon: f64, runway_ft: f64, market_size: f64) -> Airport {
    Airport::new(
        id,
        format!("{id} airport"),
        Location::from_lat_lon(lat, lon).unwrap(),
        runway_ft,
        market_size,
    )
}

pub fn create_aircraft(
    id: &str,
    kind: AircraftKind,
    range_km: f64,
    speed_kmh: f64,
    runway_ft: f64,
) -> Aircraft {
    Aircraft::new(
        id,
        format!("{id} aircraft"),
        kind,
        range_km,
        Kmh::new(speed_kmh),
        runway_ft,
        5.0,
        0.1,
        AircraftCosts {
            purchase_price: 50_000_000.0,
            lease_per_day: 4_000.0,
            check_cost: 10_000.0,
            maintenance_interval_hours: 500.0,
            crew_cost_per_hour: 500.0,
        },
    )
}

/// Round-number constants: no distance decay, full reputation and a one hour
/// turnaround.
pub fn create_scenario_constants() -> GameConstants {
    let realism = GameConstants::realism();
    GameConstants {
        fuel_price: 800.0,
        co2_price: 120.0,
        reputation: 1.0,
        speed_multiplier: 1.0,
        turnaround: SignedDuration::from_hours(1),
        wear_ratio: 0.000_01,
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

/// Two airports 3000 km apart on the equator, plus a 200 seat unit airliner
/// that flies the route and two that cannot.
pub fn create_scenario_engine() -> Engine {
    create_equator_engine(3_000.0)
}

/// The scenario fleet between A(0, 0) and B on the equator `distance_km` east.
pub fn create_equator_engine(distance_km: f64) -> Engine {
    let lon = (distance_km / MEAN_EARTH_RADIUS_KM).to_degrees();
    let cabin = AircraftKind::Passenger(PaxCabin::with_budget(200));
    let dataset = Dataset::load(
        vec![
            create_airport("A", 0.0, 0.0, 10_000.0, 400.0),
            create_airport("B", 0.0, lon, 9_000.0, 900.0),
        ],
        vec![
            create_aircraft("A1", cabin, 3_500.0, 600.0, 8_000.0),
            create_aircraft("SHORT_RANGE", cabin, 2_900.0, 600.0, 8_000.0),
            create_aircraft("LONG_TAKEOFF", cabin, 3_500.0, 600.0, 9_500.0),
        ],
    )
    .unwrap();

    Engine::new(Arc::new(dataset), create_scenario_constants()).unwrap()
}

pub fn create_random_network(airports: usize, aircraft: usize, seed: u64) -> Dataset {
    let mut rng = SmallRng::seed_from_u64(seed);

    let airports = (0..airports)
        .map(|index| {
            create_airport(
                &format!("AP{index:03}"),
                rng.random_range(-60.0..60.0),
                rng.random_range(-180.0..180.0),
                rng.random_range(4_000.0..14_000.0_f64).round(),
                rng.random_range(1.0..100.0_f64).round(),
            )
        })
        .collect();

    let aircraft = (0..aircraft)
        .map(|index| {
            let kind = match index % 5 {
                3 => AircraftKind::Cargo(CargoHold {
                    capacity_lbs: rng.random_range(20_000..150_000),
                }),
                4 => AircraftKind::Combi {
                    cabin: PaxCabin::with_budget(rng.random_range(40..120)),
                    hold: CargoHold {
                        capacity_lbs: rng.random_range(10_000..40_000),
                    },
                },
                _ => AircraftKind::Passenger(PaxCabin::with_budget(rng.random_range(50..300))),
            };
            create_aircraft(
                &format!("AC{index:02}"),
                kind,
                rng.random_range(1_500.0..15_000.0_f64).round(),
                rng.random_range(400.0..950.0_f64).round(),
                rng.random_range(3_000.0..11_000.0_f64).round(),
            )
        })
        .collect();

    Dataset::load(airports, aircraft).unwrap()
}
