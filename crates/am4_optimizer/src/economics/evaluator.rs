use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    EngineError,
    problem::{
        aircraft::{Aircraft, AircraftKind},
        cabin::Configuration,
        game_constants::GameConstants,
        kilometers::Kilometers,
    },
};

use super::{
    configuration_search::{ConfigAlgorithm, ConfigurationSearch},
    cost::{CostModel, CruiseSetting, Payload, effective_speed},
    demand::RouteDemand,
    pricing::{PricePolicy, TripMarket},
    profit::{Economics, RankingKey, Schedule, Tickets, TripsPerDay},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConfigChoice {
    /// Fly exactly this configuration.
    Explicit(Configuration),
    Algorithm(ConfigAlgorithm),
}

impl Default for ConfigChoice {
    fn default() -> Self {
        ConfigChoice::Algorithm(ConfigAlgorithm::Auto)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CruiseChoice {
    /// The highest allowed speed factor.
    #[default]
    Fastest,
    Fixed(f64),
    /// `steps` settings from the fastest to the slowest; the best one wins.
    Stepped { steps: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EvaluationOptions {
    pub configuration: ConfigChoice,
    pub cruise: CruiseChoice,
    pub trips_per_day: TripsPerDay,
    pub pricing: PricePolicy,
    /// Seat step of the exhaustive configuration search, also its percent
    /// step for cargo.
    pub config_step: u32,
    /// Key the best cruise setting is picked by, and search results ranked by.
    pub ranking: RankingKey,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        EvaluationOptions {
            configuration: ConfigChoice::default(),
            cruise: CruiseChoice::default(),
            trips_per_day: TripsPerDay::default(),
            pricing: PricePolicy::default(),
            config_step: 1,
            ranking: RankingKey::default(),
        }
    }
}

/// Evaluates aircraft on routes under one set of options. Options are
/// validated once, when the evaluator is built.
#[derive(Debug)]
pub struct Evaluator<'a> {
    constants: &'a GameConstants,
    options: EvaluationOptions,
    cruise_settings: SmallVec<[CruiseSetting; 8]>,
}

impl<'a> Evaluator<'a> {
    pub fn new(constants: &'a GameConstants, options: EvaluationOptions) -> Result<Self, EngineError> {
        options.trips_per_day.validate()?;
        options.pricing.validate()?;

        if options.config_step == 0 {
            return Err(EngineError::invalid_argument(
                "config_step",
                "must be at least 1",
            ));
        }

        if let ConfigChoice::Explicit(configuration) = &options.configuration {
            if let Some(split) = configuration.split() {
                split.validate()?;
            }
        }

        let limits = &constants.cruise;
        let cruise_settings: SmallVec<[CruiseSetting; 8]> = match options.cruise {
            CruiseChoice::Fastest => {
                SmallVec::from_elem(CruiseSetting::new(limits.max_speed_factor, limits)?, 1)
            }
            CruiseChoice::Fixed(speed_factor) => {
                SmallVec::from_elem(CruiseSetting::new(speed_factor, limits)?, 1)
            }
            CruiseChoice::Stepped { steps: 0 } => {
                return Err(EngineError::invalid_argument(
                    "cruise",
                    "stepped cruise needs at least one step",
                ));
            }
            CruiseChoice::Stepped { steps } => CruiseSetting::stepped(limits, steps).into(),
        };

        Ok(Evaluator {
            constants,
            options,
            cruise_settings,
        })
    }

    pub fn options(&self) -> &EvaluationOptions {
        &self.options
    }

    pub fn constants(&self) -> &GameConstants {
        self.constants
    }

    /// Flight time of `aircraft` over `distance` at the fastest cruise
    /// setting in use.
    pub fn fastest_flight_time(&self, aircraft: &Aircraft, distance: Kilometers) -> SignedDuration {
        let fastest = self.cruise_settings[0];
        let speed = effective_speed(aircraft, fastest, self.constants);
        distance.flight_time(speed)
    }

    /// Fails unless an explicit configuration fits `aircraft`.
    pub fn check_configuration(&self, aircraft: &Aircraft) -> Result<(), EngineError> {
        let ConfigChoice::Explicit(configuration) = &self.options.configuration else {
            return Ok(());
        };

        match (configuration, aircraft.kind()) {
            (Configuration::Pax { seats }, AircraftKind::Passenger(cabin)) => cabin.validate(seats),
            (Configuration::Cargo { .. }, AircraftKind::Cargo(_)) => Ok(()),
            (Configuration::Combi { seats, .. }, AircraftKind::Combi { cabin, .. }) => {
                cabin.validate(seats)
            }
            (configuration, kind) => Err(EngineError::invalid_argument(
                "configuration",
                format!(
                    "`{configuration}` does not fit the {} aircraft `{}`",
                    kind.label(),
                    aircraft.id()
                ),
            )),
        }
    }

    /// Best economics of `aircraft` over `distance` across the cruise
    /// settings. Ties keep the faster setting.
    pub fn evaluate(
        &self,
        aircraft: &Aircraft,
        distance: Kilometers,
        demand: &RouteDemand,
    ) -> Result<Economics, EngineError> {
        let ranking = self.options.ranking;
        let mut best: Option<Economics> = None;

        for &cruise in &self.cruise_settings {
            let economics = self.evaluate_at(aircraft, distance, demand, cruise)?;
            if best.is_none_or(|best| economics.key(ranking) > best.key(ranking)) {
                best = Some(economics);
            }
        }

        best.ok_or_else(|| EngineError::invalid_argument("cruise", "no cruise setting to evaluate"))
    }

    fn evaluate_at(
        &self,
        aircraft: &Aircraft,
        distance: Kilometers,
        demand: &RouteDemand,
        cruise: CruiseSetting,
    ) -> Result<Economics, EngineError> {
        let constants = self.constants;
        let speed = effective_speed(aircraft, cruise, constants);
        let schedule = Schedule::new(
            distance.hours_at(speed),
            constants.turnaround_hours(),
            self.options.trips_per_day,
        )?;

        let market = TripMarket::new(
            &constants.pricing,
            &self.options.pricing,
            distance,
            demand.per_trip(schedule.trips_per_day, constants.reputation),
        );
        let cost_model = CostModel::new(aircraft, distance, constants);

        let configuration = match self.options.configuration {
            ConfigChoice::Explicit(configuration) => configuration,
            ConfigChoice::Algorithm(algorithm) => ConfigurationSearch::new(
                &market,
                cost_model.co2_cost_per_unit(),
                constants.cargo_large_efficiency,
                self.options.config_step,
            )
            .best(aircraft.kind(), algorithm),
        };

        let (tickets, payload) = self.sell(aircraft, &configuration, &market)?;
        let costs = cost_model.trip_cost(
            cruise,
            schedule.flight_hours,
            schedule.trips_per_day,
            payload,
        );

        Economics::new(configuration, cruise, schedule, tickets, costs, distance)
    }

    fn sell(
        &self,
        aircraft: &Aircraft,
        configuration: &Configuration,
        market: &TripMarket,
    ) -> Result<(Tickets, Payload), EngineError> {
        let mut tickets = Tickets::default();
        let mut payload = Payload::default();

        if let Some(seats) = configuration.seats() {
            let pax = market.pax_tickets(seats);
            payload = payload.combine(Payload::of_pax(&pax));
            tickets.pax = Some(pax);
        }

        if let Some(split) = configuration.split() {
            let hold = aircraft.kind().hold().ok_or_else(|| {
                EngineError::invalid_argument(
                    "configuration",
                    format!("aircraft `{}` has no cargo hold", aircraft.id()),
                )
            })?;
            let capacities = split.capacities(hold, self.constants.cargo_large_efficiency);
            let cargo = market.cargo_tickets(&capacities);
            payload = payload.combine(Payload::of_cargo(&cargo));
            tickets.cargo = Some(cargo);
        }

        Ok((tickets, payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        economics::demand::daily_demand,
        problem::cabin::{CargoSplit, CargoValues, PaxSeats, PaxValues},
        test_utils,
    };

    fn scenario_demand() -> RouteDemand {
        RouteDemand {
            pax: PaxValues::new(1_200, 300, 150),
            cargo: CargoValues::new(0, 0),
        }
    }

    fn explicit_options() -> EvaluationOptions {
        EvaluationOptions {
            configuration: ConfigChoice::Explicit(Configuration::Pax {
                seats: PaxSeats::new(100, 20, 10),
            }),
            cruise: CruiseChoice::Fixed(1.0),
            ..EvaluationOptions::default()
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= expected.abs() * 1e-6,
            "{actual} != {expected}"
        );
    }

    #[test]
    fn test_evaluate_hand_computed_route() {
        let constants = test_utils::create_scenario_constants();
        let aircraft = test_utils::create_pax_aircraft("a1", 3_500.0, 8_000.0);
        let evaluator = Evaluator::new(&constants, explicit_options()).unwrap();

        let economics = evaluator
            .evaluate(&aircraft, Kilometers::new(3_000.0), &scenario_demand())
            .unwrap();

        assert_eq!(economics.schedule.trips_per_day, 4.0);
        assert_close(economics.revenue, 261_733.333_333);
        assert_close(economics.costs.total, 26_900.0);
        assert_close(economics.profit_per_trip, 234_833.333_333);
        assert_close(economics.profit_per_day, 939_333.333_333);
        assert_close(economics.profit_per_km, 78.277_777_8);

        let pax = economics.tickets.pax.unwrap();
        assert_close(pax.economy.price, 1_400.0);
        assert_eq!(pax.economy.load_factor, 1.0);
        assert!(economics.tickets.cargo.is_none());
    }

    #[test]
    fn test_evaluation_is_reproducible() {
        let constants = test_utils::create_scenario_constants();
        let aircraft = test_utils::create_pax_aircraft("a1", 3_500.0, 8_000.0);
        let demand = daily_demand(
            400.0,
            900.0,
            Kilometers::new(2_750.0),
            &constants.demand,
        )
        .unwrap();
        let options = EvaluationOptions {
            cruise: CruiseChoice::Stepped { steps: 5 },
            ..EvaluationOptions::default()
        };
        let evaluator = Evaluator::new(&constants, options).unwrap();

        let first = evaluator
            .evaluate(&aircraft, Kilometers::new(2_750.0), &demand)
            .unwrap();
        let second = evaluator
            .evaluate(&aircraft, Kilometers::new(2_750.0), &demand)
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(first.profit_per_day.to_bits(), second.profit_per_day.to_bits());
    }

    #[test]
    fn test_stepped_cruise_is_never_worse_than_fastest() {
        let constants = test_utils::create_scenario_constants();
        let aircraft = test_utils::create_pax_aircraft("a1", 3_500.0, 8_000.0);
        let distance = Kilometers::new(3_000.0);

        let fastest = Evaluator::new(&constants, EvaluationOptions::default())
            .unwrap()
            .evaluate(&aircraft, distance, &scenario_demand())
            .unwrap();
        let stepped = Evaluator::new(
            &constants,
            EvaluationOptions {
                cruise: CruiseChoice::Stepped { steps: 5 },
                ..EvaluationOptions::default()
            },
        )
        .unwrap()
        .evaluate(&aircraft, distance, &scenario_demand())
        .unwrap();

        assert!(stepped.profit_per_day >= fastest.profit_per_day);
    }

    #[test]
    fn test_auto_configuration_beats_explicit() {
        let constants = test_utils::create_scenario_constants();
        let aircraft = test_utils::create_pax_aircraft("a1", 3_500.0, 8_000.0);
        let distance = Kilometers::new(3_000.0);

        let explicit = Evaluator::new(&constants, explicit_options())
            .unwrap()
            .evaluate(&aircraft, distance, &scenario_demand())
            .unwrap();
        let auto = Evaluator::new(&constants, EvaluationOptions::default())
            .unwrap()
            .evaluate(&aircraft, distance, &scenario_demand())
            .unwrap();

        assert!(auto.profit_per_trip >= explicit.profit_per_trip);
        let seats = auto.configuration.seats().unwrap();
        assert!(seats.seat_units() <= 200);
    }

    #[test]
    fn test_cargo_aircraft() {
        let constants = test_utils::create_scenario_constants();
        let aircraft = test_utils::create_cargo_aircraft("c1", 100_000);
        let demand = RouteDemand {
            pax: PaxValues::new(1_200, 300, 150),
            cargo: CargoValues::new(80_000, 120_000),
        };

        let economics = Evaluator::new(&constants, EvaluationOptions::default())
            .unwrap()
            .evaluate(&aircraft, Kilometers::new(3_000.0), &demand)
            .unwrap();
        assert!(economics.tickets.pax.is_none());
        assert!(economics.tickets.cargo.is_some());
        assert!(matches!(
            economics.configuration,
            Configuration::Cargo { .. }
        ));
    }

    #[test]
    fn test_invalid_options() {
        let constants = test_utils::create_scenario_constants();
        let invalid = [
            EvaluationOptions {
                config_step: 0,
                ..EvaluationOptions::default()
            },
            EvaluationOptions {
                cruise: CruiseChoice::Fixed(2.0),
                ..EvaluationOptions::default()
            },
            EvaluationOptions {
                cruise: CruiseChoice::Stepped { steps: 0 },
                ..EvaluationOptions::default()
            },
            EvaluationOptions {
                trips_per_day: TripsPerDay::Fixed(0),
                ..EvaluationOptions::default()
            },
            EvaluationOptions {
                configuration: ConfigChoice::Explicit(Configuration::Cargo {
                    split: CargoSplit { large_pct: 120 },
                }),
                ..EvaluationOptions::default()
            },
        ];

        for options in invalid {
            assert!(matches!(
                Evaluator::new(&constants, options),
                Err(EngineError::InvalidArgument { .. })
            ));
        }
    }

    #[test]
    fn test_explicit_configuration_must_fit_the_aircraft() {
        let constants = test_utils::create_scenario_constants();
        let evaluator = Evaluator::new(&constants, explicit_options()).unwrap();

        let pax = test_utils::create_pax_aircraft("a1", 3_500.0, 8_000.0);
        assert!(evaluator.check_configuration(&pax).is_ok());

        let cargo = test_utils::create_cargo_aircraft("c1", 100_000);
        assert!(evaluator.check_configuration(&cargo).is_err());

        let options = EvaluationOptions {
            configuration: ConfigChoice::Explicit(Configuration::Pax {
                seats: PaxSeats::new(200, 20, 10),
            }),
            ..EvaluationOptions::default()
        };
        let evaluator = Evaluator::new(&constants, options).unwrap();
        assert!(evaluator.check_configuration(&pax).is_err());
    }
}
