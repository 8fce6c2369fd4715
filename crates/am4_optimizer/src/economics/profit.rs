use std::{fmt, str::FromStr};

use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    EngineError,
    error::ensure_finite,
    problem::{
        cabin::{CargoValues, Configuration, PaxValues},
        kilometers::Kilometers,
    },
};

use super::{cost::CruiseSetting, cost::TripCost, pricing::Ticket};

const HOURS_PER_DAY: f64 = 24.0;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Rounds to whole seconds so that trip counts don't flip on float noise.
fn whole_seconds(hours: f64) -> f64 {
    (hours * SECONDS_PER_HOUR).round() / SECONDS_PER_HOUR
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TripsPerDay {
    /// As many departures as one aircraft can fly in a day.
    #[default]
    Auto,
    /// Exactly `n` departures a day, flown by as many aircraft as needed.
    Fixed(u32),
}

impl TripsPerDay {
    pub fn validate(&self) -> Result<(), EngineError> {
        if let TripsPerDay::Fixed(0) = self {
            return Err(EngineError::invalid_argument(
                "trips_per_day",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Schedule {
    pub flight_time: SignedDuration,
    pub flight_hours: f64,
    pub trips_per_day: f64,
    pub aircraft_needed: u32,
    pub utilization: f64,
}

impl Schedule {
    pub fn new(
        flight_hours: f64,
        turnaround_hours: f64,
        trips_per_day: TripsPerDay,
    ) -> Result<Self, EngineError> {
        let flight_hours = ensure_finite("flight_hours", flight_hours)?;
        let cycle_hours = whole_seconds(flight_hours + turnaround_hours);
        if cycle_hours <= 0.0 {
            return Err(EngineError::NonFinite {
                quantity: "trips_per_day",
            });
        }

        let (trips, aircraft_needed) = match trips_per_day {
            TripsPerDay::Auto if cycle_hours < HOURS_PER_DAY => {
                ((HOURS_PER_DAY / cycle_hours).floor(), 1)
            }
            TripsPerDay::Auto => (HOURS_PER_DAY / cycle_hours, 1),
            TripsPerDay::Fixed(n) => {
                let trips = f64::from(n.max(1));
                let needed = (trips * cycle_hours / HOURS_PER_DAY).ceil().max(1.0);
                (trips, needed as u32)
            }
        };

        let utilization = trips * flight_hours / (HOURS_PER_DAY * f64::from(aircraft_needed));

        let flight_time = SignedDuration::try_from_secs_f64(flight_hours * SECONDS_PER_HOUR)
            .map_err(|_| EngineError::NonFinite {
                quantity: "flight_time",
            })?;

        Ok(Schedule {
            flight_time,
            flight_hours,
            trips_per_day: trips,
            aircraft_needed,
            utilization: ensure_finite("utilization", utilization)?,
        })
    }
}

/// Tickets sold on one trip, per carried part of the aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Tickets {
    pub pax: Option<PaxValues<Ticket>>,
    pub cargo: Option<CargoValues<Ticket>>,
}

impl Tickets {
    pub fn revenue(&self) -> f64 {
        let pax: f64 = self
            .pax
            .iter()
            .flat_map(|tickets| tickets.iter().map(|(_, ticket)| ticket.revenue))
            .sum();
        let cargo: f64 = self
            .cargo
            .iter()
            .flat_map(|tickets| tickets.iter().map(|(_, ticket)| ticket.revenue))
            .sum();
        pax + cargo
    }
}

/// Economics of one aircraft flying one route with one configuration at one
/// cruise setting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Economics {
    pub configuration: Configuration,
    pub cruise: CruiseSetting,
    pub schedule: Schedule,
    pub tickets: Tickets,
    pub costs: TripCost,
    pub revenue: f64,
    pub profit_per_trip: f64,
    pub profit_per_day: f64,
    pub profit_per_km: f64,
}

impl Economics {
    pub fn new(
        configuration: Configuration,
        cruise: CruiseSetting,
        schedule: Schedule,
        tickets: Tickets,
        costs: TripCost,
        distance: Kilometers,
    ) -> Result<Self, EngineError> {
        let revenue = ensure_finite("revenue", tickets.revenue())?;
        ensure_finite("cost", costs.total)?;
        let profit_per_trip = ensure_finite("profit_per_trip", revenue - costs.total)?;
        let profit_per_day =
            ensure_finite("profit_per_day", profit_per_trip * schedule.trips_per_day)?;
        let profit_per_km = ensure_finite("profit_per_km", profit_per_trip / distance.value())?;

        Ok(Economics {
            configuration,
            cruise,
            schedule,
            tickets,
            costs,
            revenue,
            profit_per_trip,
            profit_per_day,
            profit_per_km,
        })
    }

    pub fn key(&self, ranking: RankingKey) -> f64 {
        match ranking {
            RankingKey::ProfitPerDay => self.profit_per_day,
            RankingKey::ProfitPerTrip => self.profit_per_trip,
            RankingKey::ProfitPerDistance => self.profit_per_km,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RankingKey {
    #[default]
    ProfitPerDay,
    ProfitPerTrip,
    ProfitPerDistance,
}

impl fmt::Display for RankingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankingKey::ProfitPerDay => write!(f, "profit_per_day"),
            RankingKey::ProfitPerTrip => write!(f, "profit_per_trip"),
            RankingKey::ProfitPerDistance => write!(f, "profit_per_km"),
        }
    }
}

impl FromStr for RankingKey {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" | "profit_per_day" => Ok(RankingKey::ProfitPerDay),
            "trip" | "profit_per_trip" => Ok(RankingKey::ProfitPerTrip),
            "km" | "profit_per_km" => Ok(RankingKey::ProfitPerDistance),
            other => Err(EngineError::invalid_argument(
                "ranking",
                format!("unknown ranking key `{other}`"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::cabin::PaxSeats;

    #[test]
    fn test_auto_schedule() {
        let schedule = Schedule::new(5.0, 1.0, TripsPerDay::Auto).unwrap();
        assert_eq!(schedule.trips_per_day, 4.0);
        assert_eq!(schedule.aircraft_needed, 1);
        assert!((schedule.utilization - 20.0 / 24.0).abs() < 1e-12);
        assert_eq!(schedule.flight_time, SignedDuration::from_hours(5));

        // 7h cycles: 3 trips, the rest of the day is idle
        let schedule = Schedule::new(6.0, 1.0, TripsPerDay::Auto).unwrap();
        assert_eq!(schedule.trips_per_day, 3.0);
    }

    #[test]
    fn test_auto_schedule_ignores_float_noise() {
        let flight_hours = 5.0 + 4.0 * f64::EPSILON;
        let schedule = Schedule::new(flight_hours, 1.0, TripsPerDay::Auto).unwrap();
        assert_eq!(schedule.trips_per_day, 4.0);

        let schedule = Schedule::new(6.0 + 1e-12, 0.0, TripsPerDay::Fixed(4)).unwrap();
        assert_eq!(schedule.aircraft_needed, 1);
    }

    #[test]
    fn test_long_haul_schedule_is_fractional() {
        let schedule = Schedule::new(47.0, 1.0, TripsPerDay::Auto).unwrap();
        assert_eq!(schedule.trips_per_day, 0.5);
        assert_eq!(schedule.aircraft_needed, 1);
    }

    #[test]
    fn test_fixed_schedule() {
        let schedule = Schedule::new(5.0, 1.0, TripsPerDay::Fixed(6)).unwrap();
        assert_eq!(schedule.trips_per_day, 6.0);
        // 6 cycles of 6h need 36 aircraft-hours
        assert_eq!(schedule.aircraft_needed, 2);
        assert!((schedule.utilization - 30.0 / 48.0).abs() < 1e-12);

        let schedule = Schedule::new(5.0, 1.0, TripsPerDay::Fixed(1)).unwrap();
        assert_eq!(schedule.aircraft_needed, 1);
        assert!(TripsPerDay::Fixed(0).validate().is_err());
    }

    #[test]
    fn test_non_finite_flight_time_is_an_error() {
        assert_eq!(
            Schedule::new(f64::INFINITY, 1.0, TripsPerDay::Auto),
            Err(EngineError::NonFinite {
                quantity: "flight_hours"
            })
        );
    }

    #[test]
    fn test_economics() {
        let schedule = Schedule::new(5.0, 1.0, TripsPerDay::Auto).unwrap();
        let ticket = Ticket {
            revenue: 30_000.0,
            ..Ticket::default()
        };
        let tickets = Tickets {
            pax: Some(PaxValues::new(ticket, ticket, ticket)),
            cargo: None,
        };
        let costs = TripCost {
            total: 40_000.0,
            ..TripCost::default()
        };

        let economics = Economics::new(
            Configuration::Pax {
                seats: PaxSeats::new(100, 20, 10),
            },
            CruiseSetting::NOMINAL,
            schedule,
            tickets,
            costs,
            Kilometers::new(1_000.0),
        )
        .unwrap();

        assert_eq!(economics.revenue, 90_000.0);
        assert_eq!(economics.profit_per_trip, 50_000.0);
        assert_eq!(economics.key(RankingKey::ProfitPerDay), 200_000.0);
        assert_eq!(economics.key(RankingKey::ProfitPerDistance), 50.0);
    }

    #[test]
    fn test_ranking_key_from_str() {
        assert_eq!("Day".parse::<RankingKey>(), Ok(RankingKey::ProfitPerDay));
        assert_eq!(
            "profit_per_km".parse::<RankingKey>(),
            Ok(RankingKey::ProfitPerDistance)
        );
        assert!("weekly".parse::<RankingKey>().is_err());
    }
}
