use am4_optimizer::{
    economics::{
        configuration_search::ConfigAlgorithm, evaluator::ConfigChoice, evaluator::CruiseChoice,
        profit::TripsPerDay,
    },
    problem::{
        cabin::{CargoSplit, Configuration, PaxSeats},
        kilometers::Kilometers,
    },
    search::query::{Bounds, RouteConstraint},
};
use jiff::{SignedDuration, SpanRelativeTo};

/// Most airports a single listing accepts.
pub const MAX_AIRPORTS: usize = 24;

pub fn parse_duration(input: &str) -> Result<SignedDuration, String> {
    if let Ok(duration) = input.parse::<SignedDuration>() {
        return Ok(duration);
    }

    if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        return Ok(duration);
    }

    Err(format!("invalid duration `{input}`"))
}

/// `HH:MM`, or any duration [`parse_duration`] accepts.
pub fn parse_flight_time(input: &str) -> Result<SignedDuration, String> {
    if let Some((hours, minutes)) = input.split_once(':') {
        let hours: i64 = hours
            .trim()
            .parse()
            .map_err(|_| format!("invalid hours in `{input}`"))?;
        let minutes: i64 = minutes
            .trim()
            .parse()
            .map_err(|_| format!("invalid minutes in `{input}`"))?;
        if !(0..60).contains(&minutes) || hours < 0 {
            return Err(format!("invalid flight time `{input}`"));
        }
        return Ok(SignedDuration::from_mins(hours * 60 + minutes));
    }

    parse_duration(input)
}

/// `min..max`, `min..` or `..max`; a single value is an upper bound. Plain
/// numbers are kilometres, anything else a flight time.
pub fn parse_constraint(input: &str) -> Result<RouteConstraint, String> {
    let (min, max) = match input.split_once("..") {
        Some((min, max)) => (min.trim(), max.trim()),
        None => ("", input.trim()),
    };
    if min.is_empty() && max.is_empty() {
        return Err(String::from("empty constraint"));
    }

    let is_distance = [min, max]
        .iter()
        .filter(|bound| !bound.is_empty())
        .all(|bound| bound.parse::<f64>().is_ok());

    let mut constraint = RouteConstraint::default();
    if is_distance {
        let km = |value: &str| {
            value
                .parse::<f64>()
                .map(Kilometers::new)
                .map_err(|error| error.to_string())
        };
        constraint.distance = Bounds::new(parse_bound(min, km)?, parse_bound(max, km)?);
    } else {
        constraint.flight_time = Bounds::new(
            parse_bound(min, parse_flight_time)?,
            parse_bound(max, parse_flight_time)?,
        );
    }

    constraint.validate().map_err(|error| error.to_string())?;
    Ok(constraint)
}

fn parse_bound<T>(
    value: &str,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Result<Option<T>, String> {
    if value.is_empty() {
        Ok(None)
    } else {
        parse(value).map(Some)
    }
}

pub fn check_airports(ids: &[String]) -> Result<(), String> {
    if ids.len() > MAX_AIRPORTS {
        return Err(format!(
            "at most {MAX_AIRPORTS} airports are accepted, got {}",
            ids.len()
        ));
    }
    Ok(())
}

fn parse_bounded(input: &str, max: f64, unit: &str) -> Result<f64, String> {
    let value: f64 = input
        .parse()
        .map_err(|_| format!("invalid number `{input}`"))?;
    if !(value > 0.0 && value <= max) {
        return Err(format!("must be within (0, {max}] {unit}, got {value}"));
    }
    Ok(value)
}

pub fn parse_fuel_price(input: &str) -> Result<f64, String> {
    parse_bounded(input, 900.0, "$ per 1000 lbs")
}

pub fn parse_co2_price(input: &str) -> Result<f64, String> {
    parse_bounded(input, 140.0, "$ per 1000 quotas")
}

pub fn parse_reputation(input: &str) -> Result<f64, String> {
    parse_bounded(input, 100.0, "%")
}

/// `auto` or a number of departures per day.
pub fn parse_trips_per_day(input: &str) -> Result<TripsPerDay, String> {
    if input.eq_ignore_ascii_case("auto") {
        return Ok(TripsPerDay::Auto);
    }

    let trips: u32 = input
        .parse()
        .map_err(|_| format!("expected `auto` or a number of trips, got `{input}`"))?;
    let trips_per_day = TripsPerDay::Fixed(trips);
    trips_per_day.validate().map_err(|error| error.to_string())?;
    Ok(trips_per_day)
}

/// `fastest`, `stepped`, `stepped:N` or a speed factor.
pub fn parse_cruise(input: &str) -> Result<CruiseChoice, String> {
    let input = input.trim().to_ascii_lowercase();
    match input.as_str() {
        "fastest" => return Ok(CruiseChoice::Fastest),
        "stepped" => return Ok(CruiseChoice::Stepped { steps: 5 }),
        _ => {}
    }

    if let Some(steps) = input.strip_prefix("stepped:") {
        let steps = steps
            .parse()
            .map_err(|_| format!("invalid number of steps `{steps}`"))?;
        return Ok(CruiseChoice::Stepped { steps });
    }

    input
        .parse()
        .map(CruiseChoice::Fixed)
        .map_err(|_| format!("invalid cruise setting `{input}`"))
}

/// An algorithm (`auto`, a class order such as `FJY`, `L`, `H`) or explicit
/// seats and shares such as `100Y20J10F`, `70L30H` or `50Y10J40L`.
pub fn parse_configuration(input: &str) -> Result<ConfigChoice, String> {
    if let Ok(algorithm) = input.parse::<ConfigAlgorithm>() {
        return Ok(ConfigChoice::Algorithm(algorithm));
    }

    let mut seats = PaxSeats::default();
    let mut large = None;
    let mut heavy = None;
    let mut has_seats = false;
    let mut digits = String::new();

    for c in input.trim().chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }

        let value: u32 = digits
            .parse()
            .map_err(|_| format!("expected a number before `{c}` in `{input}`"))?;
        digits.clear();
        match c.to_ascii_uppercase() {
            'Y' => seats.economy = value,
            'J' => seats.business = value,
            'F' => seats.first = value,
            'L' => large = Some(value),
            'H' => heavy = Some(value),
            _ => return Err(format!("unknown class `{c}` in `{input}`")),
        }
        has_seats |= matches!(c.to_ascii_uppercase(), 'Y' | 'J' | 'F');
    }
    if !digits.is_empty() {
        return Err(format!("missing class after `{digits}` in `{input}`"));
    }

    let split = match (large, heavy) {
        (None, None) => None,
        (Some(large), Some(heavy)) if large.saturating_add(heavy) != 100 => {
            return Err(format!("cargo shares of `{input}` must add up to 100"));
        }
        (Some(large), _) => Some(large),
        (None, Some(heavy)) => Some(100_u32.checked_sub(heavy).unwrap_or(u32::MAX)),
    }
    .map(|large_pct| {
        u8::try_from(large_pct)
            .ok()
            .filter(|pct| *pct <= CargoSplit::MAX_PCT)
            .map(|large_pct| CargoSplit { large_pct })
            .ok_or_else(|| format!("cargo shares of `{input}` exceed 100%"))
    })
    .transpose()?;

    let configuration = match (has_seats, split) {
        (true, None) => Configuration::Pax { seats },
        (false, Some(split)) => Configuration::Cargo { split },
        (true, Some(split)) => Configuration::Combi { seats, split },
        (false, None) => return Err(format!("invalid configuration `{input}`")),
    };

    Ok(ConfigChoice::Explicit(configuration))
}

#[cfg(test)]
mod tests {
    use am4_optimizer::problem::cabin::{CargoClass, PaxClass};

    use super::*;

    #[test]
    fn test_parse_flight_time() {
        assert_eq!(
            parse_flight_time("05:30").unwrap(),
            SignedDuration::from_mins(330)
        );
        assert_eq!(
            parse_flight_time("PT2H").unwrap(),
            SignedDuration::from_hours(2)
        );
        assert!(parse_flight_time("5:75").is_err());
    }

    #[test]
    fn test_parse_distance_constraint() {
        let constraint = parse_constraint("1000..5000").unwrap();
        assert_eq!(constraint.distance.min, Some(Kilometers::new(1_000.0)));
        assert_eq!(constraint.distance.max, Some(Kilometers::new(5_000.0)));
        assert!(constraint.flight_time.is_unbounded());

        let constraint = parse_constraint("8000").unwrap();
        assert_eq!(constraint.distance.min, None);
        assert_eq!(constraint.distance.max, Some(Kilometers::new(8_000.0)));

        assert!(parse_constraint("5000..1000").is_err());
        assert!(parse_constraint("..").is_err());
    }

    #[test]
    fn test_parse_flight_time_constraint() {
        let constraint = parse_constraint("02:00..").unwrap();
        assert_eq!(
            constraint.flight_time.min,
            Some(SignedDuration::from_hours(2))
        );
        assert_eq!(constraint.flight_time.max, None);
        assert!(constraint.distance.is_unbounded());
    }

    #[test]
    fn test_check_airports() {
        let ids: Vec<String> = (0..25).map(|i| format!("A{i}")).collect();
        assert!(check_airports(&ids[..24]).is_ok());
        assert!(check_airports(&ids).is_err());
    }

    #[test]
    fn test_parse_game_bounds() {
        assert_eq!(parse_fuel_price("900").unwrap(), 900.0);
        assert!(parse_fuel_price("901").is_err());
        assert!(parse_co2_price("0").is_err());
        assert!(parse_reputation("101").is_err());
    }

    #[test]
    fn test_parse_trips_per_day() {
        assert_eq!(parse_trips_per_day("AUTO").unwrap(), TripsPerDay::Auto);
        assert_eq!(parse_trips_per_day("3").unwrap(), TripsPerDay::Fixed(3));
        assert!(parse_trips_per_day("0").is_err());
    }

    #[test]
    fn test_parse_cruise() {
        assert_eq!(parse_cruise("fastest").unwrap(), CruiseChoice::Fastest);
        assert_eq!(
            parse_cruise("stepped:3").unwrap(),
            CruiseChoice::Stepped { steps: 3 }
        );
        assert_eq!(parse_cruise("0.8").unwrap(), CruiseChoice::Fixed(0.8));
        assert!(parse_cruise("slow").is_err());
    }

    #[test]
    fn test_parse_configuration() {
        assert_eq!(
            parse_configuration("fjy").unwrap(),
            ConfigChoice::Algorithm(ConfigAlgorithm::PaxOrder([
                PaxClass::First,
                PaxClass::Business,
                PaxClass::Economy
            ]))
        );
        assert_eq!(
            parse_configuration("L").unwrap(),
            ConfigChoice::Algorithm(ConfigAlgorithm::CargoOrder(CargoClass::Large))
        );
        assert_eq!(
            parse_configuration("100Y20J10F").unwrap(),
            ConfigChoice::Explicit(Configuration::Pax {
                seats: PaxSeats::new(100, 20, 10)
            })
        );
        assert_eq!(
            parse_configuration("30H").unwrap(),
            ConfigChoice::Explicit(Configuration::Cargo {
                split: CargoSplit { large_pct: 70 }
            })
        );
        assert_eq!(
            parse_configuration("50Y40L60H").unwrap(),
            ConfigChoice::Explicit(Configuration::Combi {
                seats: PaxSeats::new(50, 0, 0),
                split: CargoSplit { large_pct: 40 }
            })
        );
        assert!(parse_configuration("70L40H").is_err());
        assert!(parse_configuration("100X").is_err());
        assert!(parse_configuration("100").is_err());
    }
}
