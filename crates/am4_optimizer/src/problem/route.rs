use crate::{
    EngineError,
    problem::{airport::Airport, kilometers::Kilometers},
};

/// An origin/destination pair and its great-circle distance. Routes are
/// derived per query and borrow their airports.
#[derive(Debug, Clone, Copy)]
pub struct Route<'a> {
    origin: &'a Airport,
    destination: &'a Airport,
    distance: Kilometers,
}

impl<'a> Route<'a> {
    pub fn new(origin: &'a Airport, destination: &'a Airport) -> Result<Self, EngineError> {
        let distance = origin.location().distance_to(destination.location());
        if distance.is_zero() {
            return Err(EngineError::invalid_argument(
                "route",
                format!(
                    "`{}` and `{}` are at the same location",
                    origin.id(),
                    destination.id()
                ),
            ));
        }

        Ok(Route {
            origin,
            destination,
            distance,
        })
    }

    pub fn origin(&self) -> &'a Airport {
        self.origin
    }

    pub fn destination(&self) -> &'a Airport {
        self.destination
    }

    pub fn distance(&self) -> Kilometers {
        self.distance
    }

    pub fn bearing(&self) -> f64 {
        self.origin.location().bearing(self.destination.location())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    #[test]
    fn test_route_between_same_location_is_rejected() {
        let a = test_utils::create_airport("AAA", 0.0, 0.0);
        let b = test_utils::create_airport("BBB", 0.0, 0.0);
        assert!(Route::new(&a, &b).is_err());
    }

    #[test]
    fn test_route_metrics() {
        let a = test_utils::create_airport_with("AAA", 0.0, 0.0, 9_000.0, 50.0);
        let b = test_utils::create_airport_with("BBB", 0.0, 10.0, 7_500.0, 50.0);
        let route = Route::new(&a, &b).unwrap();

        assert_eq!(route.destination().runway_ft(), 7_500.0);
        assert!((route.bearing() - 90.0).abs() < 1e-9);
        assert!((route.distance().value() - 1_111.95).abs() < 0.01);
    }
}
