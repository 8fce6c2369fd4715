use geo::{Bearing, Distance, Haversine};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{EngineError, problem::kilometers::Kilometers};

/// Radius used by [`Haversine`], in kilometres.
pub const MEAN_EARTH_RADIUS_KM: f64 = 6_371.0088;

/// A point on the globe. Construction validates the coordinates, so every
/// `Location` in the engine is finite and in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
#[schemars(with = "[f64; 2]")]
pub struct Location {
    point: geo::Point,
}

impl Location {
    pub fn from_lat_lon(lat: f64, lon: f64) -> Result<Self, EngineError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(EngineError::invalid_argument(
                "lat",
                format!("latitude must be within [-90, 90], got {lat}"),
            ));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(EngineError::invalid_argument(
                "lon",
                format!("longitude must be within [-180, 180], got {lon}"),
            ));
        }

        Ok(Self {
            point: geo::Point::new(lon, lat),
        })
    }

    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    pub fn lon(&self) -> f64 {
        self.point.x()
    }

    /// Great-circle distance.
    pub fn distance_to(&self, to: &Location) -> Kilometers {
        if self.point == to.point {
            return Kilometers::ZERO;
        }

        // Canonical argument order keeps the result bit-identical both ways.
        let (from, to) = if (self.lon(), self.lat()) <= (to.lon(), to.lat()) {
            (self.point, to.point)
        } else {
            (to.point, self.point)
        };

        let haversine = Haversine;
        Kilometers::new(haversine.distance(from, to) / 1000.0)
    }

    /// Initial bearing towards `dest`, in degrees clockwise from north.
    pub fn bearing(&self, dest: &Self) -> f64 {
        let haversine = Haversine;
        haversine.bearing(self.point, dest.point)
    }
}

impl TryFrom<[f64; 2]> for Location {
    type Error = EngineError;

    fn try_from([lat, lon]: [f64; 2]) -> Result<Self, Self::Error> {
        Location::from_lat_lon(lat, lon)
    }
}

impl From<Location> for [f64; 2] {
    fn from(location: Location) -> Self {
        [location.lat(), location.lon()]
    }
}

impl From<&Location> for geo::Point<f64> {
    fn from(location: &Location) -> Self {
        location.point
    }
}
