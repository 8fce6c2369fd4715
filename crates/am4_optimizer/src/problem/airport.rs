use serde::Serialize;

use crate::{define_index_newtype, problem::location::Location};

define_index_newtype!(AirportIdx, Airport);

#[derive(Debug, Clone, Serialize)]
pub struct Airport {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) location: Location,
    pub(crate) runway_ft: f64,
    pub(crate) market_size: f64,
    pub(crate) is_hub: bool,
}

impl Airport {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: Location,
        runway_ft: f64,
        market_size: f64,
    ) -> Self {
        Airport {
            id: id.into(),
            name: name.into(),
            location,
            runway_ft,
            market_size,
            is_hub: false,
        }
    }

    pub fn with_hub(mut self, is_hub: bool) -> Self {
        self.is_hub = is_hub;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn runway_ft(&self) -> f64 {
        self.runway_ft
    }

    /// The size figure the demand model scales with.
    pub fn market_size(&self) -> f64 {
        self.market_size
    }

    pub fn is_hub(&self) -> bool {
        self.is_hub
    }
}
