use std::path::PathBuf;

use am4_optimizer::{
    economics::{
        evaluator::{ConfigChoice, CruiseChoice, EvaluationOptions},
        profit::{RankingKey, TripsPerDay},
    },
    problem::{
        dataset::Dataset,
        game_constants::{GameConstants, GameMode},
    },
};
use clap::{Args, ValueEnum};

use crate::{file_utils::read_dataset, parsers};

#[derive(Args)]
pub struct DatasetArgs {
    /// Dataset file with the airport and aircraft tables
    #[arg(long)]
    pub dataset: PathBuf,
}

impl DatasetArgs {
    pub fn load(&self) -> Result<Dataset, anyhow::Error> {
        read_dataset(&self.dataset)
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Mode {
    Easy,
    Realism,
}

impl From<Mode> for GameMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Easy => GameMode::Easy,
            Mode::Realism => GameMode::Realism,
        }
    }
}

#[derive(Args)]
pub struct GameArgs {
    #[arg(long, value_enum, default_value_t = Mode::Realism)]
    mode: Mode,

    /// $ per 1000 lbs of fuel
    #[arg(long, value_parser = parsers::parse_fuel_price)]
    fuel_price: Option<f64>,

    /// $ per 1000 CO2 quotas
    #[arg(long, value_parser = parsers::parse_co2_price)]
    co2_price: Option<f64>,

    /// Airline reputation, in percent
    #[arg(long, value_parser = parsers::parse_reputation)]
    reputation: Option<f64>,

    /// Fuel training bonus, in percent
    #[arg(long, default_value_t = 0.0)]
    fuel_training: f64,

    /// CO2 training bonus, in percent
    #[arg(long, default_value_t = 0.0)]
    co2_training: f64,
}

impl GameArgs {
    pub fn constants(&self) -> GameConstants {
        let mut constants = GameConstants::for_mode(self.mode.into());
        if let Some(fuel_price) = self.fuel_price {
            constants.fuel_price = fuel_price;
        }
        if let Some(co2_price) = self.co2_price {
            constants.co2_price = co2_price;
        }
        if let Some(reputation) = self.reputation {
            constants.reputation = reputation / 100.0;
        }
        constants.training.fuel_pct = self.fuel_training;
        constants.training.co2_pct = self.co2_training;
        constants
    }
}

#[derive(Args)]
pub struct EconomicsArgs {
    /// `auto`, a class order (`FJY`, `L`, `H`) or explicit seats (`100Y20J10F`, `70L30H`)
    #[arg(long, value_parser = parsers::parse_configuration, default_value = "auto")]
    config: ConfigChoice,

    /// Trips per day: `auto` or a number
    #[arg(long, value_parser = parsers::parse_trips_per_day, default_value = "auto")]
    tpd: TripsPerDay,

    /// `fastest`, `stepped`, `stepped:N` or a speed factor
    #[arg(long, value_parser = parsers::parse_cruise, default_value = "fastest")]
    cruise: CruiseChoice,

    /// Ranking key: `day`, `trip` or `km`
    #[arg(long, default_value = "day")]
    sort: RankingKey,

    /// Seat step of the configuration search
    #[arg(long, default_value_t = 1)]
    config_step: u32,
}

impl EconomicsArgs {
    pub fn options(&self) -> EvaluationOptions {
        EvaluationOptions {
            configuration: self.config,
            cruise: self.cruise,
            trips_per_day: self.tpd,
            config_step: self.config_step,
            ranking: self.sort,
            ..EvaluationOptions::default()
        }
    }
}
