pub mod aircraft;
pub mod airport;
pub mod cabin;
pub mod dataset;
pub mod game_constants;
pub mod kilometers;
pub mod kmh;
pub mod location;
pub mod route;
