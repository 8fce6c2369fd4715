pub mod economics;
pub mod error;
pub mod json;
pub mod problem;
pub mod search;
mod utils;

pub use error::{EngineError, EntityKind};

#[cfg(test)]
pub(crate) mod test_utils;
