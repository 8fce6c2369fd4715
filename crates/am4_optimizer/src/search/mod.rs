pub mod engine;
pub mod hubs;
pub mod query;
pub mod ranking;
pub mod result;
pub mod top_k;
