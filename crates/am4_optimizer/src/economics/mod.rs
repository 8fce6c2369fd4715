pub mod configuration_search;
pub mod cost;
pub mod demand;
pub mod evaluator;
pub mod feasibility;
pub mod pricing;
pub mod profit;
