use fxhash::FxHashMap;
use serde::Serialize;

use super::result::EvaluationResult;

/// What a set of search results amounts to for one origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HubSummary {
    pub origin: String,
    /// Whether the origin is already one of the player's hubs.
    pub is_hub: bool,
    pub routes: usize,
    pub aircraft_needed: u32,
    pub total_profit_per_day: f64,
    pub best_profit_per_day: f64,
    pub best_destination: String,
}

/// Groups results by origin, most profitable hub first. Hubs with equal
/// totals are ordered by id.
pub fn compare_hubs(results: &[EvaluationResult]) -> Vec<HubSummary> {
    let mut hubs: FxHashMap<&str, HubSummary> = FxHashMap::default();

    for result in results {
        let profit = result.economics.profit_per_day;
        let hub = hubs
            .entry(result.origin.as_str())
            .or_insert_with(|| HubSummary {
                origin: result.origin.clone(),
                is_hub: result.origin_is_hub,
                routes: 0,
                aircraft_needed: 0,
                total_profit_per_day: 0.0,
                best_profit_per_day: profit,
                best_destination: result.destination.clone(),
            });

        hub.routes += 1;
        hub.aircraft_needed += result.economics.schedule.aircraft_needed;
        hub.total_profit_per_day += profit;
        if profit > hub.best_profit_per_day {
            hub.best_profit_per_day = profit;
            hub.best_destination = result.destination.clone();
        }
    }

    let mut summaries: Vec<HubSummary> = hubs.into_values().collect();
    summaries.sort_by(|a, b| {
        b.total_profit_per_day
            .total_cmp(&a.total_profit_per_day)
            .then_with(|| a.origin.cmp(&b.origin))
    });
    summaries
}
