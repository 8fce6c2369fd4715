//! Search result order: the ranking key, highest first; then the shorter
//! route; then origin, destination and aircraft ids in lexicographic order.
//! Every (origin, destination, aircraft) triple is distinct, so the order is
//! total and results do not depend on how the work was split between threads.

use std::cmp::Ordering;

use crate::{
    economics::{
        demand::RouteDemand,
        profit::{Economics, RankingKey},
    },
    problem::{aircraft::AircraftIdx, airport::AirportIdx, kilometers::Kilometers},
};

use super::result::EvaluationResult;

/// Greater is better.
#[derive(Debug, Clone, Copy)]
pub struct RankKey {
    pub key: f64,
    pub distance: Kilometers,
    pub origin_rank: u32,
    pub destination_rank: u32,
    pub aircraft_rank: u32,
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .total_cmp(&other.key)
            .then_with(|| other.distance.cmp(&self.distance))
            .then_with(|| other.origin_rank.cmp(&self.origin_rank))
            .then_with(|| other.destination_rank.cmp(&self.destination_rank))
            .then_with(|| other.aircraft_rank.cmp(&self.aircraft_rank))
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RankKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankKey {}

/// A (route, aircraft) pair waiting in a top-K heap.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub rank: RankKey,
    pub origin: AirportIdx,
    pub destination: AirportIdx,
    pub aircraft: AircraftIdx,
    pub demand: RouteDemand,
    pub economics: Economics,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank
    }
}

impl Eq for Candidate {}

/// The order of search output: `Less` when `a` comes first.
pub fn result_order(ranking: RankingKey, a: &EvaluationResult, b: &EvaluationResult) -> Ordering {
    b.key(ranking)
        .total_cmp(&a.key(ranking))
        .then_with(|| a.distance.cmp(&b.distance))
        .then_with(|| a.origin.cmp(&b.origin))
        .then_with(|| a.destination.cmp(&b.destination))
        .then_with(|| a.aircraft.cmp(&b.aircraft))
}
