use serde::Serialize;

use crate::{
    economics::{
        demand::RouteDemand,
        feasibility::Rejection,
        profit::{Economics, RankingKey},
    },
    problem::{aircraft::Aircraft, kilometers::Kilometers, route::Route},
};

/// One aircraft on one route, at its best configuration and cruise setting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub origin: String,
    pub origin_is_hub: bool,
    pub destination: String,
    pub aircraft: String,
    pub aircraft_kind: &'static str,
    pub distance: Kilometers,
    /// Initial bearing from the origin, in degrees.
    pub bearing: f64,
    /// Daily demand of the route.
    pub demand: RouteDemand,
    pub economics: Economics,
}

impl EvaluationResult {
    pub fn new(route: &Route, aircraft: &Aircraft, demand: RouteDemand, economics: Economics) -> Self {
        EvaluationResult {
            origin: route.origin().id().to_owned(),
            origin_is_hub: route.origin().is_hub(),
            destination: route.destination().id().to_owned(),
            aircraft: aircraft.id().to_owned(),
            aircraft_kind: aircraft.kind().label(),
            distance: route.distance(),
            bearing: route.bearing(),
            demand,
            economics,
        }
    }

    pub fn key(&self, ranking: RankingKey) -> f64 {
        self.economics.key(ranking)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Evaluation {
    Feasible(Box<EvaluationResult>),
    Infeasible(Rejection),
}

impl Evaluation {
    pub fn feasible(&self) -> Option<&EvaluationResult> {
        match self {
            Evaluation::Feasible(result) => Some(result),
            Evaluation::Infeasible(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Evaluation::Feasible(_) => None,
            Evaluation::Infeasible(rejection) => Some(rejection),
        }
    }
}
