use std::sync::Arc;

use fxhash::FxHashMap;
use parking_lot::Mutex;
use rayon::{ThreadPool, ThreadPoolBuilder, prelude::*};
use tracing::{debug, info, instrument};

use crate::{
    EngineError,
    economics::{
        demand::daily_demand,
        evaluator::{EvaluationOptions, Evaluator},
        feasibility,
    },
    problem::{
        aircraft::AircraftIdx,
        airport::{Airport, AirportIdx},
        dataset::{Dataset, validate_airport},
        game_constants::GameConstants,
        route::Route,
    },
};

use super::{
    query::{AircraftFilter, AirportFilter, RouteConstraint, SearchQuery, SearchScope, Threads},
    ranking::{Candidate, RankKey},
    result::{Evaluation, EvaluationResult},
    top_k::TopK,
};

/// The route of a single evaluation.
#[derive(Debug, Clone)]
pub enum RouteSpec {
    /// Two airports of the dataset.
    Airports { origin: String, destination: String },
    /// Airports outside the dataset.
    Endpoints {
        origin: Box<Airport>,
        destination: Box<Airport>,
    },
}

/// Answers evaluation and search queries over a shared dataset.
#[derive(Debug, Clone)]
pub struct Engine {
    dataset: Arc<Dataset>,
    constants: GameConstants,
    /// Worker pools by thread count, shared between clones.
    pools: Arc<Mutex<FxHashMap<usize, Arc<ThreadPool>>>>,
}

/// Candidate pairs a search resolved to, as dataset indices.
struct ResolvedScope {
    origins: Vec<AirportIdx>,
    destinations: Vec<AirportIdx>,
    aircraft: Vec<AircraftIdx>,
    /// Visit each unordered airport pair once.
    unordered: bool,
}

/// What one worker gathered.
struct Partial {
    top: TopK<Candidate>,
    evaluated: usize,
    rejected: usize,
    pruned: usize,
}

impl Partial {
    fn new(k: usize) -> Self {
        Partial {
            top: TopK::new(k),
            evaluated: 0,
            rejected: 0,
            pruned: 0,
        }
    }

    fn merge(self, other: Partial) -> Self {
        Partial {
            top: self.top.merge(other.top),
            evaluated: self.evaluated + other.evaluated,
            rejected: self.rejected + other.rejected,
            pruned: self.pruned + other.pruned,
        }
    }
}

impl Engine {
    pub fn new(dataset: Arc<Dataset>, constants: GameConstants) -> Result<Self, EngineError> {
        constants.validate()?;
        Ok(Engine {
            dataset,
            constants,
            pools: Arc::default(),
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn constants(&self) -> &GameConstants {
        &self.constants
    }

    /// Evaluates one aircraft on one route. An aircraft that cannot fly the
    /// route is not an error: the evaluation says why.
    #[instrument(skip_all, level = "debug")]
    pub fn evaluate(
        &self,
        route: &RouteSpec,
        aircraft: &str,
        options: EvaluationOptions,
    ) -> Result<Evaluation, EngineError> {
        let aircraft = self.dataset.aircraft(self.dataset.aircraft_idx(aircraft)?);
        let (origin, destination) = match route {
            RouteSpec::Airports {
                origin,
                destination,
            } => (
                self.dataset.airport(self.dataset.airport_idx(origin)?),
                self.dataset.airport(self.dataset.airport_idx(destination)?),
            ),
            RouteSpec::Endpoints {
                origin,
                destination,
            } => {
                for airport in [origin, destination] {
                    validate_airport(airport).map_err(|error| {
                        EngineError::invalid_argument("route", error.to_string())
                    })?;
                }
                (origin.as_ref(), destination.as_ref())
            }
        };

        let evaluator = Evaluator::new(&self.constants, options)?;
        evaluator.check_configuration(aircraft)?;

        let route = Route::new(origin, destination)?;
        if let Err(rejection) = feasibility::check_route(aircraft, &route) {
            debug!(%rejection, "Aircraft cannot fly the route");
            return Ok(Evaluation::Infeasible(rejection));
        }

        let demand = daily_demand(
            origin.market_size(),
            destination.market_size(),
            route.distance(),
            &self.constants.demand,
        )?;
        let economics = evaluator.evaluate(aircraft, route.distance(), &demand)?;

        Ok(Evaluation::Feasible(Box::new(EvaluationResult::new(
            &route, aircraft, demand, economics,
        ))))
    }

    /// The `k` best (route, aircraft) pairs of the query scope, best first.
    #[instrument(skip_all, fields(k = query.k), level = "debug")]
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<EvaluationResult>, EngineError> {
        query.validate()?;
        let evaluator = Evaluator::new(&self.constants, query.options)?;
        let scope = self.resolve_scope(&query.scope)?;
        for &aircraft in &scope.aircraft {
            evaluator.check_configuration(self.dataset.aircraft(aircraft))?;
        }

        debug!(
            origins = scope.origins.len(),
            destinations = scope.destinations.len(),
            aircraft = scope.aircraft.len(),
            "Search scope resolved"
        );

        let pool = self.thread_pool(query.threads)?;

        let k = query.k;
        let partial = pool.install(|| {
            scope
                .origins
                .par_iter()
                .flat_map(|&origin| {
                    scope
                        .destinations
                        .par_iter()
                        .map(move |&destination| (origin, destination))
                })
                .filter(|&(origin, destination)| {
                    origin != destination && (!scope.unordered || origin < destination)
                })
                .try_fold(
                    || Partial::new(k),
                    |mut partial, (origin, destination)| {
                        self.search_pair(
                            &evaluator,
                            &query.constraint,
                            &scope.aircraft,
                            origin,
                            destination,
                            &mut partial,
                        )?;
                        Ok::<_, EngineError>(partial)
                    },
                )
                .try_reduce(|| Partial::new(k), |a, b| Ok(a.merge(b)))
        })?;

        let results = partial
            .top
            .into_sorted_vec()
            .into_iter()
            .map(|candidate| self.candidate_result(candidate))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            evaluated = partial.evaluated,
            rejected = partial.rejected,
            pruned = partial.pruned,
            results = results.len(),
            "Search completed"
        );

        Ok(results)
    }

    fn thread_pool(&self, threads: Threads) -> Result<Arc<ThreadPool>, EngineError> {
        let num_threads = threads.number_of_threads();
        let mut pools = self.pools.lock();
        if let Some(pool) = pools.get(&num_threads) {
            return Ok(Arc::clone(pool));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|error| EngineError::invalid_argument("threads", error.to_string()))?;
        debug!(num_threads, "Thread pool built");

        let pool = Arc::new(pool);
        pools.insert(num_threads, Arc::clone(&pool));
        Ok(pool)
    }

    fn search_pair(
        &self,
        evaluator: &Evaluator,
        constraint: &RouteConstraint,
        aircraft: &[AircraftIdx],
        origin: AirportIdx,
        destination: AirportIdx,
        partial: &mut Partial,
    ) -> Result<(), EngineError> {
        let origin_airport = self.dataset.airport(origin);
        let destination_airport = self.dataset.airport(destination);

        let distance = origin_airport
            .location()
            .distance_to(destination_airport.location());
        if distance.is_zero() || !constraint.distance.contains(distance) {
            partial.pruned += aircraft.len();
            return Ok(());
        }

        let route = Route::new(origin_airport, destination_airport)?;
        let demand = daily_demand(
            origin_airport.market_size(),
            destination_airport.market_size(),
            distance,
            &self.constants.demand,
        )?;

        for &aircraft_idx in aircraft {
            let aircraft = self.dataset.aircraft(aircraft_idx);
            if feasibility::check_route(aircraft, &route).is_err() {
                partial.rejected += 1;
                continue;
            }
            if !constraint.flight_time.is_unbounded()
                && !constraint
                    .flight_time
                    .contains(evaluator.fastest_flight_time(aircraft, distance))
            {
                partial.pruned += 1;
                continue;
            }

            let economics = evaluator.evaluate(aircraft, distance, &demand)?;
            partial.evaluated += 1;
            partial.top.offer(Candidate {
                rank: RankKey {
                    key: economics.key(evaluator.options().ranking),
                    distance,
                    origin_rank: self.dataset.airport_rank(origin),
                    destination_rank: self.dataset.airport_rank(destination),
                    aircraft_rank: self.dataset.aircraft_rank(aircraft_idx),
                },
                origin,
                destination,
                aircraft: aircraft_idx,
                demand,
                economics,
            });
        }

        Ok(())
    }

    fn candidate_result(&self, candidate: Candidate) -> Result<EvaluationResult, EngineError> {
        let route = Route::new(
            self.dataset.airport(candidate.origin),
            self.dataset.airport(candidate.destination),
        )?;
        Ok(EvaluationResult::new(
            &route,
            self.dataset.aircraft(candidate.aircraft),
            candidate.demand,
            candidate.economics,
        ))
    }

    fn resolve_scope(&self, scope: &SearchScope) -> Result<ResolvedScope, EngineError> {
        let resolved = match scope {
            SearchScope::Route {
                origin,
                destination,
                aircraft,
            } => ResolvedScope {
                origins: vec![self.dataset.airport_idx(origin)?],
                destinations: vec![self.dataset.airport_idx(destination)?],
                aircraft: vec![self.dataset.aircraft_idx(aircraft)?],
                unordered: false,
            },
            SearchScope::RouteFleet {
                origin,
                destination,
                aircraft,
            } => ResolvedScope {
                origins: vec![self.dataset.airport_idx(origin)?],
                destinations: vec![self.dataset.airport_idx(destination)?],
                aircraft: self.resolve_aircraft(aircraft)?,
                unordered: false,
            },
            SearchScope::FromOrigins { origins, aircraft } => ResolvedScope {
                origins: self.resolve_airport_ids(origins)?,
                destinations: self.dataset.airport_indices().collect(),
                aircraft: self.resolve_aircraft(aircraft)?,
                unordered: false,
            },
            SearchScope::CrossProduct {
                origins,
                destinations,
                aircraft,
            } => ResolvedScope {
                origins: self.resolve_airports(origins)?,
                destinations: self.resolve_airports(destinations)?,
                aircraft: self.resolve_aircraft(aircraft)?,
                unordered: matches!(
                    (origins, destinations),
                    (AirportFilter::All, AirportFilter::All)
                ),
            },
        };

        Ok(resolved)
    }

    fn resolve_airports(&self, filter: &AirportFilter) -> Result<Vec<AirportIdx>, EngineError> {
        match filter {
            AirportFilter::All => Ok(self.dataset.airport_indices().collect()),
            AirportFilter::Only(ids) => self.resolve_airport_ids(ids),
        }
    }

    fn resolve_airport_ids(&self, ids: &[String]) -> Result<Vec<AirportIdx>, EngineError> {
        let mut indices = ids
            .iter()
            .map(|id| self.dataset.airport_idx(id))
            .collect::<Result<Vec<_>, _>>()?;
        indices.sort_unstable();
        indices.dedup();
        Ok(indices)
    }

    fn resolve_aircraft(&self, filter: &AircraftFilter) -> Result<Vec<AircraftIdx>, EngineError> {
        match filter {
            AircraftFilter::All => Ok(self.dataset.aircraft_indices().collect()),
            AircraftFilter::Only(ids) => {
                let mut indices = ids
                    .iter()
                    .map(|id| self.dataset.aircraft_idx(id))
                    .collect::<Result<Vec<_>, _>>()?;
                indices.sort_unstable();
                indices.dedup();
                Ok(indices)
            }
        }
    }
}
