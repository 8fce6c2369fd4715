use std::sync::Arc;

use am4_optimizer::search::{
    engine::Engine,
    hubs::{HubSummary, compare_hubs},
    query::{
        AircraftFilter, AirportFilter, RouteConstraint, SearchQuery, SearchScope, Threads,
    },
    result::EvaluationResult,
};
use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::{
    args::{DatasetArgs, EconomicsArgs, GameArgs},
    output, parsers,
};

#[derive(Args)]
pub struct SearchArgs {
    #[command(flatten)]
    dataset: DatasetArgs,

    /// Comma-separated origin ids (all airports when omitted)
    #[arg(short, long, value_delimiter = ',')]
    origin: Option<Vec<String>>,

    /// Comma-separated destination ids (all airports when omitted)
    #[arg(short = 'D', long, value_delimiter = ',')]
    destination: Option<Vec<String>>,

    /// Comma-separated aircraft ids (the whole fleet when omitted)
    #[arg(short, long, value_delimiter = ',')]
    aircraft: Option<Vec<String>>,

    /// Distance (`1000..5000`) or flight time (`02:00..08:30`) range
    #[arg(short, long, value_parser = parsers::parse_constraint)]
    constraint: Option<RouteConstraint>,

    /// Number of results
    #[arg(short, default_value_t = 10)]
    k: usize,

    /// Worker threads (all cores when omitted)
    #[arg(short, long)]
    threads: Option<usize>,

    #[command(flatten)]
    game: GameArgs,

    #[command(flatten)]
    economics: EconomicsArgs,

    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct SearchReport<'a> {
    query: &'a SearchQuery,
    results: &'a [EvaluationResult],
    #[serde(skip_serializing_if = "Option::is_none")]
    hubs: Option<&'a [HubSummary]>,
}

impl SearchArgs {
    fn scope(&self) -> SearchScope {
        let aircraft = match &self.aircraft {
            Some(ids) => AircraftFilter::Only(ids.clone()),
            None => AircraftFilter::All,
        };

        match (&self.origin, &self.destination) {
            (Some(origins), Some(destinations))
                if origins.len() == 1 && destinations.len() == 1 =>
            {
                SearchScope::RouteFleet {
                    origin: origins[0].clone(),
                    destination: destinations[0].clone(),
                    aircraft,
                }
            }
            (Some(origins), None) => SearchScope::FromOrigins {
                origins: origins.clone(),
                aircraft,
            },
            (origins, destinations) => SearchScope::CrossProduct {
                origins: airport_filter(origins),
                destinations: airport_filter(destinations),
                aircraft,
            },
        }
    }

    fn query(&self) -> SearchQuery {
        let mut query = SearchQuery::new(self.scope(), self.k);
        query.constraint = self.constraint.unwrap_or_default();
        query.options = self.economics.options();
        query.threads = match self.threads {
            None => Threads::Auto,
            Some(1) => Threads::Single,
            Some(threads) => Threads::Multi(threads),
        };
        query
    }

    fn execute(&self) -> Result<(SearchQuery, Vec<EvaluationResult>), anyhow::Error> {
        for ids in [&self.origin, &self.destination].into_iter().flatten() {
            parsers::check_airports(ids).map_err(anyhow::Error::msg)?;
        }

        let engine = Engine::new(Arc::new(self.dataset.load()?), self.game.constants())?;
        let query = self.query();
        let results = engine.search(&query)?;
        info!("{} results", results.len());
        Ok((query, results))
    }
}

fn airport_filter(ids: &Option<Vec<String>>) -> AirportFilter {
    match ids {
        Some(ids) => AirportFilter::Only(ids.clone()),
        None => AirportFilter::All,
    }
}

pub fn run(args: SearchArgs) -> Result<(), anyhow::Error> {
    let (query, results) = args.execute()?;

    if args.json {
        let report = SearchReport {
            query: &query,
            results: &results,
            hubs: None,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", output::results_table(&results));
    }

    Ok(())
}

pub fn run_hubs(args: SearchArgs) -> Result<(), anyhow::Error> {
    let (query, results) = args.execute()?;
    let hubs = compare_hubs(&results);

    if args.json {
        let report = SearchReport {
            query: &query,
            results: &results,
            hubs: Some(&hubs),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", output::hubs_table(&hubs));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: SearchArgs,
    }

    fn parse(line: &str) -> SearchArgs {
        TestCli::parse_from(line.split_whitespace()).args
    }

    #[test]
    fn test_scope_from_flags() {
        let args = parse("am4 --dataset d.json");
        assert_eq!(
            args.scope(),
            SearchScope::CrossProduct {
                origins: AirportFilter::All,
                destinations: AirportFilter::All,
                aircraft: AircraftFilter::All,
            }
        );

        let args = parse("am4 --dataset d.json -o HKG,LHR -a a388");
        assert_eq!(
            args.scope(),
            SearchScope::FromOrigins {
                origins: vec!["HKG".to_owned(), "LHR".to_owned()],
                aircraft: AircraftFilter::Only(vec!["a388".to_owned()]),
            }
        );

        let args = parse("am4 --dataset d.json -o HKG -D LHR");
        assert!(matches!(args.scope(), SearchScope::RouteFleet { .. }));
    }

    #[test]
    fn test_query_from_flags() {
        let query = parse("am4 --dataset d.json -k 5 -t 1 --sort trip -c 1000..").query();
        assert_eq!(query.k, 5);
        assert_eq!(query.threads, Threads::Single);
        assert!(query.constraint.distance.min.is_some());
        assert_eq!(
            query.options.ranking,
            am4_optimizer::economics::profit::RankingKey::ProfitPerTrip
        );
    }
}
