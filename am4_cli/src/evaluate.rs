use std::sync::Arc;

use am4_optimizer::search::{
    engine::{Engine, RouteSpec},
    result::Evaluation,
};
use clap::Args;
use tracing::warn;

use crate::{
    args::{DatasetArgs, EconomicsArgs, GameArgs},
    output,
};

#[derive(Args)]
pub struct EvaluateArgs {
    #[command(flatten)]
    dataset: DatasetArgs,

    #[arg(short, long)]
    origin: String,

    #[arg(short = 'D', long)]
    destination: String,

    #[arg(short, long)]
    aircraft: String,

    #[command(flatten)]
    game: GameArgs,

    #[command(flatten)]
    economics: EconomicsArgs,

    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,
}

pub fn run(args: EvaluateArgs) -> Result<(), anyhow::Error> {
    let engine = Engine::new(Arc::new(args.dataset.load()?), args.game.constants())?;
    let route = RouteSpec::Airports {
        origin: args.origin,
        destination: args.destination,
    };

    let evaluation = engine.evaluate(&route, &args.aircraft, args.economics.options())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
        return Ok(());
    }

    match evaluation {
        Evaluation::Feasible(result) => {
            let (summary, tickets) = output::evaluation_tables(&result);
            println!("{summary}");
            println!("{tickets}");
        }
        Evaluation::Infeasible(rejection) => {
            warn!("{} cannot fly this route: {rejection}", args.aircraft)
        }
    }

    Ok(())
}
