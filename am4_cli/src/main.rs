use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{evaluate::EvaluateArgs, generate::GenerateSubcommands, search::SearchArgs};

mod args;
mod evaluate;
mod file_utils;
mod generate;
mod output;
mod parsers;
mod search;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one aircraft on one route
    #[command(visible_alias = "e")]
    Evaluate {
        #[command(flatten)]
        args: EvaluateArgs,
    },
    /// Rank the most profitable routes and aircraft
    #[command(visible_alias = "s")]
    Search {
        #[command(flatten)]
        args: SearchArgs,
    },
    /// Compare origins by the routes a search finds from them
    Hubs {
        #[command(flatten)]
        args: SearchArgs,
    },
    #[command(visible_alias = "g")]
    Generate {
        #[command(subcommand)]
        commands: GenerateSubcommands,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Evaluate { args }) => evaluate::run(args)?,
        Some(Commands::Search { args }) => search::run(args)?,
        Some(Commands::Hubs { args }) => search::run_hubs(args)?,
        Some(Commands::Generate { commands }) => generate::run(commands)?,
        None => {}
    }

    Ok(())
}
