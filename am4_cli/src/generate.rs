use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum GenerateSubcommands {
    /// JSON schema of dataset files
    JsonSchema {
        #[arg(long, short = 'o')]
        out: PathBuf,
    },
    /// JSON schema of search queries
    QuerySchema {
        #[arg(long, short = 'o')]
        out: PathBuf,
    },
}

pub fn run(subcommand: GenerateSubcommands) -> Result<(), anyhow::Error> {
    let (schema, out) = match subcommand {
        GenerateSubcommands::JsonSchema { out } => {
            (am4_optimizer::json::schema::generate_json_schema()?, out)
        }
        GenerateSubcommands::QuerySchema { out } => {
            (am4_optimizer::json::schema::generate_query_schema()?, out)
        }
    };

    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(out, schema)?;

    Ok(())
}
