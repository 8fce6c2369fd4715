use std::{fs::File, io::BufReader, path::Path};

use am4_optimizer::{json::types::JsonDataset, problem::dataset::Dataset};
use anyhow::Context;
use tracing::info;

pub fn read_dataset(path: &Path) -> Result<Dataset, anyhow::Error> {
    info!("Reading dataset {:?}", path);
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let json: JsonDataset = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("cannot parse {}", path.display()))?;

    Ok(json.build_dataset()?)
}
