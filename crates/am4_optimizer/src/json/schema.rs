use schemars::schema_for;

use crate::{json::types, search::query::SearchQuery};

pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schema_for!(types::JsonDataset))
}

pub fn generate_query_schema() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schema_for!(SearchQuery))
}
