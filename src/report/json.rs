use anyhow::Result;
use serde_json::{Map, Value};

use super::ScoredDataset;
use crate::dataset::DatasetRecord;
use crate::hooks::index::before_dataset_index;
use crate::scorer::Scorer;

/// Pretty JSON array of `{dataset, qa}` rows.
pub fn render_rows(rows: &[ScoredDataset]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// Pretty JSON array of search documents, each passed through the indexing hook.
pub fn render_index_documents(scorer: &Scorer<'_>, records: &[DatasetRecord]) -> Result<String> {
    let docs: Vec<Map<String, Value>> = records
        .iter()
        .map(|record| before_dataset_index(scorer, record.search_document()))
        .collect();
    Ok(serde_json::to_string_pretty(&docs)?)
}
