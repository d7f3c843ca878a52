use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{dataset_from_value, QA_KEY, SCORE_FIELD};
use crate::models::Dataset;
use crate::scorer::Scorer;

/// Field of the search document carrying the serialized dataset.
pub const DATA_DICT_FIELD: &str = "data_dict";

/// Prepare a search document for indexing.
///
/// Scores the dataset serialized under `data_dict`, stores the integer score
/// under `openness_score` so it can be faceted, and drops any `qa` field so the
/// score detail is never indexed as free text.
pub fn before_dataset_index(
    scorer: &Scorer<'_>,
    mut search_doc: Map<String, Value>,
) -> Map<String, Value> {
    let dataset = embedded_dataset(&search_doc);
    let result = scorer.score(&dataset);
    debug!(dataset = dataset.label(), score = %result.openness_score, "indexing openness score");

    search_doc.insert(
        SCORE_FIELD.to_string(),
        Value::from(result.openness_score.get()),
    );
    search_doc.remove(QA_KEY);
    search_doc
}

/// `data_dict` is normally a JSON string; an inline object is accepted too.
fn embedded_dataset(search_doc: &Map<String, Value>) -> Dataset {
    match search_doc.get(DATA_DICT_FIELD) {
        Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
            Ok(value) => dataset_from_value(value),
            Err(err) => {
                warn!(error = %err, "data_dict is not valid JSON, scoring as empty");
                Dataset::default()
            }
        },
        Some(value @ Value::Object(_)) => dataset_from_value(value.clone()),
        Some(_) | None => {
            warn!("search document has no usable data_dict, scoring as empty");
            Dataset::default()
        }
    }
}
