//! Thin adapters a host calls around its own dataset lifecycle.
//!
//! - [`index`] — adds the integer `openness_score` to a search document.
//! - [`view`] — attaches the full result under [`QA_KEY`] before display.
//! - [`display`] — reads that annotation back and renders a star badge.
//! - [`facets`] — registers `openness_score` as a facet for dataset listings.
//!
//! All of them work on `serde_json` maps and never fail.

pub mod display;
pub mod facets;
pub mod index;
pub mod view;

use serde_json::{Map, Value};
use tracing::warn;

use crate::models::Dataset;

/// Key under which the full score result is attached to a record.
pub const QA_KEY: &str = "qa";

/// Search-index field holding the integer score.
pub const SCORE_FIELD: &str = "openness_score";

/// Read the scoring-relevant fields out of a host record.
///
/// Wrongly typed fields read as absent; only a value that is not an object at
/// all scores as an empty dataset.
pub(crate) fn dataset_from_value(value: Value) -> Dataset {
    serde_json::from_value(value).unwrap_or_else(|err| {
        warn!(error = %err, "dataset record is not an object, scoring as empty");
        Dataset::default()
    })
}

pub(crate) fn dataset_from_map(record: &Map<String, Value>) -> Dataset {
    dataset_from_value(Value::Object(record.clone()))
}
