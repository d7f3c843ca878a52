use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use tracing::debug;

use crate::models::Dataset;

/// A dataset as read from input: the host's raw record plus its typed view.
#[derive(Debug, Clone)]
pub struct DatasetRecord {
    pub raw: Map<String, Value>,
    pub dataset: Dataset,
}

impl DatasetRecord {
    pub fn from_raw(raw: Map<String, Value>) -> Result<Self> {
        let dataset = serde_json::from_value(Value::Object(raw.clone()))?;
        Ok(DatasetRecord { raw, dataset })
    }

    /// Search document as the host would hand it to the indexing hook.
    pub fn search_document(&self) -> Map<String, Value> {
        let mut doc = Map::new();
        for key in ["id", "name", "title", "license_id"] {
            if let Some(value) = self.raw.get(key) {
                doc.insert(key.to_string(), value.clone());
            }
        }
        doc.insert(
            "data_dict".to_string(),
            Value::String(Value::Object(self.raw.clone()).to_string()),
        );
        doc
    }
}

/// Parse dataset records from JSON.
///
/// Accepted shapes:
/// - a single dataset object
/// - an array of dataset objects
/// - a `package_show` response: `{"result": {...}}`
/// - a `package_search` response: `{"result": {"results": [...]}}`
pub fn parse_datasets(content: &str) -> Result<Vec<DatasetRecord>> {
    let value: Value = serde_json::from_str(content)?;
    let items = match unwrap_envelope(value) {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        other => bail!("expected a dataset object or array, found {}", kind(&other)),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(raw) => {
                DatasetRecord::from_raw(raw).with_context(|| format!("dataset #{}", i + 1))
            }
            other => bail!("dataset #{} is {}, not an object", i + 1, kind(&other)),
        })
        .collect()
}

fn unwrap_envelope(value: Value) -> Value {
    let mut object = match value {
        Value::Object(object) => object,
        other => return other,
    };
    match object.remove("result") {
        Some(Value::Object(mut result)) => match result.remove("results") {
            Some(results @ Value::Array(_)) => results,
            Some(other) => {
                result.insert("results".to_string(), other);
                Value::Object(result)
            }
            None => Value::Object(result),
        },
        Some(other) => {
            object.insert("result".to_string(), other);
            Value::Object(object)
        }
        None => Value::Object(object),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Read dataset records from a file, or from stdin when `path` is `-`.
pub fn read_datasets(path: &Path) -> Result<Vec<DatasetRecord>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading datasets from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    };

    let records = parse_datasets(&content)
        .with_context(|| format!("parsing datasets from {}", path.display()))?;
    debug!(path = %path.display(), datasets = records.len(), "read datasets");
    Ok(records)
}
