//! Report renderers for scored datasets.
//!
//! - [`terminal`] — colored table with a per-star summary box; respects `--verbose` / `--quiet`.
//! - [`json`] — machine-readable rows, or the search documents the indexing hook produces.

pub mod json;
pub mod terminal;

use serde::Serialize;

use crate::models::{Dataset, ScoreResult, StarRating};

/// One dataset with its score, as reported.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredDataset {
    pub dataset: Dataset,
    pub qa: ScoreResult,
}

impl ScoredDataset {
    pub fn stars(&self) -> StarRating {
        self.qa.openness_score
    }
}

/// Number of datasets per star rating, indexed `0..=5`.
pub fn star_histogram(rows: &[ScoredDataset]) -> [usize; StarRating::MAX as usize + 1] {
    let mut counts = [0; StarRating::MAX as usize + 1];
    for row in rows {
        counts[usize::from(row.stars().get())] += 1;
    }
    counts
}
