use std::collections::HashSet;

use tracing::debug;

use crate::config::ScoringConfig;
use crate::license::LicenseOracle;
use crate::models::{Dataset, FormatTier, ScoreResult, StarRating};

pub const REASON_NO_LICENSE: &str = "No license supplied";
pub const REASON_NOT_OPEN: &str = "The dataset license is not in our list of Open Licenses.";
pub const REASON_OPEN_LICENSE: &str = "The dataset license is an open license";

/// Scores datasets against a fixed set of tables and a license oracle.
///
/// Holds only shared references, so one scorer can serve any number of
/// threads at once.
#[derive(Clone, Copy)]
pub struct Scorer<'a> {
    config: &'a ScoringConfig,
    oracle: &'a dyn LicenseOracle,
}

impl<'a> Scorer<'a> {
    pub fn new(config: &'a ScoringConfig, oracle: &'a dyn LicenseOracle) -> Self {
        Scorer { config, oracle }
    }

    /// Score a dataset record. Total: missing license, resources or formats
    /// never cause an error.
    pub fn score(&self, dataset: &Dataset) -> ScoreResult {
        self.score_parts(
            dataset.license_id.as_deref(),
            dataset.resources().iter().map(|r| r.format.as_deref()),
        )
    }

    /// Score from a license id and the raw resource formats.
    ///
    /// Formats are compared lowercased; `None` entries never match a tier.
    pub fn score_parts<'f>(
        &self,
        license_id: Option<&str>,
        formats: impl IntoIterator<Item = Option<&'f str>>,
    ) -> ScoreResult {
        let Some(license_id) = license_id else {
            debug!("no license supplied");
            return ScoreResult::new(StarRating::NONE, REASON_NO_LICENSE);
        };

        if !self.license_is_open(license_id) {
            debug!(license_id, "license is not open");
            return ScoreResult::new(StarRating::NONE, REASON_NOT_OPEN);
        }

        let formats: HashSet<String> = formats
            .into_iter()
            .flatten()
            .map(str::to_lowercase)
            .collect();

        match self.best_tier(&formats) {
            Some(tier) => {
                debug!(license_id, %tier, "format tier matched");
                ScoreResult::new(tier.stars(), tier.reason())
            }
            None => {
                debug!(license_id, formats = formats.len(), "no format tier matched");
                ScoreResult::new(StarRating::OPEN_LICENSE, REASON_OPEN_LICENSE)
            }
        }
    }

    /// Open if the oracle knows the id and flags it open, or if the lowercased
    /// id is on the allowlist.
    pub fn license_is_open(&self, license_id: &str) -> bool {
        self.oracle.is_known_open(license_id) || self.config.is_allowlisted(license_id)
    }

    /// First tier, highest first, sharing at least one format with `formats`.
    fn best_tier(&self, formats: &HashSet<String>) -> Option<FormatTier> {
        FormatTier::ALL
            .into_iter()
            .find(|tier| !self.config.formats(*tier).is_disjoint(formats))
    }
}
