//! `openness-stars` — rate dataset openness on the five-star open data scale.
//!
//! A dataset earns its first star for an open license, then up to four more
//! depending on the most open format among its resources.
//!
//! # Flow
//! 1. Build a [`config::ScoringConfig`] (built-in tables or TOML overrides).
//! 2. Pick a [`license::LicenseOracle`], usually a [`license::LicenseRegister`].
//! 3. Score datasets with [`scorer::Scorer`].
//! 4. Hand results to the host through [`hooks`], or report them via [`report`].

pub mod config;
pub mod dataset;
pub mod hooks;
pub mod license;
pub mod models;
pub mod report;
pub mod scorer;

pub use config::ScoringConfig;
pub use license::{LicenseOracle, LicenseRegister};
pub use models::{Dataset, Resource, ScoreResult, StarRating};
pub use scorer::Scorer;
