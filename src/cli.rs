use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "openness-stars",
    about = "Score dataset openness (1-5 stars) from license and resource formats",
    version
)]
pub struct Cli {
    /// Dataset JSON files (dataset dict, array, or CKAN API response); `-` reads stdin
    #[arg(default_value = "-")]
    pub paths: Vec<PathBuf>,

    /// Scoring config file [default: ./.openness-stars/config.toml, fallback ~/.config/openness-stars/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// CKAN license list JSON used to decide which licenses are open [default: built-in list]
    #[arg(long, value_name = "FILE")]
    pub license_register: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Exit with code 1 if any dataset scores below this many stars
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(0..=5))]
    pub min_stars: Option<u8>,

    /// Show the scoring reason for every dataset
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    /// Colored table with a per-star summary
    Terminal,
    /// JSON array of `{dataset, qa}` rows
    Json,
    /// JSON array of search documents carrying `openness_score`
    Index,
}
