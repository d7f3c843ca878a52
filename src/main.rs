//! `openness-stars` — score CKAN dataset records and report their openness.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load scoring tables ([`config::load_config`]) and the license register.
//! 3. Read dataset records from the given files or stdin.
//! 4. Score each dataset.
//! 5. Render the requested report.
//! 6. Exit `0`, `1` (a dataset below `--min-stars`) or `2` (runtime failure).

mod cli;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, ReportFormat};
use openness_stars::config::load_config;
use openness_stars::dataset::{read_datasets, DatasetRecord};
use openness_stars::license::register::load_register;
use openness_stars::report::{self, ScoredDataset};
use openness_stars::scorer::Scorer;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const BELOW_MIN_STARS: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 2;
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, cli.config.as_deref())?;
    let register = load_register(cli.license_register.as_deref())?;
    let scorer = Scorer::new(&config, &register);

    let records = read_all(&cli)?;

    let rows: Vec<ScoredDataset> = records
        .iter()
        .map(|record| ScoredDataset {
            dataset: record.dataset.clone(),
            qa: scorer.score(&record.dataset),
        })
        .collect();
    info!(datasets = rows.len(), "scored datasets");

    match cli.report {
        ReportFormat::Terminal => report::terminal::render(&rows, cli.verbose, cli.quiet)?,
        ReportFormat::Json => println!("{}", report::json::render_rows(&rows)?),
        ReportFormat::Index => {
            println!("{}", report::json::render_index_documents(&scorer, &records)?)
        }
    }

    if let Some(min) = cli.min_stars {
        let below = rows.iter().filter(|r| r.stars().get() < min).count();
        if below > 0 {
            eprintln!(
                "{} {} dataset(s) scored below {} star(s)",
                "✗".red(),
                below,
                min
            );
            return Ok(exit_code::BELOW_MIN_STARS);
        }
    }

    Ok(exit_code::SUCCESS)
}

fn read_all(cli: &Cli) -> Result<Vec<DatasetRecord>> {
    let pb = if !cli.quiet && cli.paths.len() > 1 {
        let pb = ProgressBar::new(cli.paths.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut records = Vec::new();
    for path in &cli.paths {
        records.extend(read_datasets(path)?);
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    Ok(records)
}

fn main() {
    init_tracing();
    match run() {
        Ok(code) => {
            if code != exit_code::SUCCESS {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
