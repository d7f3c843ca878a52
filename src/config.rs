use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::models::FormatTier;

const DEFAULT_OPEN_LICENSES: &[&str] = &[
    "cc-by-4.0",
    "psi",
    "cc-by",
    "cc-by-3.0",
    "cc-by-2.0",
    "cc-zero",
    "cc0",
    "gfdl",
    "pddl",
    "odc-by",
    "uk-ogl",
];

const DEFAULT_FIVE_STAR: &[&str] = &["rdf", "n3", "sparql", "ttl", "rdf-xml", "jsonld"];

const DEFAULT_FOUR_STAR: &[&str] = &[];

const DEFAULT_THREE_STAR: &[&str] = &[
    "kml",
    "wcs",
    "netcdf",
    "tsv",
    "wfs",
    "kmz",
    "qgis",
    "ods",
    "json",
    "odb",
    "odf",
    "odg",
    "xml",
    "wms",
    "wmts",
    "svg",
    "jpeg",
    "csv",
    "csv.zip",
    "csv / zip",
    "atom feed",
    "xyz",
    "png",
    "rss",
    "geojson",
    "iati",
    "ics",
    "api",
    "json-stat",
    "jsonstat",
    "gtfs",
    "shp / zip",
    "shp.zip",
    "tab",
    "shp",
    "gml",
    "hdf5",
];

const DEFAULT_TWO_STAR: &[&str] = &[
    "xls",
    "mdb",
    "arcgis map service",
    "bmp",
    "tiff",
    "xlsx",
    "gif",
    "e00",
    "mrsid",
    "arcgis map preview",
    "mop",
    "esri rest",
    "dbase",
];

/// Immutable scoring tables: the open-license allowlist and the four format tiers.
///
/// Every entry is stored lowercased. Built once at startup and shared by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    open_licenses: HashSet<String>,
    five_star: HashSet<String>,
    four_star: HashSet<String>,
    three_star: HashSet<String>,
    two_star: HashSet<String>,
}

impl ScoringConfig {
    pub fn is_allowlisted(&self, license_id: &str) -> bool {
        self.open_licenses.contains(&license_id.to_lowercase())
    }

    pub fn formats(&self, tier: FormatTier) -> &HashSet<String> {
        match tier {
            FormatTier::FiveStar => &self.five_star,
            FormatTier::FourStar => &self.four_star,
            FormatTier::ThreeStar => &self.three_star,
            FormatTier::TwoStar => &self.two_star,
        }
    }
}

impl Default for ScoringConfig {
    /// Tables shipped with the plugin. The 4-star tier is intentionally empty.
    fn default() -> Self {
        ScoringConfig {
            open_licenses: lowercase_set(DEFAULT_OPEN_LICENSES.iter().copied()),
            five_star: lowercase_set(DEFAULT_FIVE_STAR.iter().copied()),
            four_star: lowercase_set(DEFAULT_FOUR_STAR.iter().copied()),
            three_star: lowercase_set(DEFAULT_THREE_STAR.iter().copied()),
            two_star: lowercase_set(DEFAULT_TWO_STAR.iter().copied()),
        }
    }
}

/// On-disk shape of `.openness-stars/config.toml`.
///
/// Any table left out keeps its built-in default; an empty list clears it.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub licenses: LicensesSection,
    #[serde(default)]
    pub formats: FormatsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LicensesSection {
    /// License ids treated as open whatever the register says.
    pub open: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatsSection {
    pub five_star: Option<Vec<String>>,
    pub four_star: Option<Vec<String>>,
    pub three_star: Option<Vec<String>>,
    pub two_star: Option<Vec<String>>,
}

impl From<ConfigFile> for ScoringConfig {
    fn from(file: ConfigFile) -> Self {
        let defaults = ScoringConfig::default();
        let pick = |custom: Option<Vec<String>>, fallback: HashSet<String>| match custom {
            Some(list) => lowercase_set(list.iter().map(String::as_str)),
            None => fallback,
        };

        ScoringConfig {
            open_licenses: pick(file.licenses.open, defaults.open_licenses),
            five_star: pick(file.formats.five_star, defaults.five_star),
            four_star: pick(file.formats.four_star, defaults.four_star),
            three_star: pick(file.formats.three_star, defaults.three_star),
            two_star: pick(file.formats.two_star, defaults.two_star),
        }
    }
}

fn lowercase_set<'a>(items: impl Iterator<Item = &'a str>) -> HashSet<String> {
    items.map(str::to_lowercase).collect()
}

/// Parse a TOML config string into scoring tables.
pub fn parse_config(content: &str) -> Result<ScoringConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    Ok(file.into())
}

fn read_config(path: &Path) -> Result<ScoringConfig> {
    debug!(path = %path.display(), "loading scoring config");
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_config(&content).with_context(|| format!("parsing config {}", path.display()))
}

/// Load the scoring configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<base_dir>/.openness-stars/config.toml`
/// 3. `~/.config/openness-stars/config.toml`
/// 4. Built-in [`ScoringConfig::default`]
pub fn load_config(base_dir: &Path, config_override: Option<&Path>) -> Result<ScoringConfig> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = base_dir.join(".openness-stars").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("openness-stars")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    debug!("no config file found, using built-in tables");
    Ok(ScoringConfig::default())
}
