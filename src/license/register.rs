use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use super::builtin::default_entries;
use super::LicenseOracle;

/// One license in the register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseEntry {
    pub id: String,
    pub title: String,
    open: bool,
}

impl LicenseEntry {
    pub fn new(id: &str, title: &str, open: bool) -> Self {
        LicenseEntry {
            id: id.to_string(),
            title: title.to_string(),
            open,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

/// A license record as it appears in a CKAN license list file.
///
/// Newer lists carry `od_conformance` / `osd_conformance`; older ones the
/// boolean `is_okd_compliant` / `is_osi_compliant` flags.
#[derive(Debug, Deserialize)]
struct RawLicense {
    id: Option<String>,
    title: Option<String>,
    od_conformance: Option<String>,
    osd_conformance: Option<String>,
    #[serde(default)]
    is_okd_compliant: bool,
    #[serde(default)]
    is_osi_compliant: bool,
}

impl RawLicense {
    fn is_open(&self) -> bool {
        let approved = |c: &Option<String>| c.as_deref() == Some("approved");
        approved(&self.od_conformance)
            || approved(&self.osd_conformance)
            || self.is_okd_compliant
            || self.is_osi_compliant
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RegisterFile {
    List(Vec<RawLicense>),
    Keyed(BTreeMap<String, RawLicense>),
}

/// In-memory license register, keyed by exact license id.
#[derive(Debug, Clone, Default)]
pub struct LicenseRegister {
    licenses: HashMap<String, LicenseEntry>,
}

impl LicenseRegister {
    /// The stock CKAN license list.
    pub fn builtin() -> Self {
        Self::from_entries(default_entries())
    }

    pub fn from_entries(entries: impl IntoIterator<Item = LicenseEntry>) -> Self {
        let mut licenses = HashMap::new();
        for entry in entries {
            if let Some(previous) = licenses.insert(entry.id.clone(), entry) {
                debug!(id = %previous.id, "duplicate license id, keeping the later entry");
            }
        }
        LicenseRegister { licenses }
    }

    pub fn get(&self, license_id: &str) -> Option<&LicenseEntry> {
        self.licenses.get(license_id)
    }

    pub fn len(&self) -> usize {
        self.licenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.licenses.is_empty()
    }
}

impl LicenseOracle for LicenseRegister {
    fn is_known(&self, license_id: &str) -> bool {
        self.licenses.contains_key(license_id)
    }

    fn is_open(&self, license_id: &str) -> bool {
        self.get(license_id).is_some_and(LicenseEntry::is_open)
    }
}

/// Parse a CKAN license list: either an array of license objects or an
/// object keyed by license id.
pub fn parse_register(content: &str) -> Result<LicenseRegister> {
    let file: RegisterFile =
        serde_json::from_str(content).context("license register is neither a list nor a map")?;

    let keyed: Vec<(Option<String>, RawLicense)> = match file {
        RegisterFile::List(list) => list.into_iter().map(|raw| (None, raw)).collect(),
        RegisterFile::Keyed(map) => map.into_iter().map(|(k, raw)| (Some(k), raw)).collect(),
    };

    let mut entries = Vec::with_capacity(keyed.len());
    for (key, raw) in keyed {
        let Some(id) = raw.id.clone().or(key) else {
            warn!(title = ?raw.title, "skipping license without an id");
            continue;
        };
        let title = raw.title.clone().unwrap_or_else(|| id.clone());
        entries.push(LicenseEntry::new(&id, &title, raw.is_open()));
    }

    if entries.is_empty() {
        bail!("license register contains no usable licenses");
    }

    Ok(LicenseRegister::from_entries(entries))
}

/// Load a register file, or fall back to [`LicenseRegister::builtin`] when no
/// path is given.
pub fn load_register(path: Option<&Path>) -> Result<LicenseRegister> {
    let Some(path) = path else {
        return Ok(LicenseRegister::builtin());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading license register {}", path.display()))?;
    let register = parse_register(&content)
        .with_context(|| format!("parsing license register {}", path.display()))?;
    debug!(path = %path.display(), licenses = register.len(), "loaded license register");
    Ok(register)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_register() {
        let register = LicenseRegister::builtin();
        assert!(register.is_known_open("cc-by-sa"));
        assert!(register.is_known_open("odc-odbl"));
        assert!(register.is_known("other-closed"));
        assert!(!register.is_open("other-closed"));
        assert!(!register.is_known("proprietary-xyz"));
    }

    #[test]
    fn test_lookup_is_exact() {
        let register = LicenseRegister::builtin();
        assert!(!register.is_known("CC-BY-SA"));
    }

    #[test]
    fn test_parse_list_with_conformance() {
        let register = parse_register(
            r#"[
                {"id": "a", "title": "A", "od_conformance": "approved", "osd_conformance": "not reviewed"},
                {"id": "b", "title": "B", "od_conformance": "not reviewed", "osd_conformance": "approved"},
                {"id": "c", "title": "C", "od_conformance": "rejected", "osd_conformance": "not reviewed"}
            ]"#,
        )
        .unwrap();
        assert_eq!(register.len(), 3);
        assert!(register.is_known_open("a"));
        assert!(register.is_known_open("b"));
        assert!(!register.is_known_open("c"));
    }

    #[test]
    fn test_parse_keyed_legacy_flags() {
        let register = parse_register(
            r#"{
                "odc-odbl": {"title": "ODbL", "is_okd_compliant": true, "is_osi_compliant": false},
                "closed": {"title": "Closed", "is_okd_compliant": false}
            }"#,
        )
        .unwrap();
        assert!(register.is_known_open("odc-odbl"));
        assert!(register.is_known("closed"));
        assert!(!register.is_open("closed"));
        assert_eq!(register.get("odc-odbl").unwrap().title, "ODbL");
    }

    #[test]
    fn test_parse_skips_entries_without_id() {
        let register =
            parse_register(r#"[{"title": "nameless"}, {"id": "x", "is_osi_compliant": true}]"#)
                .unwrap();
        assert_eq!(register.len(), 1);
        assert_eq!(register.get("x").unwrap().title, "x");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_register("42").is_err());
        assert!(parse_register("[]").is_err());
    }

    #[test]
    fn test_load_register_default_and_file() {
        assert_eq!(load_register(None).unwrap().len(), LicenseRegister::builtin().len());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("licenses.json");
        std::fs::write(&path, r#"[{"id": "only-one", "od_conformance": "approved"}]"#).unwrap();
        let register = load_register(Some(&path)).unwrap();
        assert_eq!(register.len(), 1);
        assert!(register.is_known_open("only-one"));
    }
}
