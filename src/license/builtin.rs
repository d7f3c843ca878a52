use super::register::LicenseEntry;

/// The default CKAN license list, as `(id, title, open)`.
const DEFAULT_LICENSES: &[(&str, &str, bool)] = &[
    ("notspecified", "License not specified", false),
    (
        "odc-pddl",
        "Open Data Commons Public Domain Dedication and License (PDDL)",
        true,
    ),
    ("odc-odbl", "Open Data Commons Open Database License (ODbL)", true),
    ("odc-by", "Open Data Commons Attribution License", true),
    ("cc-zero", "Creative Commons CCZero", true),
    ("cc-by", "Creative Commons Attribution", true),
    ("cc-by-sa", "Creative Commons Attribution Share-Alike", true),
    ("gfdl", "GNU Free Documentation License", true),
    ("other-open", "Other (Open)", true),
    ("other-pd", "Other (Public Domain)", true),
    ("other-at", "Other (Attribution)", true),
    ("uk-ogl", "UK Open Government Licence (OGL)", true),
    ("cc-nc", "Creative Commons Non-Commercial (Any)", false),
    ("other-nc", "Other (Non-Commercial)", false),
    ("other-closed", "Other (Not Open)", false),
];

pub(super) fn default_entries() -> Vec<LicenseEntry> {
    DEFAULT_LICENSES
        .iter()
        .map(|(id, title, open)| LicenseEntry::new(id, title, *open))
        .collect()
}
