use super::SCORE_FIELD;

/// Facet label shown in the listing UI.
pub const FACET_LABEL: &str = "Openness";

/// Ordered `(field, label)` facet declarations, as a host keeps them.
pub type Facets = Vec<(String, String)>;

/// Register `openness_score` as a facet, only for plain `dataset` listings.
///
/// An existing `openness_score` entry keeps its position and gets the label
/// replaced.
pub fn dataset_facets(facets: &mut Facets, package_type: &str) {
    if package_type != "dataset" {
        return;
    }
    match facets.iter_mut().find(|(field, _)| field == SCORE_FIELD) {
        Some((_, label)) => *label = FACET_LABEL.to_string(),
        None => facets.push((SCORE_FIELD.to_string(), FACET_LABEL.to_string())),
    }
}
