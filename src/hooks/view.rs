use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{dataset_from_map, QA_KEY};
use crate::scorer::Scorer;

/// Attach the full score result under `qa` before a dataset page is rendered.
pub fn before_dataset_view(
    scorer: &Scorer<'_>,
    mut dataset: Map<String, Value>,
) -> Map<String, Value> {
    annotate(scorer, &mut dataset);
    dataset
}

/// Same annotation for datasets returned by the show API.
pub fn after_dataset_show(
    scorer: &Scorer<'_>,
    mut dataset: Map<String, Value>,
) -> Map<String, Value> {
    annotate(scorer, &mut dataset);
    dataset
}

fn annotate(scorer: &Scorer<'_>, record: &mut Map<String, Value>) {
    let dataset = dataset_from_map(record);
    let result = scorer.score(&dataset);
    debug!(dataset = dataset.label(), score = %result.openness_score, "annotating dataset");

    match serde_json::to_value(&result) {
        Ok(value) => {
            record.insert(QA_KEY.to_string(), value);
        }
        Err(err) => warn!(error = %err, "could not serialize score result"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use crate::license::LicenseRegister;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_view_attaches_qa() {
        let cfg = ScoringConfig::default();
        let register = LicenseRegister::builtin();
        let scorer = Scorer::new(&cfg, &register);

        let out = before_dataset_view(
            &scorer,
            record(json!({
                "name": "schools",
                "license_id": "uk-ogl",
                "resources": [{"format": "XLS"}, {"format": null}]
            })),
        );

        assert_eq!(out["qa"]["openness_score"], 2);
        assert!(out["qa"]["openness_score_reason"]
            .as_str()
            .unwrap()
            .contains("2-star"));
        assert_eq!(out["name"], "schools");
    }

    #[test]
    fn test_view_ignores_wrongly_typed_fields() {
        let cfg = ScoringConfig::default();
        let register = LicenseRegister::builtin();
        let scorer = Scorer::new(&cfg, &register);

        let out = before_dataset_view(
            &scorer,
            record(json!({
                "license_id": "cc-by",
                "resources": [{"format": "csv"}, {"format": 7}]
            })),
        );
        assert_eq!(out["qa"]["openness_score"], 3);

        let out = before_dataset_view(
            &scorer,
            record(json!({
                "license_id": "cc-by",
                "title": {"en": "Roads"},
                "resources": [{"format": "csv", "name": {"en": "roads.csv"}}]
            })),
        );
        assert_eq!(out["qa"]["openness_score"], 3);
    }

    #[test]
    fn test_view_non_string_license_is_missing() {
        let cfg = ScoringConfig::default();
        let register = LicenseRegister::builtin();
        let scorer = Scorer::new(&cfg, &register);

        let out = after_dataset_show(
            &scorer,
            record(json!({"license_id": 42, "resources": [{"format": "rdf"}]})),
        );
        assert_eq!(out["qa"]["openness_score"], 0);
        assert_eq!(out["qa"]["openness_score_reason"], "No license supplied");
    }

    #[test]
    fn test_show_replaces_stale_qa() {
        let cfg = ScoringConfig::default();
        let register = LicenseRegister::builtin();
        let scorer = Scorer::new(&cfg, &register);

        let out = after_dataset_show(&scorer, record(json!({"qa": "stale", "resources": []})));
        assert_eq!(
            out["qa"],
            json!({"openness_score": 0, "openness_score_reason": "No license supplied"})
        );
    }
}
