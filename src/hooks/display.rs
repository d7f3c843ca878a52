use serde_json::{Map, Value};
use tracing::warn;

use super::QA_KEY;
use crate::models::{ScoreResult, StarRating};

/// What a record's `qa` key holds at render time.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// Key absent, or holding an empty/falsy value.
    Missing,
    /// Present but not a score mapping.
    WrongType,
    Score(ScoreResult),
}

pub fn read_annotation(record: &Map<String, Value>) -> Annotation {
    let Some(qa) = record.get(QA_KEY) else {
        return Annotation::Missing;
    };
    if is_empty_value(qa) {
        return Annotation::Missing;
    }
    if !qa.is_object() {
        return Annotation::WrongType;
    }
    match serde_json::from_value::<ScoreResult>(qa.clone()) {
        Ok(result) => Annotation::Score(result),
        Err(err) => {
            warn!(error = %err, "qa mapping does not hold a score result");
            Annotation::WrongType
        }
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Brief star badge for a dataset listing.
pub fn openness_stars_dataset_html(dataset: &Map<String, Value>) -> String {
    match read_annotation(dataset) {
        Annotation::Missing => "<!-- No qa info for this dataset -->".to_string(),
        Annotation::WrongType => "<!-- QA info was of the wrong type -->".to_string(),
        Annotation::Score(result) => badge(&result),
    }
}

/// Star badge followed by the reason, for a resource page.
pub fn openness_stars_resource_html(resource: &Map<String, Value>) -> String {
    match read_annotation(resource) {
        Annotation::Missing => "<!-- No qa info for this resource -->".to_string(),
        Annotation::WrongType => "<!-- QA info was of the wrong type -->".to_string(),
        Annotation::Score(result) => format!(
            "{} <span class=\"openness-reason\">{}</span>",
            badge(&result),
            escape_html(&result.openness_score_reason)
        ),
    }
}

/// Filled and hollow stars, e.g. `★★★☆☆` for a 3.
pub fn star_glyphs(score: StarRating) -> String {
    let filled = usize::from(score.get());
    let hollow = usize::from(StarRating::MAX) - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(hollow))
}

fn badge(result: &ScoreResult) -> String {
    format!(
        "<span class=\"openness-stars\" data-score=\"{}\" title=\"{}\">{}</span>",
        result.openness_score,
        escape_html(&result.openness_score_reason),
        star_glyphs(result.openness_score)
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_missing_annotation() {
        assert_eq!(read_annotation(&record(json!({}))), Annotation::Missing);
        assert_eq!(read_annotation(&record(json!({"qa": null}))), Annotation::Missing);
        assert_eq!(read_annotation(&record(json!({"qa": {}}))), Annotation::Missing);
        assert_eq!(
            openness_stars_dataset_html(&record(json!({}))),
            "<!-- No qa info for this dataset -->"
        );
        assert_eq!(
            openness_stars_resource_html(&record(json!({"qa": ""}))),
            "<!-- No qa info for this resource -->"
        );
    }

    #[test]
    fn test_wrong_type_annotation() {
        for qa in [json!("3 stars"), json!([1]), json!(3), json!({"openness_score": "x"})] {
            let rec = record(json!({ "qa": qa }));
            assert_eq!(read_annotation(&rec), Annotation::WrongType);
            assert_eq!(
                openness_stars_dataset_html(&rec),
                "<!-- QA info was of the wrong type -->"
            );
        }
    }

    #[test]
    fn test_dataset_badge() {
        let rec = record(json!({
            "qa": {"openness_score": 3, "openness_score_reason": "open & \"readable\""}
        }));
        let html = openness_stars_dataset_html(&rec);
        assert!(html.contains("★★★☆☆"));
        assert!(html.contains("data-score=\"3\""));
        assert!(html.contains("open &amp; &quot;readable&quot;"));
    }

    #[test]
    fn test_resource_badge_includes_reason() {
        let rec = record(json!({
            "qa": {"openness_score": 0, "openness_score_reason": "No license supplied"}
        }));
        let html = openness_stars_resource_html(&rec);
        assert!(html.contains("☆☆☆☆☆"));
        assert!(html.ends_with("<span class=\"openness-reason\">No license supplied</span>"));
    }

    #[test]
    fn test_star_glyphs() {
        assert_eq!(star_glyphs(StarRating::new(5).unwrap()), "★★★★★");
        assert_eq!(star_glyphs(StarRating::NONE), "☆☆☆☆☆");
    }
}
