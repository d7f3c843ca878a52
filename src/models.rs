use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A dataset record as supplied by the host (a CKAN package dict).
///
/// Every field is optional: scoring never fails on missing sub-fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub license_id: Option<String>,
    /// `None` covers an absent key, an explicit `null` and a non-array value.
    #[serde(default, deserialize_with = "lenient_resources")]
    pub resources: Option<Vec<Resource>>,
}

impl Dataset {
    pub fn resources(&self) -> &[Resource] {
        self.resources.as_deref().unwrap_or_default()
    }

    /// Best human-readable label for reports.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.title.as_deref())
            .or(self.id.as_deref())
            .unwrap_or("<unnamed>")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resource {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub format: Option<String>,
}

impl Resource {
    #[cfg(test)]
    pub(crate) fn with_format(format: &str) -> Self {
        Resource {
            format: Some(format.to_string()),
            ..Resource::default()
        }
    }
}

/// Host records are loosely typed: any non-string value reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// A non-array `resources` reads as absent; a non-object entry as a resource
/// without a format.
fn lenient_resources<'de, D>(deserializer: D) -> Result<Option<Vec<Resource>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    let resources = items
        .into_iter()
        .map(|item| match item {
            Value::Object(_) => serde_json::from_value(item).unwrap_or_default(),
            _ => Resource::default(),
        })
        .collect();
    Ok(Some(resources))
}

/// Openness star rating, always within `0..=5`.
///
/// Zero means the license was rejected; anything above means it was judged open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StarRating(u8);

impl StarRating {
    pub const MAX: u8 = 5;
    pub const NONE: StarRating = StarRating(0);
    pub const OPEN_LICENSE: StarRating = StarRating(1);

    pub fn new(stars: u8) -> Option<Self> {
        (stars <= Self::MAX).then_some(StarRating(stars))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for StarRating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        StarRating::new(value)
            .ok_or_else(|| format!("openness score {} is outside 0..={}", value, StarRating::MAX))
    }
}

impl From<StarRating> for u8 {
    fn from(rating: StarRating) -> Self {
        rating.0
    }
}

impl std::fmt::Display for StarRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of scoring one dataset.
///
/// Field names match the QA annotation consumed by templates and search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub openness_score: StarRating,
    pub openness_score_reason: String,
}

impl ScoreResult {
    pub fn new(score: StarRating, reason: impl Into<String>) -> Self {
        ScoreResult {
            openness_score: score,
            openness_score_reason: reason.into(),
        }
    }
}

/// The four format tiers, in evaluation order (highest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatTier {
    FiveStar,
    FourStar,
    ThreeStar,
    TwoStar,
}

impl FormatTier {
    pub const ALL: [FormatTier; 4] = [
        FormatTier::FiveStar,
        FormatTier::FourStar,
        FormatTier::ThreeStar,
        FormatTier::TwoStar,
    ];

    pub fn stars(self) -> StarRating {
        match self {
            FormatTier::FiveStar => StarRating(5),
            FormatTier::FourStar => StarRating(4),
            FormatTier::ThreeStar => StarRating(3),
            FormatTier::TwoStar => StarRating(2),
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            FormatTier::FiveStar => "One of the resource formats is 5-star data - linked data.",
            FormatTier::FourStar => {
                "One of the resource formats is 4-star data - data that uses URIs."
            }
            FormatTier::ThreeStar => {
                "One of the resource formats is 3-star data - machine-readable data in an open format."
            }
            FormatTier::TwoStar => {
                "One of the resource formats is 2-star data - machine-readable data in a proprietary format."
            }
        }
    }
}

impl std::fmt::Display for FormatTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatTier::FiveStar => write!(f, "five_star"),
            FormatTier::FourStar => write!(f, "four_star"),
            FormatTier::ThreeStar => write!(f, "three_star"),
            FormatTier::TwoStar => write!(f, "two_star"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_rating_bounds() {
        assert_eq!(StarRating::new(5).map(StarRating::get), Some(5));
        assert!(StarRating::new(6).is_none());
    }

    #[test]
    fn test_score_result_serializes_flat() {
        let result = ScoreResult::new(FormatTier::ThreeStar.stars(), "reason");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["openness_score"], 3);
        assert_eq!(value["openness_score_reason"], "reason");
    }

    #[test]
    fn test_score_result_rejects_out_of_range() {
        let raw = r#"{"openness_score": 9, "openness_score_reason": "x"}"#;
        assert!(serde_json::from_str::<ScoreResult>(raw).is_err());
    }

    #[test]
    fn test_dataset_tolerates_nulls() {
        let raw = r#"{"license_id": null, "resources": null}"#;
        let dataset: Dataset = serde_json::from_str(raw).unwrap();
        assert!(dataset.license_id.is_none());
        assert!(dataset.resources().is_empty());

        let raw = r#"{"resources": [{"format": null}, {}]}"#;
        let dataset: Dataset = serde_json::from_str(raw).unwrap();
        assert_eq!(dataset.resources().len(), 2);
        assert!(dataset.resources()[0].format.is_none());
    }

    #[test]
    fn test_dataset_tolerates_wrong_types() {
        let raw = r#"{
            "id": 12,
            "title": {"en": "Roads"},
            "license_id": "cc-by",
            "resources": [{"format": "csv"}, {"format": 7, "name": ["x"]}, "oops", null]
        }"#;
        let dataset: Dataset = serde_json::from_str(raw).unwrap();
        assert!(dataset.id.is_none());
        assert!(dataset.title.is_none());
        assert_eq!(dataset.license_id.as_deref(), Some("cc-by"));
        let formats: Vec<Option<&str>> =
            dataset.resources().iter().map(|r| r.format.as_deref()).collect();
        assert_eq!(formats, vec![Some("csv"), None, None, None]);
    }

    #[test]
    fn test_dataset_non_array_resources() {
        let raw = r#"{"license_id": 5, "resources": {"format": "csv"}}"#;
        let dataset: Dataset = serde_json::from_str(raw).unwrap();
        assert!(dataset.license_id.is_none());
        assert!(dataset.resources.is_none());
    }

    #[test]
    fn test_dataset_label_fallback() {
        let dataset = Dataset {
            title: Some("Roads".to_string()),
            ..Dataset::default()
        };
        assert_eq!(dataset.label(), "Roads");
        assert_eq!(Dataset::default().label(), "<unnamed>");
    }
}
