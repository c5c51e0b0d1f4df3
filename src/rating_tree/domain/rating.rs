use super::ArtifactCoordinate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Label assigned to a rating by the rating service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RatingLabel {
    Good,
    Moderate,
    Bad,
    Unclear,
    Unknown,
}

impl RatingLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RatingLabel::Good => "GOOD",
            RatingLabel::Moderate => "MODERATE",
            RatingLabel::Bad => "BAD",
            RatingLabel::Unclear => "UNCLEAR",
            RatingLabel::Unknown => "UNKNOWN",
        }
    }
}

impl FromStr for RatingLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GOOD" => Ok(RatingLabel::Good),
            "MODERATE" => Ok(RatingLabel::Moderate),
            "BAD" => Ok(RatingLabel::Bad),
            "UNCLEAR" => Ok(RatingLabel::Unclear),
            "UNKNOWN" => Ok(RatingLabel::Unknown),
            _ => Err(format!(
                "Invalid rating label: {}. Expected GOOD, MODERATE, BAD, UNCLEAR or UNKNOWN",
                s
            )),
        }
    }
}

impl fmt::Display for RatingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An empty label means "no label yet"; labels this crate does not know
/// about degrade to UNKNOWN rather than failing the whole response.
fn deserialize_label<'de, D>(deserializer: D) -> Result<Option<RatingLabel>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(match raw.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(label) => Some(label.parse().unwrap_or(RatingLabel::Unknown)),
    })
}

/// Rating computed by the rating service for one artifact
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rating {
    pub id: String,
    pub rating_definition_id: String,
    pub model_rating_definition_id: String,
    pub created: String,
    pub value: f64,
    pub confidence: f64,
    #[serde(deserialize_with = "deserialize_label")]
    pub label: Option<RatingLabel>,
    #[serde(alias = "namespace")]
    pub name_space: String,
    pub name: String,
    pub repository_type: String,
    pub coordinate_value: String,
}

impl Rating {
    /// Placeholder for an artifact the service never produced a rating for
    pub fn unknown() -> Self {
        Self {
            label: Some(RatingLabel::Unknown),
            ..Self::default()
        }
    }

    pub fn has_label(&self) -> bool {
        self.label.is_some()
    }

    pub fn model_definition_id(&self) -> Option<&str> {
        Some(self.model_rating_definition_id.as_str()).filter(|id| !id.is_empty())
    }
}

/// Ratings keyed by coordinate for one pipeline run
///
/// Populated by the rating client for every queried coordinate; anything the
/// service never resolved is an UNKNOWN placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RatingMap {
    ratings: BTreeMap<ArtifactCoordinate, Rating>,
}

impl RatingMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, coordinate: ArtifactCoordinate, rating: Rating) {
        self.ratings.insert(coordinate, rating);
    }

    pub fn get(&self, coordinate: &ArtifactCoordinate) -> Option<&Rating> {
        self.ratings.get(coordinate)
    }

    pub fn label_of(&self, coordinate: &ArtifactCoordinate) -> Option<RatingLabel> {
        self.get(coordinate).and_then(|rating| rating.label)
    }

    pub fn contains(&self, coordinate: &ArtifactCoordinate) -> bool {
        self.ratings.contains_key(coordinate)
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, ArtifactCoordinate, Rating> {
        self.ratings.iter()
    }

    pub fn coordinates(&self) -> impl Iterator<Item = &ArtifactCoordinate> {
        self.ratings.keys()
    }

    /// Inserts an UNKNOWN placeholder for every coordinate without a rating
    pub fn fill_unknown<'a, I>(&mut self, coordinates: I)
    where
        I: IntoIterator<Item = &'a ArtifactCoordinate>,
    {
        for coordinate in coordinates {
            self.ratings
                .entry(coordinate.clone())
                .or_insert_with(Rating::unknown);
        }
    }

    /// Number of ratings carrying the given label
    pub fn count_label(&self, label: RatingLabel) -> usize {
        self.ratings
            .values()
            .filter(|rating| rating.label == Some(label))
            .count()
    }
}

impl FromIterator<(ArtifactCoordinate, Rating)> for RatingMap {
    fn from_iter<T: IntoIterator<Item = (ArtifactCoordinate, Rating)>>(iter: T) -> Self {
        Self {
            ratings: iter.into_iter().collect(),
        }
    }
}

/// Result of a complete rating retrieval
#[derive(Debug, Clone, Default)]
pub struct RatingOutcome {
    pub ratings: RatingMap,
    /// Whether any calculated rating violated the policy
    pub violation: bool,
    /// Coordinates still being computed when the retry budget ran out
    pub pending: BTreeSet<ArtifactCoordinate>,
    /// Number of batch requests issued
    pub attempts: usize,
}

impl RatingOutcome {
    /// False when some ratings are UNKNOWN only because they were still
    /// pending, as opposed to genuinely absent from the service
    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }
}
