use super::{ArtifactCoordinate, Rating};
use serde::Deserialize;

/// Processing state reported by the rating service for one artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum RatingStatus {
    Requested,
    Calculated,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Default, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    status: RatingStatus,
}

#[derive(Debug, Deserialize)]
struct RawArtifactRating {
    #[serde(default)]
    metadata: RawMetadata,
    #[serde(default)]
    ratings: Option<Vec<Rating>>,
}

/// Decoded per-artifact entry of a rating response
///
/// The service answers either with a status-only object while the rating is
/// still being computed, or with a populated `ratings` array. Only the first
/// rating of the array is used.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawArtifactRating")]
pub enum ArtifactRatingResponse {
    /// Status REQUESTED: the service is still computing the rating
    Pending,
    Calculated(Rating),
    /// No rating exists for the artifact
    Unknown,
}

impl From<RawArtifactRating> for ArtifactRatingResponse {
    fn from(raw: RawArtifactRating) -> Self {
        if raw.metadata.status == RatingStatus::Requested {
            return ArtifactRatingResponse::Pending;
        }
        match raw.ratings.and_then(|ratings| ratings.into_iter().next()) {
            Some(rating) => ArtifactRatingResponse::Calculated(rating),
            None => ArtifactRatingResponse::Unknown,
        }
    }
}

impl ArtifactRatingResponse {
    pub fn is_pending(&self) -> bool {
        matches!(self, ArtifactRatingResponse::Pending)
    }
}

/// One decoded batch response
#[derive(Debug, Clone, Default)]
pub struct RatingResponse {
    pub entries: Vec<(ArtifactCoordinate, ArtifactRatingResponse)>,
    /// The undecoded document, retained for reporting
    pub raw: serde_json::Map<String, serde_json::Value>,
}

impl RatingResponse {
    pub fn has_pending(&self) -> bool {
        self.entries.iter().any(|(_, entry)| entry.is_pending())
    }
}
