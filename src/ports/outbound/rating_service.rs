use crate::rating_tree::domain::{ArtifactCoordinate, ModelRatingDefinition};
use crate::shared::Result;

/// RatingService port for the remote rating service
///
/// Implementations perform transport only. Decoding of the batch response
/// and the retry policy for pending ratings live in the application layer.
pub trait RatingService {
    /// Submits one batch rating request
    ///
    /// # Arguments
    /// * `coordinates` - Artifacts to rate, sent together in one request
    ///
    /// # Returns
    /// The raw response body
    ///
    /// # Errors
    /// Returns an error if the request cannot be sent or the service answers
    /// with a non-success status
    fn query_ratings(&self, coordinates: &[ArtifactCoordinate]) -> Result<String>;

    /// Fetches one model rating definition by id
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status, or an
    /// undecodable body
    fn fetch_model_definition(&self, id: &str) -> Result<ModelRatingDefinition>;
}

impl<T: RatingService + ?Sized> RatingService for &T {
    fn query_ratings(&self, coordinates: &[ArtifactCoordinate]) -> Result<String> {
        (**self).query_ratings(coordinates)
    }

    fn fetch_model_definition(&self, id: &str) -> Result<ModelRatingDefinition> {
        (**self).fetch_model_definition(id)
    }
}
