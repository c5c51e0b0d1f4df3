use crate::rating_tree::domain::{ArtifactCoordinate, ArtifactRatingResponse, RatingResponse};
use crate::shared::error::RatingError;
use crate::shared::Result;
use serde_json::Value;

/// RatingResponseParser decodes one batch response of the rating service
///
/// The envelope must be a JSON object keyed by artifact coordinate. A single
/// entry that cannot be decoded does not fail the batch; it is logged and
/// treated as having no rating.
pub struct RatingResponseParser;

impl RatingResponseParser {
    pub fn parse(body: &[u8]) -> Result<RatingResponse> {
        let document: Value =
            serde_json::from_slice(body).map_err(|e| RatingError::ResponseParse {
                details: e.to_string(),
            })?;

        let raw = match document {
            Value::Object(raw) => raw,
            other => {
                return Err(RatingError::ResponseParse {
                    details: format!("expected a JSON object, got {}", kind_of(&other)),
                }
                .into())
            }
        };

        let entries = raw
            .iter()
            .map(|(key, value)| {
                let coordinate = ArtifactCoordinate::parse(key);
                let entry = match serde_json::from_value::<ArtifactRatingResponse>(value.clone()) {
                    Ok(entry) => entry,
                    Err(e) => {
                        tracing::warn!(
                            artifact = %coordinate,
                            error = %e,
                            "Ignoring malformed rating entry"
                        );
                        ArtifactRatingResponse::Unknown
                    }
                };
                (coordinate, entry)
            })
            .collect();

        Ok(RatingResponse { entries, raw })
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
