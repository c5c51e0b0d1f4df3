use crate::rating_tree::domain::{
    ArtifactCoordinate, DefinitionResolution, DependencyTree, RatingMap, RatingOutcome,
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// RatingTreeResponse - Response DTO from the rating tree use case
#[derive(Debug, Clone)]
pub struct RatingTreeResponse {
    pub tree: DependencyTree,
    pub outcome: RatingOutcome,
    pub definitions: DefinitionResolution,
    /// Undecoded body of the last rating response
    pub raw_response: Option<Map<String, Value>>,
    pub descriptor_path: String,
    /// RFC 3339 timestamp of report generation
    pub generated_at: String,
}

impl RatingTreeResponse {
    pub fn has_violation(&self) -> bool {
        self.outcome.violation
    }

    pub fn is_complete(&self) -> bool {
        self.outcome.is_complete()
    }

    /// Serializable report view of this response
    pub fn report(&self) -> RatingTreeReport<'_> {
        RatingTreeReport {
            file_path: &self.descriptor_path,
            generated_at: &self.generated_at,
            violation: self.outcome.violation,
            incomplete: !self.outcome.is_complete(),
            pending_artifacts: &self.outcome.pending,
            ratings: &self.outcome.ratings,
            model_rating_definitions: &self.definitions.details,
            definition_errors: &self.definitions.errors,
            raw_ratings: self.raw_response.as_ref(),
            tree: &self.tree,
        }
    }
}

/// JSON report document
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingTreeReport<'a> {
    pub file_path: &'a str,
    pub generated_at: &'a str,
    pub violation: bool,
    pub incomplete: bool,
    pub pending_artifacts: &'a BTreeSet<ArtifactCoordinate>,
    pub ratings: &'a RatingMap,
    pub model_rating_definitions: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "no_errors")]
    pub definition_errors: &'a BTreeMap<String, String>,
    /// Last rating response as received, including fields the report does not model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_ratings: Option<&'a Map<String, Value>>,
    pub tree: &'a DependencyTree,
}

fn no_errors(errors: &&BTreeMap<String, String>) -> bool {
    errors.is_empty()
}
