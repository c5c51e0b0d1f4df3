use crate::rating_tree::domain::{
    ArtifactCoordinate, ArtifactMetadata, DependencyEdge, NumericId, ParsedGraph,
};
use crate::shared::error::RatingError;
use crate::shared::Result;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// Scope marking an artifact as a test/dev dependency
const TEST_SCOPE: &str = "test";

#[derive(Debug, Deserialize)]
struct RawGraph {
    #[serde(default)]
    artifacts: Vec<RawArtifact>,
    #[serde(default)]
    dependencies: Vec<RawDependency>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    id: String,
    #[serde(default)]
    numeric_id: NumericId,
    #[serde(default)]
    scopes: Vec<String>,
    #[serde(default, alias = "Version")]
    version: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDependency {
    from: String,
    to: String,
    #[serde(default)]
    numeric_from: NumericId,
    #[serde(default)]
    numeric_to: NumericId,
}

/// GraphParser decodes the JSON graph emitted by the depgraph build plugin
pub struct GraphParser;

impl GraphParser {
    /// Parses a dependency graph document
    ///
    /// # Arguments
    /// * `content` - Raw bytes of `{"artifacts": [...], "dependencies": [...]}`
    ///
    /// # Returns
    /// The normalized graph, or `RatingError::GraphParse` on malformed input
    pub fn parse(content: &[u8]) -> Result<ParsedGraph> {
        let raw: RawGraph =
            serde_json::from_slice(content).map_err(|e| RatingError::GraphParse {
                details: e.to_string(),
            })?;

        let mut artifacts = HashMap::with_capacity(raw.artifacts.len());
        let mut dev_dependencies = HashSet::new();
        for artifact in raw.artifacts {
            if artifact.scopes.iter().any(|scope| scope == TEST_SCOPE) {
                dev_dependencies.insert(artifact.numeric_id);
            }
            artifacts.insert(
                artifact.numeric_id,
                ArtifactMetadata {
                    coordinate: ArtifactCoordinate::parse(&artifact.id),
                    scopes: artifact.scopes.into_iter().collect(),
                    version: artifact.version,
                },
            );
        }

        let edges: Vec<DependencyEdge> = raw
            .dependencies
            .into_iter()
            .map(|dependency| DependencyEdge {
                from: ArtifactCoordinate::parse(&dependency.from),
                to: ArtifactCoordinate::parse(&dependency.to),
                numeric_from: dependency.numeric_from,
                numeric_to: dependency.numeric_to,
            })
            .collect();

        tracing::debug!(
            artifacts = artifacts.len(),
            edges = edges.len(),
            test_scoped = dev_dependencies.len(),
            "Parsed dependency graph"
        );

        Ok(ParsedGraph::new(edges, artifacts, dev_dependencies))
    }
}
