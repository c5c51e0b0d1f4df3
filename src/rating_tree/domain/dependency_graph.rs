use super::ArtifactCoordinate;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Numeric artifact id assigned by the build plugin
pub type NumericId = i64;

/// A single parent→child relation from the build tool's graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEdge {
    pub from: ArtifactCoordinate,
    pub to: ArtifactCoordinate,
    pub numeric_from: NumericId,
    pub numeric_to: NumericId,
}

/// Per-artifact metadata keyed by numeric id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactMetadata {
    pub coordinate: ArtifactCoordinate,
    pub scopes: BTreeSet<String>,
    pub version: String,
}

impl ArtifactMetadata {
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }
}

/// ParsedGraph aggregate: normalized edges plus artifact lookups
#[derive(Debug, Clone, Default)]
pub struct ParsedGraph {
    edges: Vec<DependencyEdge>,
    artifacts: HashMap<NumericId, ArtifactMetadata>,
    versions: HashMap<ArtifactCoordinate, String>,
    dev_dependencies: HashSet<NumericId>,
}

impl ParsedGraph {
    pub fn new(
        edges: Vec<DependencyEdge>,
        artifacts: HashMap<NumericId, ArtifactMetadata>,
        dev_dependencies: HashSet<NumericId>,
    ) -> Self {
        let versions = artifacts
            .values()
            .map(|meta| (meta.coordinate.clone(), meta.version.clone()))
            .collect();

        Self {
            edges,
            artifacts,
            versions,
            dev_dependencies,
        }
    }

    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    pub fn artifact(&self, numeric_id: NumericId) -> Option<&ArtifactMetadata> {
        self.artifacts.get(&numeric_id)
    }

    pub fn version_of(&self, coordinate: &ArtifactCoordinate) -> Option<&str> {
        self.versions.get(coordinate).map(String::as_str)
    }

    /// Numeric ids whose scopes include "test"
    pub fn dev_dependencies(&self) -> &HashSet<NumericId> {
        &self.dev_dependencies
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn artifact_count(&self) -> usize {
        self.artifacts.len()
    }

    /// Coordinates to submit to the rating service, without duplicates
    ///
    /// The root comes first, followed by its direct dependencies in edge
    /// order. Deeper artifacts are appended only when `include_transitive`
    /// is set.
    pub fn rating_coordinates(
        &self,
        root: &ArtifactCoordinate,
        include_transitive: bool,
    ) -> Vec<ArtifactCoordinate> {
        let mut seen: HashSet<&ArtifactCoordinate> = HashSet::new();
        let mut coordinates = Vec::new();

        seen.insert(root);
        coordinates.push(root.clone());

        for edge in self.edges.iter().filter(|e| &e.from == root) {
            if seen.insert(&edge.to) {
                coordinates.push(edge.to.clone());
            }
        }

        if include_transitive {
            for edge in &self.edges {
                for coordinate in [&edge.from, &edge.to] {
                    if seen.insert(coordinate) {
                        coordinates.push(coordinate.clone());
                    }
                }
            }
        }

        coordinates
    }
}
