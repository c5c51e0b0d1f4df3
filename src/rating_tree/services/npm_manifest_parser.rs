use crate::rating_tree::domain::ArtifactCoordinate;
use crate::shared::error::RatingError;
use crate::shared::Result;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawManifest {
    name: Option<String>,
    #[serde(default)]
    version: String,
    #[serde(default)]
    dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    dev_dependencies: BTreeMap<String, serde_json::Value>,
}

/// Dependency information extracted from a `package.json`
#[derive(Debug, Clone, PartialEq)]
pub struct NpmManifest {
    pub name: String,
    pub version: String,
    pub dependencies: Vec<ArtifactCoordinate>,
    pub dev_dependencies: BTreeSet<ArtifactCoordinate>,
}

impl NpmManifest {
    /// Runtime dependencies followed by dev dependencies, without duplicates
    pub fn artifacts(&self) -> Vec<ArtifactCoordinate> {
        let mut seen = BTreeSet::new();
        self.dependencies
            .iter()
            .chain(self.dev_dependencies.iter())
            .filter(|coordinate| seen.insert(*coordinate))
            .cloned()
            .collect()
    }

    pub fn root(&self) -> ArtifactCoordinate {
        ArtifactCoordinate::parse(&self.name)
    }
}

/// NpmManifestParser reads the flat dependency lists of an npm project
pub struct NpmManifestParser;

impl NpmManifestParser {
    pub fn parse(content: &[u8]) -> Result<NpmManifest> {
        let raw: RawManifest =
            serde_json::from_slice(content).map_err(|e| RatingError::ManifestParse {
                details: e.to_string(),
            })?;

        let name = raw
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| RatingError::ManifestParse {
                details: "missing 'name' field".to_string(),
            })?;

        for (artifact, version) in raw.dependencies.iter().chain(raw.dev_dependencies.iter()) {
            tracing::debug!(artifact = %artifact, version = %version, "Found npm dependency");
        }

        Ok(NpmManifest {
            name,
            version: raw.version,
            dependencies: raw
                .dependencies
                .keys()
                .map(|artifact| ArtifactCoordinate::parse(artifact))
                .collect(),
            dev_dependencies: raw
                .dev_dependencies
                .keys()
                .map(|artifact| ArtifactCoordinate::parse(artifact))
                .collect(),
        })
    }
}
