use crate::application::services::{ResolutionMode, RetrySettings};
use crate::rating_tree::domain::ArtifactCoordinate;
use crate::rating_tree::policies::{ExclusionPolicy, RatingPolicy};
use std::path::PathBuf;

/// Where the dependency information comes from
#[derive(Debug, Clone, PartialEq)]
pub enum DependencySource {
    /// JSON graph from the depgraph build plugin, rooted at `root`
    Graph {
        path: PathBuf,
        root: ArtifactCoordinate,
    },
    /// Flat npm `package.json`; the package name becomes the root
    NpmManifest { path: PathBuf },
}

impl DependencySource {
    pub fn path(&self) -> &PathBuf {
        match self {
            DependencySource::Graph { path, .. } => path,
            DependencySource::NpmManifest { path } => path,
        }
    }
}

/// RatingTreeRequest - Request DTO for the rating tree use case
#[derive(Debug, Clone)]
pub struct RatingTreeRequest {
    pub source: DependencySource,
    /// Build descriptor path recorded in the report, relative to the project
    pub descriptor_path: String,
    /// Whether transitive artifacts are submitted for rating as well
    pub include_transitive: bool,
    pub rating_policy: RatingPolicy,
    pub exclusion_policy: ExclusionPolicy,
    pub retry: RetrySettings,
    pub resolution_mode: ResolutionMode,
}

impl RatingTreeRequest {
    /// Creates a request with default policies, retry budget and resolution mode
    pub fn new(source: DependencySource, descriptor_path: impl Into<String>) -> Self {
        Self {
            source,
            descriptor_path: descriptor_path.into(),
            include_transitive: false,
            rating_policy: RatingPolicy::default(),
            exclusion_policy: ExclusionPolicy::default(),
            retry: RetrySettings::default(),
            resolution_mode: ResolutionMode::default(),
        }
    }
}
