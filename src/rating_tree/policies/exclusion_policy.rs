use crate::rating_tree::domain::{ArtifactCoordinate, RatingMap};
use std::collections::BTreeSet;

/// Namespace prefixes treated as internal when no prefixes are configured
pub const DEFAULT_INTERNAL_PREFIXES: [&str; 2] = ["com.sap", "@sap"];

/// ExclusionPolicy decides whether a tree node is excluded from compliance
///
/// A node is excluded when any of these hold:
/// - its coordinate is on the exclusion list
/// - internal exclusion is on, the node has no rating label, and the
///   coordinate starts with an internal prefix
/// - test/dev exclusion is on and the node was introduced as a test/dev
///   dependency
#[derive(Debug, Clone)]
pub struct ExclusionPolicy {
    excluded_libraries: BTreeSet<ArtifactCoordinate>,
    exclude_internal: bool,
    internal_prefixes: Vec<String>,
    exclude_test_dev: bool,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self {
            excluded_libraries: BTreeSet::new(),
            exclude_internal: false,
            internal_prefixes: DEFAULT_INTERNAL_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            exclude_test_dev: false,
        }
    }
}

impl ExclusionPolicy {
    pub fn new<S: AsRef<str>>(excluded_libraries: &[S]) -> Self {
        Self {
            excluded_libraries: excluded_libraries
                .iter()
                .map(|entry| ArtifactCoordinate::parse(entry.as_ref()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_internal_exclusion(mut self, enabled: bool) -> Self {
        self.exclude_internal = enabled;
        self
    }

    /// Replaces the internal prefixes; an empty list keeps the defaults
    pub fn with_internal_prefixes(mut self, prefixes: Vec<String>) -> Self {
        if !prefixes.is_empty() {
            self.internal_prefixes = prefixes;
        }
        self
    }

    pub fn with_test_dev_exclusion(mut self, enabled: bool) -> Self {
        self.exclude_test_dev = enabled;
        self
    }

    pub fn excludes_test_dev(&self) -> bool {
        self.exclude_test_dev
    }

    /// Evaluates exclusion for a node being created
    ///
    /// # Arguments
    /// * `coordinate` - Coordinate of the node
    /// * `ratings` - Ratings known for this run
    /// * `is_test_dev` - Whether the node is introduced as a test/dev dependency
    pub fn is_excluded(
        &self,
        coordinate: &ArtifactCoordinate,
        ratings: &RatingMap,
        is_test_dev: bool,
    ) -> bool {
        if self.excluded_libraries.contains(coordinate) {
            return true;
        }
        if self.exclude_internal
            && ratings.label_of(coordinate).is_none()
            && coordinate.has_prefix_in(&self.internal_prefixes)
        {
            return true;
        }
        self.exclude_test_dev && is_test_dev
    }
}
