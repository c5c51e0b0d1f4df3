use depgraph_rating::prelude::*;
use std::path::Path;

/// Mock DependencyGraphReader returning a fixed document
pub struct MockGraphReader {
    pub content: String,
    pub should_fail: bool,
}

impl MockGraphReader {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            content: String::new(),
            should_fail: true,
        }
    }
}

impl DependencyGraphReader for MockGraphReader {
    fn read_dependency_graph(&self, _path: &Path) -> Result<Vec<u8>> {
        if self.should_fail {
            anyhow::bail!("Mock dependency graph read failure");
        }
        Ok(self.content.clone().into_bytes())
    }
}

/// Mock ManifestReader returning a fixed `package.json`
pub struct MockManifestReader {
    pub content: String,
}

impl MockManifestReader {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    /// Reader for runs that never touch a manifest
    pub fn unused() -> Self {
        Self::new("")
    }
}

impl ManifestReader for MockManifestReader {
    fn read_manifest(&self, _path: &Path) -> Result<Vec<u8>> {
        Ok(self.content.clone().into_bytes())
    }
}
