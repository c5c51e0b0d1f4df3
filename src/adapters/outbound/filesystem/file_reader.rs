use crate::ports::outbound::{DependencyGraphReader, ManifestReader};
use crate::shared::error::RatingError;
use crate::shared::fs_guard;
use crate::shared::Result;
use std::path::Path;

/// FileSystemReader adapter for reading the build tool's output documents
///
/// Both the dependency graph and the npm manifest go through the same
/// guarded read: symbolic links are rejected and oversized files refused.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    fn read_document(&self, path: &Path, description: &str) -> Result<Vec<u8>> {
        fs_guard::read_guarded(path, description).map_err(|e| {
            RatingError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyGraphReader for FileSystemReader {
    fn read_dependency_graph(&self, path: &Path) -> Result<Vec<u8>> {
        if !path.exists() {
            return Err(RatingError::GraphFileNotFound {
                path: path.to_path_buf(),
                suggestion: "Run the depgraph build plugin first, or pass the graph location with --graph".to_string(),
            }
            .into());
        }

        let bytes = self.read_document(path, "dependency graph")?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read dependency graph");
        Ok(bytes)
    }
}

impl ManifestReader for FileSystemReader {
    fn read_manifest(&self, path: &Path) -> Result<Vec<u8>> {
        if !path.exists() {
            return Err(RatingError::FileReadError {
                path: path.to_path_buf(),
                details: "npm manifest does not exist".to_string(),
            }
            .into());
        }

        let bytes = self.read_document(path, "npm manifest")?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read npm manifest");
        Ok(bytes)
    }
}
