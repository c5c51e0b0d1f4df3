use crate::shared::Result;
use std::path::Path;

/// DependencyGraphReader port for reading the build tool's graph document
pub trait DependencyGraphReader {
    /// Reads the raw dependency graph produced by the build plugin
    ///
    /// # Arguments
    /// * `path` - Path to the graph JSON file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist
    /// - The file cannot be read or exceeds the size limit
    fn read_dependency_graph(&self, path: &Path) -> Result<Vec<u8>>;
}
