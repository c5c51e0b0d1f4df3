use crate::shared::Result;
use std::path::Path;

/// ManifestReader port for reading an npm `package.json`
pub trait ManifestReader {
    fn read_manifest(&self, path: &Path) -> Result<Vec<u8>>;
}
