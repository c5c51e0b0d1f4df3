use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of an input document (dependency graph, manifest, config).
/// Graphs of very large multi-module builds stay well below this.
pub const MAX_INPUT_SIZE: u64 = 100 * 1024 * 1024;

/// Validates that a path is a regular file and not a symbolic link
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
///
/// # Errors
/// Returns an error if the metadata cannot be read, the path is a symbolic
/// link, or the path is not a regular file
pub fn validate_regular_file(path: &Path, description: &str) -> Result<u64> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!("Failed to read {} metadata: {}", description, e)
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(metadata.len())
}

/// Validates that an input file does not exceed `max_size` bytes
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Reads an input document after the regular-file and size checks pass
pub fn read_guarded(path: &Path, description: &str) -> Result<Vec<u8>> {
    let size = validate_regular_file(path, description)?;
    validate_file_size(size, path, MAX_INPUT_SIZE)?;
    fs::read(path).map_err(|e| anyhow::anyhow!("Failed to read {}: {}", description, e))
}
