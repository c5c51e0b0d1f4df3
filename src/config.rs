//! Configuration file support for depgraph-rating.
//!
//! Provides YAML-based configuration through `depgraph-rating.config.yml`
//! files, including data structures, file loading, and validation. Values
//! given on the command line take precedence over the file.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::application::services::MAX_POLL_INTERVAL_SECS;
use crate::rating_tree::policies::LabelThreshold;
use crate::shared::error::RatingError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "depgraph-rating.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub namespace: Option<String>,
    pub name: Option<String>,
    pub client_suffix: Option<String>,
    pub rating_label_threshold: Option<String>,
    pub rating_value_threshold: Option<f64>,
    pub excluded_libraries: Option<Vec<String>>,
    pub fail_on_unclear: Option<bool>,
    pub retry_count: Option<u32>,
    /// Seconds; the wait between attempts is thirty times this
    pub poll_interval: Option<u64>,
    /// Request timeout in seconds
    pub timeout: Option<u64>,
    pub exclude_internal: Option<bool>,
    pub internal_prefixes: Option<Vec<String>>,
    pub exclude_test_dev: Option<bool>,
    pub include_transitive: Option<bool>,
    pub collect_definition_errors: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Parsed label threshold; validation has already rejected bad values
    /// Parsed label threshold; a blank value means no threshold
    pub fn label_threshold(&self) -> Result<Option<LabelThreshold>> {
        self.rating_label_threshold
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                raw.parse::<LabelThreshold>()
                    .map_err(|message| RatingError::InvalidConfig { message }.into())
            })
            .transpose()
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);
    tracing::debug!(path = %path.display(), "Loaded config file");

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn invalid(message: String) -> anyhow::Error {
    RatingError::InvalidConfig { message }.into()
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    config.label_threshold()?;

    if let Some(threshold) = config.rating_value_threshold {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(invalid(format!(
                "rating_value_threshold must be a non-negative number, got {}",
                threshold
            )));
        }
    }

    if let Some(ref base_url) = config.base_url {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(invalid(format!(
                "base_url must start with http:// or https://, got '{}'",
                base_url
            )));
        }
    }

    match config.poll_interval {
        Some(0) => {
            return Err(invalid("poll_interval must be at least 1 second".to_string()));
        }
        Some(secs) if secs > MAX_POLL_INTERVAL_SECS => {
            return Err(invalid(format!(
                "poll_interval must be at most {} seconds, got {}",
                MAX_POLL_INTERVAL_SECS, secs
            )));
        }
        _ => {}
    }

    if let Some(ref libraries) = config.excluded_libraries {
        for (i, entry) in libraries.iter().enumerate() {
            if entry.trim().is_empty() {
                return Err(invalid(format!(
                    "excluded_libraries[{}] must not be empty",
                    i
                )));
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        tracing::warn!(field = %key, "Unknown config field will be ignored");
    }
}
