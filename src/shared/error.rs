use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// CI systems rely on these to tell a rating violation apart from a
/// broken pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// All ratings passed the configured thresholds
    Success = 0,
    /// At least one rating violated the configured thresholds
    RatingViolation = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (rating service, parse failure, file I/O, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::RatingViolation => write!(f, "Rating Violation (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised by the dependency-graph-to-rating pipeline.
///
/// Only the variants here are surfaced to callers; an artifact whose rating
/// is still being computed after the retry budget is exhausted is reported
/// through the rating outcome, not as an error.
#[derive(Debug, Error)]
pub enum RatingError {
    #[error("Dependency graph file not found: {path}\n\n💡 Hint: {suggestion}")]
    GraphFileNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse dependency graph: {details}\n\n💡 Hint: Expected the JSON produced by the depgraph build plugin ({{\"artifacts\": [...], \"dependencies\": [...]}})")]
    GraphParse { details: String },

    #[error("Failed to parse npm manifest: {details}\n\n💡 Hint: Please verify that package.json is valid JSON with 'name' and 'version' fields")]
    ManifestParse { details: String },

    #[error("Failed to decode rating service response: {details}")]
    ResponseParse { details: String },

    #[error("Rating service request failed: {url}\nDetails: {details}")]
    Transport { url: String, details: String },

    #[error("Failed to resolve model rating definition '{id}': {details}")]
    DefinitionFetch { id: String, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}
