use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use std::str::FromStr;

use crate::application::services::MAX_POLL_INTERVAL_SECS;
use crate::rating_tree::policies::LabelThreshold;

/// `--label-threshold` value; a blank value disables the label threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelThresholdArg(pub Option<LabelThreshold>);

impl FromStr for LabelThresholdArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self(None));
        }
        s.parse().map(|threshold| Self(Some(threshold)))
    }
}

/// Correlate a build tool's dependency graph with open-source quality ratings
#[derive(Parser, Debug)]
#[command(name = "depgraph-rating")]
#[command(version)]
#[command(
    about = "Rate the dependencies of a build and fail on ratings below the configured thresholds",
    long_about = None
)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["graph", "npm_manifest"])
))]
pub struct Args {
    /// Dependency graph JSON written by the depgraph build plugin
    #[arg(short, long, value_name = "FILE", requires = "root")]
    pub graph: Option<PathBuf>,

    /// Coordinate of the root artifact ("group:artifact" or "group/artifact")
    #[arg(short, long, value_name = "COORDINATE")]
    pub root: Option<String>,

    /// npm package.json to rate instead of a dependency graph
    #[arg(long, value_name = "FILE")]
    pub npm_manifest: Option<PathBuf>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Config file (defaults to depgraph-rating.config.yml in the working directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base URL of the rating service
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Rating namespace
    #[arg(long)]
    pub namespace: Option<String>,

    /// Rating name within the namespace
    #[arg(long)]
    pub name: Option<String>,

    /// Suffix appended to the client name sent to the rating service
    #[arg(long, value_name = "SUFFIX")]
    pub client_suffix: Option<String>,

    /// Fail when a rating label is at or below this label: BAD or MODERATE
    #[arg(long, value_name = "LABEL")]
    pub label_threshold: Option<LabelThresholdArg>,

    /// Fail when a rating value is below this score
    #[arg(long, value_name = "SCORE")]
    pub value_threshold: Option<f64>,

    /// Exclude libraries from the compliance check
    /// Can be specified multiple times: -e "org.slf4j:slf4j-api" -e "org.yaml/snakeyaml"
    #[arg(short, long = "exclude", value_name = "COORDINATE")]
    pub exclude: Vec<String>,

    /// Fail when a rating is labelled UNCLEAR
    #[arg(long)]
    pub fail_on_unclear: bool,

    /// Extra attempts while ratings are still being computed
    #[arg(long, value_name = "COUNT")]
    pub retry_count: Option<u32>,

    /// Poll interval in seconds; the wait between attempts is thirty times this
    #[arg(
        long,
        value_name = "SECONDS",
        value_parser = clap::value_parser!(u64).range(1..=MAX_POLL_INTERVAL_SECS)
    )]
    pub poll_interval: Option<u64>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Exclude unrated internal artifacts from the compliance check
    #[arg(long)]
    pub exclude_internal: bool,

    /// Exclude test-scoped and dev dependencies from the compliance check
    #[arg(long)]
    pub exclude_test_dev: bool,

    /// Rate transitive dependencies as well as direct ones
    #[arg(long)]
    pub include_transitive: bool,

    /// Keep going when a rating definition cannot be resolved
    #[arg(long)]
    pub collect_definition_errors: bool,

    /// Build descriptor path recorded in the report
    #[arg(long, value_name = "PATH")]
    pub descriptor_path: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
