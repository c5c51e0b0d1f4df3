use depgraph_rating::adapters::outbound::console::StderrProgressReporter;
use depgraph_rating::adapters::outbound::filesystem::{
    FileSystemReader, FileSystemWriter, StdoutPresenter,
};
use depgraph_rating::adapters::outbound::network::{
    IdentifierType, RatingServiceClient, RatingServiceSettings,
};
use depgraph_rating::application::dto::{DependencySource, RatingTreeRequest};
use depgraph_rating::application::services::{ResolutionMode, RetrySettings};
use depgraph_rating::application::use_cases::GenerateRatingTreeUseCase;
use depgraph_rating::cli::{Args, LabelThresholdArg};
use depgraph_rating::config::{self, ConfigFile, CONFIG_FILENAME};
use depgraph_rating::ports::outbound::OutputPresenter;
use depgraph_rating::rating_tree::domain::ArtifactCoordinate;
use depgraph_rating::rating_tree::policies::{ExclusionPolicy, RatingPolicy};
use depgraph_rating::shared::error::{ExitCode, RatingError};
use depgraph_rating::shared::Result;
use std::path::Path;
use std::process;
use std::time::Duration;

fn main() {
    let args = Args::parse_args();
    init_logging(args.verbose);

    match run(args) {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// Diagnostics go to stderr so the report on stdout stays parseable
fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: Args) -> Result<ExitCode> {
    // Load the config file, explicit path first
    let config = match args.config.as_deref() {
        Some(path) => config::load_config_from_path(path)?,
        None => config::discover_config(Path::new("."))?.unwrap_or_default(),
    };

    let request = build_request(&args, &config)?;
    let identifier_type = match request.source {
        DependencySource::Graph { .. } => IdentifierType::Maven,
        DependencySource::NpmManifest { .. } => IdentifierType::Npm,
    };
    let service_settings = build_service_settings(&args, &config, identifier_type)?;
    tracing::debug!(url = %service_settings.ratings_url(), "Rating service endpoint");

    // Create adapters (Dependency Injection)
    let graph_reader = FileSystemReader::new();
    let manifest_reader = FileSystemReader::new();
    let rating_service = RatingServiceClient::new(service_settings)?;
    let progress_reporter = StderrProgressReporter::new();

    let use_case = GenerateRatingTreeUseCase::new(
        graph_reader,
        manifest_reader,
        rating_service,
        progress_reporter,
    );

    let response = use_case.execute(request)?;

    let report = serde_json::to_string_pretty(&response.report())
        .map_err(|e| anyhow::anyhow!("Failed to serialize rating report: {}", e))?;

    let presenter: Box<dyn OutputPresenter> = match args.output {
        Some(output_path) => Box::new(FileSystemWriter::new(output_path)),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&report)?;

    if response.has_violation() {
        eprintln!("❌ Rating violations found; see the log above for the offending artifacts");
        Ok(ExitCode::RatingViolation)
    } else {
        Ok(ExitCode::Success)
    }
}

/// Merges CLI flags over config file values into the use case request
fn build_request(args: &Args, config: &ConfigFile) -> Result<RatingTreeRequest> {
    let source = match (&args.graph, &args.npm_manifest) {
        (Some(path), _) => {
            let root = args.root.as_deref().ok_or_else(|| RatingError::InvalidConfig {
                message: "--root is required together with --graph".to_string(),
            })?;
            DependencySource::Graph {
                path: path.clone(),
                root: ArtifactCoordinate::parse(root),
            }
        }
        (None, Some(path)) => DependencySource::NpmManifest { path: path.clone() },
        (None, None) => {
            return Err(RatingError::InvalidConfig {
                message: "either --graph or --npm-manifest is required".to_string(),
            }
            .into())
        }
    };

    let descriptor_path = args
        .descriptor_path
        .clone()
        .unwrap_or_else(|| default_descriptor_path(&source));

    let mut excluded_libraries = config.excluded_libraries.clone().unwrap_or_default();
    excluded_libraries.extend(args.exclude.iter().cloned());

    let label_threshold = match args.label_threshold {
        Some(LabelThresholdArg(threshold)) => threshold,
        None => config.label_threshold()?,
    };
    let value_threshold = args
        .value_threshold
        .or(config.rating_value_threshold)
        .unwrap_or(0.0);
    let fail_on_unclear = args.fail_on_unclear || config.fail_on_unclear.unwrap_or(false);

    let exclusion_policy = ExclusionPolicy::new(&excluded_libraries)
        .with_internal_exclusion(args.exclude_internal || config.exclude_internal.unwrap_or(false))
        .with_internal_prefixes(config.internal_prefixes.clone().unwrap_or_default())
        .with_test_dev_exclusion(args.exclude_test_dev || config.exclude_test_dev.unwrap_or(false));

    let defaults = RetrySettings::default();
    let retry = RetrySettings::from_poll_secs(
        args.retry_count
            .or(config.retry_count)
            .unwrap_or(defaults.retry_count),
        args.poll_interval
            .or(config.poll_interval)
            .unwrap_or(defaults.poll_interval.as_secs()),
    )?;

    let resolution_mode = if args.collect_definition_errors
        || config.collect_definition_errors.unwrap_or(false)
    {
        ResolutionMode::CollectErrors
    } else {
        ResolutionMode::FailFast
    };

    let mut request = RatingTreeRequest::new(source, descriptor_path);
    request.include_transitive =
        args.include_transitive || config.include_transitive.unwrap_or(false);
    request.rating_policy = RatingPolicy::new(
        &excluded_libraries,
        label_threshold,
        value_threshold,
        fail_on_unclear,
    );
    request.exclusion_policy = exclusion_policy;
    request.retry = retry;
    request.resolution_mode = resolution_mode;
    Ok(request)
}

fn default_descriptor_path(source: &DependencySource) -> String {
    match source {
        DependencySource::Graph { .. } => "pom.xml".to_string(),
        DependencySource::NpmManifest { path } => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "package.json".to_string()),
    }
}

fn build_service_settings(
    args: &Args,
    config: &ConfigFile,
    identifier_type: IdentifierType,
) -> Result<RatingServiceSettings> {
    let required = |cli: &Option<String>, file: &Option<String>, flag: &str, key: &str| {
        cli.clone()
            .or_else(|| file.clone())
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| RatingError::InvalidConfig {
                message: format!(
                    "{} is required (pass --{} or set '{}' in {})",
                    key, flag, key, CONFIG_FILENAME
                ),
            })
    };

    let base_url = required(&args.base_url, &config.base_url, "base-url", "base_url")?;
    let namespace = required(&args.namespace, &config.namespace, "namespace", "namespace")?;
    let name = required(&args.name, &config.name, "name", "name")?;

    let mut settings = RatingServiceSettings::new(base_url, namespace, name, identifier_type);
    settings.client_suffix = args.client_suffix.clone().or_else(|| config.client_suffix.clone());
    if let Some(timeout) = args.timeout.or(config.timeout) {
        settings.timeout = Duration::from_secs(timeout);
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    fn args(extra: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("depgraph-rating").chain(extra.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_build_request_from_graph_flags() {
        let args = args(&[
            "--graph",
            "target/graph.json",
            "--root",
            "com.acme:app",
            "--include-transitive",
            "--retry-count",
            "0",
        ]);
        let request = build_request(&args, &ConfigFile::default()).unwrap();

        assert_eq!(
            request.source,
            DependencySource::Graph {
                path: PathBuf::from("target/graph.json"),
                root: ArtifactCoordinate::parse("com.acme/app"),
            }
        );
        assert_eq!(request.descriptor_path, "pom.xml");
        assert!(request.include_transitive);
        assert_eq!(request.retry.retry_count, 0);
        assert_eq!(request.retry.poll_interval, Duration::from_secs(1));
        assert_eq!(request.resolution_mode, ResolutionMode::FailFast);
    }

    #[test]
    fn test_cli_overrides_config() {
        let args = args(&[
            "--npm-manifest",
            "web/package.json",
            "--retry-count",
            "1",
            "--collect-definition-errors",
        ]);
        let config = ConfigFile {
            retry_count: Some(7),
            poll_interval: Some(4),
            include_transitive: Some(true),
            ..ConfigFile::default()
        };
        let request = build_request(&args, &config).unwrap();

        assert_eq!(request.descriptor_path, "package.json");
        assert_eq!(request.retry.retry_count, 1);
        assert_eq!(request.retry.poll_interval, Duration::from_secs(4));
        assert!(request.include_transitive);
        assert_eq!(request.resolution_mode, ResolutionMode::CollectErrors);
    }

    #[test]
    fn test_blank_cli_label_threshold_overrides_config() {
        let args = args(&["--npm-manifest", "package.json", "--label-threshold", ""]);
        let config = ConfigFile {
            rating_label_threshold: Some("BAD".to_string()),
            ..ConfigFile::default()
        };

        let request = build_request(&args, &config).unwrap();
        assert!(request.rating_policy.label_threshold().is_none());
    }

    #[test]
    fn test_overflowing_poll_interval_rejected() {
        let args = args(&["--npm-manifest", "package.json"]);
        let config = ConfigFile {
            poll_interval: Some(u64::MAX / 10),
            ..ConfigFile::default()
        };

        let err = build_request(&args, &config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RatingError>(),
            Some(RatingError::InvalidConfig { .. })
        ));
        assert!(err.to_string().contains("poll_interval"));
    }

    #[test]
    fn test_service_settings_require_base_url() {
        let args = args(&["--npm-manifest", "package.json"]);
        let err = build_service_settings(&args, &ConfigFile::default(), IdentifierType::Npm)
            .unwrap_err();
        assert!(err.to_string().contains("base_url is required"));
    }

    #[test]
    fn test_service_settings_merge() {
        let args = args(&[
            "--npm-manifest",
            "package.json",
            "--namespace",
            "cli-ns",
            "--timeout",
            "30",
        ]);
        let config = ConfigFile {
            base_url: Some("https://ratings.example.com/".to_string()),
            namespace: Some("file-ns".to_string()),
            name: Some("security".to_string()),
            client_suffix: Some("ci".to_string()),
            ..ConfigFile::default()
        };
        let settings = build_service_settings(&args, &config, IdentifierType::Npm).unwrap();

        assert_eq!(settings.namespace, "cli-ns");
        assert_eq!(settings.name, "security");
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.client_header_value(), "depgraph-rating-ci");
        assert_eq!(
            settings.ratings_url(),
            "https://ratings.example.com/v2/ratings/namespaces/cli-ns/names/security/identifiertypes/npm/identifiers"
        );
    }
}
