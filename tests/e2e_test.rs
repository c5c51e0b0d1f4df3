/// End-to-end tests for the CLI
mod test_utilities;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use test_utilities::rating_server::RatingServiceStub;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

const GRAPH: &str = r#"{
  "artifacts": [
    {"id": "com.acme:app:jar", "numericId": 1, "scopes": ["compile"], "version": "1.0.0"},
    {"id": "org.yaml:snakeyaml:jar", "numericId": 2, "scopes": ["compile"], "version": "1.33"},
    {"id": "junit:junit:jar", "numericId": 3, "scopes": ["test"], "version": "4.13.2"}
  ],
  "dependencies": [
    {"from": "com.acme:app:jar", "to": "org.yaml:snakeyaml:jar", "numericFrom": 1, "numericTo": 2},
    {"from": "com.acme:app:jar", "to": "junit:junit:jar", "numericFrom": 1, "numericTo": 3}
  ]
}"#;

const RATINGS: &str = r#"{
  "org.yaml/snakeyaml": {"metadata": {"status": "CALCULATED"},
    "ratings": [{"id": "r-yaml", "label": "BAD", "value": 2.8, "modelRatingDefinitionId": "model-1"}]},
  "junit/junit": {"metadata": {"status": "CALCULATED"},
    "ratings": [{"id": "r-junit", "label": "GOOD", "value": 8.4}]}
}"#;

fn write_graph(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("dependency-graph.json");
    fs::write(&path, GRAPH).unwrap();
    path
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("depgraph-rating")
            .arg("--help")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("--graph"))
            .stdout(predicate::str::contains("--npm-manifest"));
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("depgraph-rating")
            .arg("--version")
            .assert()
            .code(0);
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("depgraph-rating")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: --graph without --root
    #[test]
    fn test_exit_code_graph_without_root() {
        cargo_bin_cmd!("depgraph-rating")
            .args(["--graph", "dependency-graph.json"])
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid label threshold
    #[test]
    fn test_exit_code_invalid_label_threshold() {
        cargo_bin_cmd!("depgraph-rating")
            .args(["--npm-manifest", "package.json", "--label-threshold", "GOOD"])
            .assert()
            .code(2);
    }

    /// Exit code 3: Missing rating service settings
    #[test]
    fn test_exit_code_missing_base_url() {
        let dir = TempDir::new().unwrap();
        cargo_bin_cmd!("depgraph-rating")
            .current_dir(dir.path())
            .args(["--graph", "graph.json", "--root", "com.acme:app"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("base_url is required"));
    }

    /// Exit code 3: Graph file does not exist (no request is sent)
    #[test]
    fn test_exit_code_missing_graph() {
        let dir = TempDir::new().unwrap();
        cargo_bin_cmd!("depgraph-rating")
            .current_dir(dir.path())
            .args([
                "--graph",
                "missing.json",
                "--root",
                "com.acme:app",
                "--base-url",
                "http://127.0.0.1:9",
                "--namespace",
                "oss",
                "--name",
                "security",
            ])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Dependency graph file not found"));
    }

    /// Exit code 3: Malformed graph
    #[test]
    fn test_exit_code_malformed_graph() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("graph.json"), "not json").unwrap();
        cargo_bin_cmd!("depgraph-rating")
            .current_dir(dir.path())
            .args([
                "--graph",
                "graph.json",
                "--root",
                "com.acme:app",
                "--base-url",
                "http://127.0.0.1:9",
                "--namespace",
                "oss",
                "--name",
                "security",
            ])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to parse dependency graph"));
    }
}

fn run_against(server: &RatingServiceStub, dir: &Path, extra: &[&str]) -> assert_cmd::assert::Assert {
    let graph = write_graph(dir);
    let mut args = vec![
        "--graph".to_string(),
        graph.display().to_string(),
        "--root".to_string(),
        "com.acme:app".to_string(),
        "--base-url".to_string(),
        server.base_url(),
        "--namespace".to_string(),
        "oss".to_string(),
        "--name".to_string(),
        "security".to_string(),
        "--retry-count".to_string(),
        "0".to_string(),
    ];
    args.extend(extra.iter().map(|a| a.to_string()));

    cargo_bin_cmd!("depgraph-rating")
        .current_dir(dir)
        .args(&args)
        .assert()
}

#[test]
fn test_e2e_report_on_stdout() {
    let dir = TempDir::new().unwrap();
    let server = RatingServiceStub::empty();
    server.mount(
        Mock::given(method("POST"))
            .and(path(
                "/v2/ratings/namespaces/oss/names/security/identifiertypes/maven/identifiers",
            ))
            .and(header("x-fosstars-client", "depgraph-rating-ci"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(RATINGS, "application/json"))
            .expect(1),
    );
    server.mount(
        Mock::given(method("GET"))
            .and(path("/v2/ratings/definitions/model-1"))
            .and(header("x-fosstars-client", "depgraph-rating-ci"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Uuid": "model-1",
                "Name": "Security",
                "Details": "How model-1 is rated",
                "ModelFunctionVersion": "1"
            })))
            .expect(1),
    );

    let output = run_against(&server, dir.path(), &["--client-suffix", "ci"])
        .code(0)
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["filePath"], "pom.xml");
    assert_eq!(report["violation"], false);
    assert_eq!(report["tree"]["artifact"], "com.acme/app");
    assert_eq!(report["tree"]["children"]["org.yaml/snakeyaml"]["label"], "BAD");
    assert_eq!(report["tree"]["children"]["junit/junit"]["version"], "4.13.2");
    assert_eq!(report["modelRatingDefinitions"]["model-1"], "How model-1 is rated");
    assert_eq!(report["rawRatings"]["junit/junit"]["metadata"]["status"], "CALCULATED");

    server.verify();
    let requests = server.received_requests();
    let queried: Vec<String> = requests[0].body_json().unwrap();
    assert!(queried.contains(&"org.yaml/snakeyaml".to_string()));
    assert!(queried.contains(&"junit/junit".to_string()));
}

#[test]
fn test_e2e_label_threshold_violation_exit_code() {
    let dir = TempDir::new().unwrap();
    let server = RatingServiceStub::start(RATINGS);

    run_against(&server, dir.path(), &["--label-threshold", "BAD"]).code(1);
}

#[test]
fn test_e2e_excluded_library_passes() {
    let dir = TempDir::new().unwrap();
    let server = RatingServiceStub::start(RATINGS);

    run_against(
        &server,
        dir.path(),
        &["--label-threshold", "BAD", "-e", "org.yaml:snakeyaml"],
    )
    .code(0);
}

#[test]
fn test_e2e_value_threshold_violation() {
    let dir = TempDir::new().unwrap();
    let server = RatingServiceStub::start(RATINGS);

    run_against(&server, dir.path(), &["--value-threshold", "5.0"]).code(1);
}

#[test]
fn test_e2e_output_file() {
    let dir = TempDir::new().unwrap();
    let server = RatingServiceStub::start(RATINGS);
    let output_path = dir.path().join("rating-tree.json");

    run_against(
        &server,
        dir.path(),
        &[
            "--output",
            output_path.to_str().unwrap(),
            "--exclude-test-dev",
            "--descriptor-path",
            "service/pom.xml",
        ],
    )
    .code(0)
    .stdout(predicate::str::is_empty());

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(report["filePath"], "service/pom.xml");
    assert_eq!(report["tree"]["children"]["junit/junit"]["excluded"], true);
    assert_eq!(report["tree"]["children"]["org.yaml/snakeyaml"]["excluded"], false);
}

#[test]
fn test_e2e_pending_ratings_reported_incomplete() {
    let dir = TempDir::new().unwrap();
    let server =
        RatingServiceStub::start(r#"{"org.yaml/snakeyaml": {"metadata": {"status": "REQUESTED"}}}"#);

    let output = run_against(&server, dir.path(), &[])
        .code(0)
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["incomplete"], true);
    assert_eq!(report["pendingArtifacts"][0], "org.yaml/snakeyaml");
    assert_eq!(report["tree"]["children"]["org.yaml/snakeyaml"]["label"], "UNKNOWN");
    assert_eq!(server.received_requests().len(), 1);
}
