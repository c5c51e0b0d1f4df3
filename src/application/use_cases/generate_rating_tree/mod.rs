use crate::application::dto::{DependencySource, RatingTreeRequest, RatingTreeResponse};
use crate::application::services::{ModelDefinitionResolver, RatingClient};
use crate::ports::outbound::{
    DependencyGraphReader, ManifestReader, ProgressReporter, RatingService,
};
use crate::rating_tree::domain::{
    ArtifactCoordinate, DefinitionResolution, DependencyTree, ParsedGraph, RatingLabel,
    RatingOutcome,
};
use crate::rating_tree::services::{GraphParser, NpmManifest, NpmManifestParser, TreeBuilder};
use crate::shared::Result;
use chrono::Utc;
use std::collections::BTreeSet;

/// Dependency information loaded for one run
enum LoadedDependencies {
    Graph {
        graph: ParsedGraph,
        root: ArtifactCoordinate,
    },
    Manifest(NpmManifest),
}

impl LoadedDependencies {
    fn rating_coordinates(&self, include_transitive: bool) -> Vec<ArtifactCoordinate> {
        match self {
            LoadedDependencies::Graph { graph, root } => {
                graph.rating_coordinates(root, include_transitive)
            }
            LoadedDependencies::Manifest(manifest) => manifest.artifacts(),
        }
    }
}

/// GenerateRatingTreeUseCase - Core use case of the crate
///
/// Reads the dependency information, rates every selected artifact, builds
/// the annotated tree and resolves the rating definitions it references.
///
/// # Type Parameters
/// * `GR` - DependencyGraphReader implementation
/// * `MR` - ManifestReader implementation
/// * `RS` - RatingService implementation
/// * `PR` - ProgressReporter implementation
pub struct GenerateRatingTreeUseCase<GR, MR, RS, PR> {
    graph_reader: GR,
    manifest_reader: MR,
    rating_service: RS,
    progress_reporter: PR,
}

impl<GR, MR, RS, PR> GenerateRatingTreeUseCase<GR, MR, RS, PR>
where
    GR: DependencyGraphReader,
    MR: ManifestReader,
    RS: RatingService,
    PR: ProgressReporter,
{
    /// Creates a new GenerateRatingTreeUseCase with injected dependencies
    pub fn new(graph_reader: GR, manifest_reader: MR, rating_service: RS, progress_reporter: PR) -> Self {
        Self {
            graph_reader,
            manifest_reader,
            rating_service,
            progress_reporter,
        }
    }

    /// Executes the rating tree use case
    ///
    /// # Returns
    /// RatingTreeResponse with the annotated tree, the rating outcome and
    /// the resolved definition texts
    ///
    /// # Errors
    /// Returns an error if the input cannot be read or parsed, the rating
    /// service fails, or (in fail-fast mode) a definition cannot be resolved
    pub fn execute(&self, request: RatingTreeRequest) -> Result<RatingTreeResponse> {
        // Step 1: Load the dependency graph or manifest
        let dependencies = self.load_dependencies(&request.source)?;

        // Step 2: Rate the selected artifacts
        let coordinates = dependencies.rating_coordinates(request.include_transitive);
        let mut client = RatingClient::new(
            &self.rating_service,
            request.rating_policy.clone(),
            request.retry,
        );
        let outcome = self.fetch_ratings(&mut client, &coordinates)?;

        // Step 3: Build the annotated tree
        let tree = self.build_tree(&dependencies, &outcome, &request);

        // Step 4: Resolve the definition texts referenced by the ratings
        let definitions = self.resolve_definitions(client.model_definition_ids(), &request)?;

        let response = RatingTreeResponse {
            tree,
            outcome,
            definitions,
            raw_response: client.last_raw_response().cloned(),
            descriptor_path: request.descriptor_path,
            generated_at: Utc::now().to_rfc3339(),
        };
        self.report_summary(&response);
        Ok(response)
    }

    fn load_dependencies(&self, source: &DependencySource) -> Result<LoadedDependencies> {
        match source {
            DependencySource::Graph { path, root } => {
                self.progress_reporter.report(&format!(
                    "📖 Loading dependency graph from: {}",
                    path.display()
                ));
                let content = self.graph_reader.read_dependency_graph(path)?;
                let graph = GraphParser::parse(&content)?;
                self.progress_reporter.report(&format!(
                    "✅ Detected {} artifact(s) and {} dependency edge(s)",
                    graph.artifact_count(),
                    graph.edge_count()
                ));
                Ok(LoadedDependencies::Graph {
                    graph,
                    root: root.clone(),
                })
            }
            DependencySource::NpmManifest { path } => {
                self.progress_reporter.report(&format!(
                    "📖 Loading npm manifest from: {}",
                    path.display()
                ));
                let content = self.manifest_reader.read_manifest(path)?;
                let manifest = NpmManifestParser::parse(&content)?;
                self.progress_reporter.report(&format!(
                    "✅ Detected {} dependency(ies), {} of them dev",
                    manifest.artifacts().len(),
                    manifest.dev_dependencies.len()
                ));
                Ok(LoadedDependencies::Manifest(manifest))
            }
        }
    }

    fn fetch_ratings(
        &self,
        client: &mut RatingClient<&RS>,
        coordinates: &[ArtifactCoordinate],
    ) -> Result<RatingOutcome> {
        self.progress_reporter.report(&format!(
            "🔍 Fetching ratings for {} artifact(s)...",
            coordinates.len()
        ));

        let outcome = client.resolve(coordinates)?;

        if !outcome.is_complete() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: {} rating(s) were still being computed after {} attempt(s) and are reported as UNKNOWN",
                outcome.pending.len(),
                outcome.attempts
            ));
        }
        Ok(outcome)
    }

    fn build_tree(
        &self,
        dependencies: &LoadedDependencies,
        outcome: &RatingOutcome,
        request: &RatingTreeRequest,
    ) -> DependencyTree {
        let builder = TreeBuilder::new(&outcome.ratings, &request.exclusion_policy);
        match dependencies {
            LoadedDependencies::Graph { graph, root } => builder.build(graph, root),
            LoadedDependencies::Manifest(manifest) => builder.build_flat(
                &manifest.root(),
                &manifest.version,
                &manifest.dev_dependencies,
            ),
        }
    }

    fn resolve_definitions(
        &self,
        ids: &BTreeSet<String>,
        request: &RatingTreeRequest,
    ) -> Result<DefinitionResolution> {
        if ids.is_empty() {
            return Ok(DefinitionResolution::default());
        }

        self.progress_reporter.report(&format!(
            "📚 Resolving {} model rating definition(s)...",
            ids.len()
        ));
        let resolver = ModelDefinitionResolver::new(&self.rating_service, request.resolution_mode);
        let resolution = resolver.resolve(ids, &self.progress_reporter)?;

        for (id, error) in &resolution.errors {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Could not resolve model rating definition '{}': {}",
                id, error
            ));
        }
        Ok(resolution)
    }

    fn report_summary(&self, response: &RatingTreeResponse) {
        let ratings = &response.outcome.ratings;
        self.progress_reporter.report_completion(&format!(
            "✅ Rated {} artifact(s): {} GOOD, {} MODERATE, {} BAD, {} UNCLEAR, {} UNKNOWN ({} excluded)",
            ratings.len(),
            ratings.count_label(RatingLabel::Good),
            ratings.count_label(RatingLabel::Moderate),
            ratings.count_label(RatingLabel::Bad),
            ratings.count_label(RatingLabel::Unclear),
            ratings.count_label(RatingLabel::Unknown),
            response.tree.excluded_count()
        ));
    }
}
