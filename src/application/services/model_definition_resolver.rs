use crate::ports::outbound::{ProgressReporter, RatingService};
use crate::rating_tree::domain::DefinitionResolution;
use crate::shared::error::RatingError;
use crate::shared::Result;
use std::collections::BTreeSet;

/// How definition lookups react to a failing id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionMode {
    /// Abort on the first failing id
    #[default]
    FailFast,
    /// Resolve every id and report failures alongside the partial result
    CollectErrors,
}

/// ModelDefinitionResolver fetches the justification text for rating
/// definition ids, one request per distinct id
pub struct ModelDefinitionResolver<S: RatingService> {
    service: S,
    mode: ResolutionMode,
}

impl<S: RatingService> ModelDefinitionResolver<S> {
    pub fn new(service: S, mode: ResolutionMode) -> Self {
        Self { service, mode }
    }

    /// Resolves every id in order
    ///
    /// # Arguments
    /// * `ids` - Distinct model rating definition ids
    /// * `reporter` - Receives per-id progress
    ///
    /// # Returns
    /// Map of id to definition details; in collect-errors mode also the
    /// per-id failures
    ///
    /// # Errors
    /// In fail-fast mode, returns `RatingError::DefinitionFetch` for the
    /// first id that cannot be resolved
    pub fn resolve<PR: ProgressReporter>(
        &self,
        ids: &BTreeSet<String>,
        reporter: &PR,
    ) -> Result<DefinitionResolution> {
        let mut resolution = DefinitionResolution::default();
        let total = ids.len();

        for (index, id) in ids.iter().enumerate() {
            reporter.report_progress(index, total, Some(id.as_str()));

            match self.service.fetch_model_definition(id) {
                Ok(definition) => {
                    tracing::debug!(id = %id, name = %definition.name, "Resolved model rating definition");
                    resolution.details.insert(id.clone(), definition.details);
                }
                Err(e) => {
                    let details = format!("{:#}", e);
                    match self.mode {
                        ResolutionMode::FailFast => {
                            return Err(RatingError::DefinitionFetch {
                                id: id.clone(),
                                details,
                            }
                            .into());
                        }
                        ResolutionMode::CollectErrors => {
                            tracing::warn!(id = %id, error = %details, "Could not resolve model rating definition");
                            resolution.errors.insert(id.clone(), details);
                        }
                    }
                }
            }
        }

        if total > 0 {
            reporter.report_progress(total, total, Some("done"));
        }
        Ok(resolution)
    }
}
