use depgraph_rating::prelude::*;
use depgraph_rating::rating_tree::domain::ModelRatingDefinition;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Mock RatingService replaying scripted batch responses
///
/// The n-th rating request receives the n-th body; once the script runs out
/// the last body is repeated.
#[derive(Default, Clone)]
pub struct MockRatingService {
    bodies: Vec<String>,
    failing_definitions: HashSet<String>,
    should_fail: bool,
    pub rating_requests: Arc<Mutex<Vec<Vec<String>>>>,
    pub definition_requests: Arc<Mutex<Vec<String>>>,
}

impl MockRatingService {
    pub fn new(body: &str) -> Self {
        Self::scripted(&[body])
    }

    pub fn scripted(bodies: &[&str]) -> Self {
        Self {
            bodies: bodies.iter().map(|b| b.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn with_failing_definition(mut self, id: &str) -> Self {
        self.failing_definitions.insert(id.to_string());
        self
    }

    pub fn rating_call_count(&self) -> usize {
        self.rating_requests.lock().unwrap().len()
    }

    pub fn requested_coordinates(&self) -> Vec<String> {
        self.rating_requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_default()
    }

    pub fn definition_calls(&self) -> Vec<String> {
        self.definition_requests.lock().unwrap().clone()
    }
}

impl RatingService for MockRatingService {
    fn query_ratings(&self, coordinates: &[ArtifactCoordinate]) -> Result<String> {
        let mut requests = self.rating_requests.lock().unwrap();
        requests.push(coordinates.iter().map(|c| c.to_string()).collect());
        if self.should_fail {
            anyhow::bail!("Mock rating service failure");
        }
        let index = (requests.len() - 1).min(self.bodies.len().saturating_sub(1));
        Ok(self.bodies.get(index).cloned().unwrap_or_else(|| "{}".to_string()))
    }

    fn fetch_model_definition(&self, id: &str) -> Result<ModelRatingDefinition> {
        self.definition_requests.lock().unwrap().push(id.to_string());
        if self.failing_definitions.contains(id) {
            anyhow::bail!("definition service returned status code 404");
        }
        Ok(ModelRatingDefinition {
            uuid: id.to_string(),
            name: format!("Definition {}", id),
            details: format!("Rating model {} weighs security and maintenance", id),
            model_function_version: "1".to_string(),
        })
    }
}
