use crate::ports::outbound::RatingService;
use crate::rating_tree::domain::{
    ArtifactCoordinate, ArtifactRatingResponse, Rating, RatingMap, RatingOutcome,
};
use crate::rating_tree::policies::RatingPolicy;
use crate::rating_tree::services::RatingResponseParser;
use crate::shared::error::RatingError;
use crate::shared::Result;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::thread;
use std::time::Duration;

/// Multiplier applied to the poll interval between two attempts
const POLL_INTERVAL_MULTIPLIER: u32 = 30;

/// Largest poll interval whose wait still fits in a [`Duration`]
pub const MAX_POLL_INTERVAL_SECS: u64 = u64::MAX / POLL_INTERVAL_MULTIPLIER as u64;

/// Retry budget for ratings the service is still computing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrySettings {
    /// Extra attempts after the first one
    pub retry_count: u32,
    /// Base wait between attempts; the actual sleep is thirty times this
    pub poll_interval: Duration,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            retry_count: 3,
            poll_interval: Duration::from_secs(1),
        }
    }
}

impl RetrySettings {
    /// Settings for a poll interval given in whole seconds
    ///
    /// Rejects a zero interval and one whose wait would overflow.
    pub fn from_poll_secs(retry_count: u32, poll_interval_secs: u64) -> Result<Self> {
        if !(1..=MAX_POLL_INTERVAL_SECS).contains(&poll_interval_secs) {
            return Err(RatingError::InvalidConfig {
                message: format!(
                    "poll_interval must be between 1 and {} seconds, got {}",
                    MAX_POLL_INTERVAL_SECS, poll_interval_secs
                ),
            }
            .into());
        }
        Ok(Self {
            retry_count,
            poll_interval: Duration::from_secs(poll_interval_secs),
        })
    }

    fn max_attempts(&self) -> usize {
        self.retry_count as usize + 1
    }

    fn wait(&self) -> Duration {
        self.poll_interval
            .checked_mul(POLL_INTERVAL_MULTIPLIER)
            .unwrap_or(Duration::MAX)
    }
}

/// RatingClient resolves a rating for every requested coordinate
///
/// Each attempt sends the whole coordinate list in one request. While some
/// artifacts are still being computed the client waits and asks again, up
/// to the retry budget. Transport errors abort immediately.
///
/// # Type Parameters
/// * `S` - RatingService implementation
pub struct RatingClient<S: RatingService> {
    service: S,
    policy: RatingPolicy,
    retry: RetrySettings,
    last_raw_response: Option<Map<String, Value>>,
    model_definition_ids: BTreeSet<String>,
}

impl<S: RatingService> RatingClient<S> {
    pub fn new(service: S, policy: RatingPolicy, retry: RetrySettings) -> Self {
        Self {
            service,
            policy,
            retry,
            last_raw_response: None,
            model_definition_ids: BTreeSet::new(),
        }
    }

    /// Resolves ratings for the given coordinates
    ///
    /// # Returns
    /// A rating for every requested coordinate (UNKNOWN when the service had
    /// none), the aggregate policy violation flag, and the coordinates that
    /// were still pending when the retry budget ran out
    ///
    /// # Errors
    /// Returns an error on transport failure or an undecodable response
    pub fn resolve(&mut self, coordinates: &[ArtifactCoordinate]) -> Result<RatingOutcome> {
        if coordinates.is_empty() {
            return Ok(RatingOutcome::default());
        }

        let max_attempts = self.retry.max_attempts();
        let mut attempt = 0;
        loop {
            attempt += 1;
            tracing::debug!(
                attempt,
                max_attempts,
                artifacts = coordinates.len(),
                "Requesting ratings"
            );

            let body = self.service.query_ratings(coordinates)?;
            let mut outcome = self.evaluate_response(body.as_bytes(), coordinates)?;
            outcome.attempts = attempt;

            if outcome.pending.is_empty() {
                return Ok(outcome);
            }
            if attempt >= max_attempts {
                tracing::warn!(
                    pending = outcome.pending.len(),
                    attempts = attempt,
                    "Ratings still being computed after the last attempt"
                );
                return Ok(outcome);
            }

            tracing::info!(
                attempt,
                pending = outcome.pending.len(),
                wait_secs = self.retry.wait().as_secs(),
                "Ratings still being computed, retrying"
            );
            thread::sleep(self.retry.wait());
        }
    }

    /// The undecoded body of the most recent response
    pub fn last_raw_response(&self) -> Option<&Map<String, Value>> {
        self.last_raw_response.as_ref()
    }

    /// Distinct model rating definition ids referenced by the last response
    pub fn model_definition_ids(&self) -> &BTreeSet<String> {
        &self.model_definition_ids
    }

    fn evaluate_response(
        &mut self,
        body: &[u8],
        requested: &[ArtifactCoordinate],
    ) -> Result<RatingOutcome> {
        let response = RatingResponseParser::parse(body)?;

        let mut ratings = RatingMap::new();
        let mut pending = BTreeSet::new();
        let mut definition_ids = BTreeSet::new();
        let mut violation = false;

        for (coordinate, entry) in response.entries {
            match entry {
                ArtifactRatingResponse::Pending => {
                    tracing::debug!(artifact = %coordinate, status = "REQUESTED", "Rating pending");
                    pending.insert(coordinate.clone());
                    ratings.insert(coordinate, Rating::unknown());
                }
                ArtifactRatingResponse::Calculated(rating) => {
                    if let Some(id) = rating.model_definition_id() {
                        definition_ids.insert(id.to_string());
                    }
                    let decision = self.policy.evaluate(&coordinate, &rating);
                    for reason in &decision.reasons {
                        tracing::warn!(artifact = %coordinate, "{}", reason);
                    }
                    violation |= decision.is_violation();
                    tracing::debug!(
                        artifact = %coordinate,
                        label = rating.label.map(|l| l.as_str()).unwrap_or(""),
                        value = rating.value,
                        "Rating calculated"
                    );
                    ratings.insert(coordinate, rating);
                }
                ArtifactRatingResponse::Unknown => {
                    tracing::debug!(artifact = %coordinate, "No rating available");
                    ratings.insert(coordinate, Rating::unknown());
                }
            }
        }
        ratings.fill_unknown(requested);

        self.last_raw_response = Some(response.raw);
        self.model_definition_ids = definition_ids;

        Ok(RatingOutcome {
            ratings,
            violation,
            pending,
            attempts: 0,
        })
    }
}
