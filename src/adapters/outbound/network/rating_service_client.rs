use crate::ports::outbound::RatingService;
use crate::rating_tree::domain::{ArtifactCoordinate, ModelRatingDefinition};
use crate::shared::error::RatingError;
use crate::shared::Result;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::ACCEPT;
use std::fmt;
use std::time::Duration;

/// Header identifying the calling client to the rating service
pub const CLIENT_HEADER: &str = "X-Fosstars-Client";

/// Default client name sent in [`CLIENT_HEADER`]
pub const DEFAULT_CLIENT_NAME: &str = "depgraph-rating";

/// Default transport timeout for a single request
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// Identifier scheme under which coordinates are submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierType {
    Maven,
    Npm,
}

impl IdentifierType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierType::Maven => "maven",
            IdentifierType::Npm => "npm",
        }
    }
}

impl fmt::Display for IdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection settings for [`RatingServiceClient`]
#[derive(Debug, Clone)]
pub struct RatingServiceSettings {
    pub base_url: String,
    pub namespace: String,
    pub name: String,
    pub identifier_type: IdentifierType,
    pub client_name: String,
    pub client_suffix: Option<String>,
    pub timeout: Duration,
}

impl RatingServiceSettings {
    pub fn new(
        base_url: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
        identifier_type: IdentifierType,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            namespace: namespace.into(),
            name: name.into(),
            identifier_type,
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            client_suffix: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Value of the client-identifying header: `<client-name>[-<suffix>]`
    pub fn client_header_value(&self) -> String {
        match self.client_suffix.as_deref().filter(|s| !s.is_empty()) {
            Some(suffix) => format!("{}-{}", self.client_name, suffix),
            None => self.client_name.clone(),
        }
    }

    pub fn ratings_url(&self) -> String {
        format!(
            "{}/v2/ratings/namespaces/{}/names/{}/identifiertypes/{}/identifiers",
            self.base(),
            urlencoding::encode(&self.namespace),
            urlencoding::encode(&self.name),
            self.identifier_type
        )
    }

    pub fn definition_url(&self, id: &str) -> String {
        format!(
            "{}/v2/ratings/definitions/{}",
            self.base(),
            urlencoding::encode(id)
        )
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// RatingServiceClient adapter for the remote rating service
///
/// Blocking HTTP client; each call is a single request with the configured
/// timeout. Retrying pending ratings is the caller's concern.
pub struct RatingServiceClient {
    client: Client,
    settings: RatingServiceSettings,
}

impl RatingServiceClient {
    pub fn new(settings: RatingServiceSettings) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("depgraph-rating/{}", version);
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &RatingServiceSettings {
        &self.settings
    }

    fn send(&self, url: &str, request: RequestBuilder) -> Result<String> {
        let transport_error = |details: String| RatingError::Transport {
            url: url.to_string(),
            details,
        };

        let response = request
            .header(ACCEPT, "application/json")
            .header(CLIENT_HEADER, self.settings.client_header_value())
            .send()
            .map_err(|e| transport_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(transport_error(format!(
                "rating service returned status code {}",
                status
            ))
            .into());
        }

        Ok(response
            .text()
            .map_err(|e| transport_error(e.to_string()))?)
    }
}

impl RatingService for RatingServiceClient {
    fn query_ratings(&self, coordinates: &[ArtifactCoordinate]) -> Result<String> {
        let url = self.settings.ratings_url();
        tracing::debug!(url = %url, artifacts = coordinates.len(), "POST rating request");

        let request = self.client.post(&url).json(coordinates);
        self.send(&url, request)
    }

    fn fetch_model_definition(&self, id: &str) -> Result<ModelRatingDefinition> {
        let url = self.settings.definition_url(id);
        tracing::debug!(url = %url, "GET model rating definition");

        let body = self.send(&url, self.client.get(&url))?;
        let definition = serde_json::from_str(&body).map_err(|e| RatingError::ResponseParse {
            details: format!("model rating definition '{}': {}", id, e),
        })?;
        Ok(definition)
    }
}
