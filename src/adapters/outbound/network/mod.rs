/// Network adapters for external API calls
mod rating_service_client;

pub use rating_service_client::{
    IdentifierType, RatingServiceClient, RatingServiceSettings, CLIENT_HEADER,
    DEFAULT_CLIENT_NAME, DEFAULT_TIMEOUT_SECS,
};
