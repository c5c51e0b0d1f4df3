/// Application services coordinating domain logic with the rating service port
mod model_definition_resolver;
mod rating_client;

pub use model_definition_resolver::{ModelDefinitionResolver, ResolutionMode};
pub use rating_client::{RatingClient, RetrySettings, MAX_POLL_INTERVAL_SECS};
