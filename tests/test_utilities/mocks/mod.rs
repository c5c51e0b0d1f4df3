/// Mock implementations for testing
mod mock_dependency_reader;
mod mock_progress_reporter;
mod mock_rating_service;

pub use mock_dependency_reader::{MockGraphReader, MockManifestReader};
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_rating_service::MockRatingService;
