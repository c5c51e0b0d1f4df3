/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, rating service, console).
pub mod dependency_graph_reader;
pub mod manifest_reader;
pub mod output_presenter;
pub mod progress_reporter;
pub mod rating_service;

pub use dependency_graph_reader::DependencyGraphReader;
pub use manifest_reader::ManifestReader;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use rating_service::RatingService;
