/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod rating_tree_request;
mod rating_tree_response;

pub use rating_tree_request::{DependencySource, RatingTreeRequest};
pub use rating_tree_response::{RatingTreeReport, RatingTreeResponse};
