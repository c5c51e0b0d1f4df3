pub mod coordinate;
pub mod dependency_graph;
pub mod dependency_tree;
pub mod model_definition;
pub mod rating;
pub mod rating_response;

pub use coordinate::ArtifactCoordinate;
pub use dependency_graph::{ArtifactMetadata, DependencyEdge, NumericId, ParsedGraph};
pub use dependency_tree::{DependencyTree, DependencyTreeNode, NodeId};
pub use model_definition::{DefinitionResolution, ModelRatingDefinition};
pub use rating::{Rating, RatingLabel, RatingMap, RatingOutcome};
pub use rating_response::{ArtifactRatingResponse, RatingResponse};
