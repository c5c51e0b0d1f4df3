mod graph_parser;
mod npm_manifest_parser;
mod rating_response_parser;
mod tree_builder;

pub use graph_parser::GraphParser;
pub use npm_manifest_parser::{NpmManifest, NpmManifestParser};
pub use rating_response_parser::RatingResponseParser;
pub use tree_builder::TreeBuilder;
