//! depgraph-rating - rate the dependencies of a build against an
//! open-source quality rating service
//!
//! This library turns a build tool's dependency graph (or an npm
//! `package.json`) into a canonical, deduplicated tree annotated with the
//! ratings of every artifact, and decides whether those ratings break the
//! configured compliance thresholds. It follows hexagonal architecture and
//! Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`rating_tree`): Tree building, parsing and policies
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use depgraph_rating::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! // Create adapters
//! let settings = RatingServiceSettings::new(
//!     "https://ratings.example.com",
//!     "oss",
//!     "security",
//!     IdentifierType::Maven,
//! );
//! let use_case = GenerateRatingTreeUseCase::new(
//!     FileSystemReader::new(),
//!     FileSystemReader::new(),
//!     RatingServiceClient::new(settings)?,
//!     StderrProgressReporter::new(),
//! );
//!
//! // Execute
//! let source = DependencySource::Graph {
//!     path: PathBuf::from("target/dependency-graph.json"),
//!     root: ArtifactCoordinate::parse("com.acme:app"),
//! };
//! let response = use_case.execute(RatingTreeRequest::new(source, "pom.xml"))?;
//!
//! println!("{}", serde_json::to_string_pretty(&response.report())?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod ports;
pub mod rating_tree;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::network::{
        IdentifierType, RatingServiceClient, RatingServiceSettings,
    };
    pub use crate::application::dto::{DependencySource, RatingTreeRequest, RatingTreeResponse};
    pub use crate::application::services::{ResolutionMode, RetrySettings};
    pub use crate::application::use_cases::GenerateRatingTreeUseCase;
    pub use crate::ports::outbound::{
        DependencyGraphReader, ManifestReader, OutputPresenter, ProgressReporter, RatingService,
    };
    pub use crate::rating_tree::domain::{
        ArtifactCoordinate, DependencyTree, DependencyTreeNode, Rating, RatingLabel, RatingMap,
        RatingOutcome,
    };
    pub use crate::rating_tree::policies::{ExclusionPolicy, LabelThreshold, RatingPolicy};
    pub use crate::rating_tree::services::{GraphParser, TreeBuilder};
    pub use crate::shared::Result;
}
