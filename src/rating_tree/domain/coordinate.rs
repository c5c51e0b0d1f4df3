use serde::{Serialize, Serializer};
use std::fmt;

/// Type segment emitted by the maven depgraph plugin for jar artifacts
const JAR_TYPE: &str = "jar";

/// Position of the type segment in `group:artifact:type[:...]`
const TYPE_SEGMENT_INDEX: usize = 2;

/// Trailing segment left behind by pom-packaged (aggregator) modules
const POM_SEGMENT_SUFFIX: &str = "/pom";

/// NewType wrapper for a normalized "group/artifact" key
///
/// Coordinates coming from different ecosystems are folded into one shape so
/// that graph identifiers, rating-service keys and exclusion-list entries can
/// be compared with plain, case-sensitive string equality:
///
/// - `org.slf4j:slf4j-api:jar` becomes `org.slf4j/slf4j-api`
/// - `com.acme:parent:pom` becomes `com.acme/parent`
/// - `@scope/pkg` (npm) is left untouched
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactCoordinate(String);

impl ArtifactCoordinate {
    /// Normalizes a raw identifier into a coordinate
    ///
    /// Normalization is idempotent: parsing an already normalized value
    /// returns an equal coordinate.
    pub fn parse(raw: &str) -> Self {
        let slashed = raw
            .trim()
            .split(':')
            .enumerate()
            .filter(|(index, segment)| !(*index == TYPE_SEGMENT_INDEX && *segment == JAR_TYPE))
            .map(|(_, segment)| segment)
            .collect::<Vec<_>>()
            .join("/");
        let trimmed = slashed
            .strip_suffix(POM_SEGMENT_SUFFIX)
            .unwrap_or(&slashed)
            .to_string();
        Self(trimmed)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the coordinate lives under one of the given namespace prefixes
    pub fn has_prefix_in<S: AsRef<str>>(&self, prefixes: &[S]) -> bool {
        prefixes
            .iter()
            .any(|prefix| self.0.starts_with(prefix.as_ref()))
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ArtifactCoordinate {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl Serialize for ArtifactCoordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_jar_type() {
        let coordinate = ArtifactCoordinate::parse("com.fasterxml.jackson.core:jackson-databind:jar");
        assert_eq!(coordinate.as_str(), "com.fasterxml.jackson.core/jackson-databind");
    }

    #[test]
    fn test_parse_keeps_jar_inside_names() {
        assert_eq!(
            ArtifactCoordinate::parse("org.pantsbuild:jarjar:jar").as_str(),
            "org.pantsbuild/jarjar"
        );
        assert_eq!(
            ArtifactCoordinate::parse("com.example.jar:plugin:jar").as_str(),
            "com.example.jar/plugin"
        );
        assert_eq!(
            ArtifactCoordinate::parse("org.example:shade:jar:tests").as_str(),
            "org.example/shade/tests"
        );
    }

    #[test]
    fn test_parse_trims_pom_segment() {
        let coordinate = ArtifactCoordinate::parse("com.sap.test:test-common:pom");
        assert_eq!(coordinate.as_str(), "com.sap.test/test-common");
    }

    #[test]
    fn test_parse_keeps_npm_scope() {
        assert_eq!(ArtifactCoordinate::parse("@sap/cds").as_str(), "@sap/cds");
        assert_eq!(ArtifactCoordinate::parse("axios").as_str(), "axios");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let once = ArtifactCoordinate::parse("org.yaml:snakeyaml:jar");
        let twice = ArtifactCoordinate::parse(once.as_str());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_equality_is_case_sensitive() {
        assert_ne!(
            ArtifactCoordinate::parse("org.Example/lib"),
            ArtifactCoordinate::parse("org.example/lib")
        );
    }

    #[test]
    fn test_has_prefix_in() {
        let coordinate = ArtifactCoordinate::parse("com.sap.cloud:connectivity");
        assert!(coordinate.has_prefix_in(&["com.sap", "@sap"]));
        assert!(!coordinate.has_prefix_in(&["org.apache"]));
        assert!(!coordinate.has_prefix_in::<&str>(&[]));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let coordinate = ArtifactCoordinate::parse("org.slf4j:slf4j-api");
        assert_eq!(
            serde_json::to_string(&coordinate).unwrap(),
            "\"org.slf4j/slf4j-api\""
        );
    }
}
