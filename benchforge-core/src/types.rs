// SPDX-License-Identifier: Apache-2.0

//! Validated value types used throughout the harness.
//!
//! All values are validated at construction time and immutable afterwards.
//! Invalid input never produces a half-formed value.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Artifact coordinate in `name:version` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinate {
    name: String,
    version: String,
}

impl Coordinate {
    /// Parse a `name:version` coordinate string.
    ///
    /// Both parts must be non-empty and must not contain path separators
    /// or whitespace, since they are spliced into repository paths.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidCoordinate {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let (name, version) = value
            .split_once(':')
            .ok_or_else(|| invalid("expected name:version"))?;

        if name.is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if version.is_empty() {
            return Err(invalid("version must not be empty"));
        }
        for part in [name, version] {
            if part.contains(['/', '\\', ':']) || part.chars().any(char::is_whitespace) {
                return Err(invalid(
                    "name and version must not contain path separators or whitespace",
                ));
            }
        }

        Ok(Self {
            name: name.to_string(),
            version: version.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// File name of the packaged artifact, e.g. `jmh-core-1.37.tar` or
    /// `netty-dns-macos-4.1-osx-aarch_64.tar` with a classifier.
    pub fn artifact_file_name(&self, classifier: Option<&str>) -> String {
        match classifier {
            Some(classifier) => format!("{}-{}-{}.tar", self.name, self.version, classifier),
            None => format!("{}-{}.tar", self.name, self.version),
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.version)
    }
}

impl TryFrom<String> for Coordinate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Coordinate> for String {
    fn from(value: Coordinate) -> Self {
        value.to_string()
    }
}

/// Scope of a dependency declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyScope {
    /// Needed at compile time and on the runtime classpath.
    Compile,
    /// Annotation processing only; never packaged into the archive.
    AnnotationProcessor,
    /// Runtime classpath only.
    RuntimeOnly,
}

impl std::fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DependencyScope::Compile => write!(f, "compile"),
            DependencyScope::AnnotationProcessor => write!(f, "annotation-processor"),
            DependencyScope::RuntimeOnly => write!(f, "runtime-only"),
        }
    }
}

/// A single dependency declaration from the project configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyDeclaration {
    pub coordinate: Coordinate,
    pub scope: DependencyScope,
    /// Platform classifier, e.g. `osx-aarch_64`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
}

impl DependencyDeclaration {
    pub fn new(coordinate: Coordinate, scope: DependencyScope) -> Self {
        Self {
            coordinate,
            scope,
            classifier: None,
        }
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    pub fn artifact_file_name(&self) -> String {
        self.coordinate.artifact_file_name(self.classifier.as_deref())
    }
}

/// Fully qualified entry-point class name, e.g. `org.openjdk.jmh.Main`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryPoint(String);

impl EntryPoint {
    /// Parse a dotted class name. Every segment must be a valid identifier.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidEntryPoint {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        if value.is_empty() {
            return Err(invalid("entry point must not be empty"));
        }
        for segment in value.split('.') {
            if segment.is_empty() {
                return Err(invalid("empty segment"));
            }
            let mut chars = segment.chars();
            let first = chars.next().unwrap_or('.');
            if !(first.is_alphabetic() || first == '_' || first == '$') {
                return Err(invalid("segment must start with a letter, '_' or '$'"));
            }
            if !chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$') {
                return Err(invalid("segment contains invalid characters"));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Archive entry path of the compiled class, e.g. `org/openjdk/jmh/Main.class`.
    pub fn class_file_path(&self) -> String {
        format!("{}.class", self.0.replace('.', "/"))
    }
}

impl std::fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for EntryPoint {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EntryPoint> for String {
    fn from(value: EntryPoint) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_parse() {
        let coord = Coordinate::parse("jmh-core:1.37").unwrap();
        assert_eq!(coord.name(), "jmh-core");
        assert_eq!(coord.version(), "1.37");
        assert_eq!(coord.to_string(), "jmh-core:1.37");
    }

    #[test]
    fn test_coordinate_rejects_malformed() {
        assert!(Coordinate::parse("jmh-core").is_err());
        assert!(Coordinate::parse(":1.37").is_err());
        assert!(Coordinate::parse("jmh-core:").is_err());
        assert!(Coordinate::parse("jmh core:1.37").is_err());
        assert!(Coordinate::parse("../etc:1.0").is_err());
        assert!(Coordinate::parse("a:b:c").is_err());
    }

    #[test]
    fn test_artifact_file_name() {
        let coord = Coordinate::parse("netty-dns-macos:4.1").unwrap();
        assert_eq!(coord.artifact_file_name(None), "netty-dns-macos-4.1.tar");
        assert_eq!(
            coord.artifact_file_name(Some("osx-aarch_64")),
            "netty-dns-macos-4.1-osx-aarch_64.tar"
        );
    }

    #[test]
    fn test_entry_point_parse() {
        let ep = EntryPoint::parse("org.openjdk.jmh.Main").unwrap();
        assert_eq!(ep.as_str(), "org.openjdk.jmh.Main");
        assert_eq!(ep.class_file_path(), "org/openjdk/jmh/Main.class");
    }

    #[test]
    fn test_entry_point_rejects_malformed() {
        assert!(EntryPoint::parse("").is_err());
        assert!(EntryPoint::parse("org..Main").is_err());
        assert!(EntryPoint::parse("org.1bad.Main").is_err());
        assert!(EntryPoint::parse("org/openjdk/Main").is_err());
    }

    #[test]
    fn test_scope_serde_kebab_case() {
        let scope: DependencyScope = serde_yaml::from_str("annotation-processor").unwrap();
        assert_eq!(scope, DependencyScope::AnnotationProcessor);
        assert_eq!(scope.to_string(), "annotation-processor");
    }
}
