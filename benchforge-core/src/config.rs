// SPDX-License-Identifier: Apache-2.0

//! YAML project configuration with strict schema validation.
//!
//! Parses `benchforge.yaml` into raw serde structs first, then validates
//! every field into checked types. Any invalid field aborts the run before
//! the task graph starts.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ForgeError, ForgeResult, ValidationError};
use crate::types::{Coordinate, DependencyDeclaration, DependencyScope, EntryPoint};

/// File name consumed from the report directory when no explicit results
/// path is supplied.
pub const RESULTS_FILE_NAME: &str = "results.json";

/// Raw archive descriptor as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
struct RawArchiveConfig {
    base_name: String,
    #[serde(default)]
    classifier: String,
    entry_point: String,
}

/// Raw dependency declaration.
#[derive(Debug, Deserialize)]
struct RawDependency {
    coordinate: String,
    scope: DependencyScope,
    #[serde(default)]
    classifier: Option<String>,
}

/// Raw root configuration file.
#[derive(Debug, Deserialize)]
struct RawConfig {
    archive: RawArchiveConfig,
    analyzer_entry_point: String,
    #[serde(default = "default_launcher")]
    launcher: String,
    #[serde(default = "default_repository")]
    repository: String,
    #[serde(default = "default_module_output")]
    module_output: String,
    #[serde(default = "default_output_dir")]
    output_dir: String,
    #[serde(default = "default_report_dir")]
    report_dir: String,
    #[serde(default)]
    dependencies: Vec<RawDependency>,
}

fn default_launcher() -> String {
    "java".to_string()
}

fn default_repository() -> String {
    "repository".to_string()
}

fn default_module_output() -> String {
    "build/classes".to_string()
}

fn default_output_dir() -> String {
    "build/libs".to_string()
}

fn default_report_dir() -> String {
    "build/reports/jmh".to_string()
}

/// Validated archive descriptor. One instance per packaging run.
#[derive(Debug, Clone)]
pub struct ArchiveDescriptor {
    pub base_name: String,
    /// Empty string means the canonical artifact.
    pub classifier: String,
    pub entry_point: EntryPoint,
}

impl ArchiveDescriptor {
    /// Deterministic archive file name derived from base name and classifier.
    pub fn file_name(&self) -> String {
        if self.classifier.is_empty() {
            format!("{}.tar", self.base_name)
        } else {
            format!("{}-{}.tar", self.base_name, self.classifier)
        }
    }
}

/// Complete validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub archive: ArchiveDescriptor,
    pub analyzer_entry_point: EntryPoint,
    pub launcher: String,
    pub repository: PathBuf,
    pub module_output: PathBuf,
    pub output_dir: PathBuf,
    pub report_dir: PathBuf,
    pub dependencies: Vec<DependencyDeclaration>,
}

impl Config {
    /// Deterministic output path of the fat archive.
    pub fn archive_path(&self) -> PathBuf {
        self.output_dir.join(self.archive.file_name())
    }

    /// Conventional results location: `<report_dir>/results.json`.
    pub fn default_results_path(&self) -> PathBuf {
        self.report_dir.join(RESULTS_FILE_NAME)
    }
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> ForgeResult<Config> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ForgeError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ForgeError::Io {
            context: "reading config file",
            source: e,
        })?;

        Self::load_string(&content)
    }

    /// Load and validate configuration from a YAML string.
    pub fn load_string(content: &str) -> ForgeResult<Config> {
        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| ForgeError::ConfigParse {
                message: format!("YAML parse error: {}", e),
            })?;

        Self::validate(raw)
    }

    /// Validate raw configuration and convert to checked types.
    fn validate(raw: RawConfig) -> ForgeResult<Config> {
        let archive = Self::validate_archive(raw.archive)?;
        let analyzer_entry_point = EntryPoint::parse(&raw.analyzer_entry_point)?;

        if raw.launcher.trim().is_empty() {
            return Err(ValidationError::InvalidFieldValue {
                field: "launcher",
                value: raw.launcher,
                reason: "launcher executable must not be blank".to_string(),
            }
            .into());
        }

        let mut dependencies = Vec::with_capacity(raw.dependencies.len());
        for (index, raw_dep) in raw.dependencies.into_iter().enumerate() {
            dependencies.push(Self::validate_dependency(raw_dep, index)?);
        }

        Ok(Config {
            archive,
            analyzer_entry_point,
            launcher: raw.launcher,
            repository: PathBuf::from(raw.repository),
            module_output: PathBuf::from(raw.module_output),
            output_dir: PathBuf::from(raw.output_dir),
            report_dir: PathBuf::from(raw.report_dir),
            dependencies,
        })
    }

    /// Validate the archive descriptor.
    fn validate_archive(raw: RawArchiveConfig) -> ForgeResult<ArchiveDescriptor> {
        if raw.base_name.trim().is_empty() {
            return Err(ValidationError::InvalidFieldValue {
                field: "base_name",
                value: raw.base_name,
                reason: "archive base name must not be blank".to_string(),
            }
            .into());
        }
        for (field, value) in [("base_name", &raw.base_name), ("classifier", &raw.classifier)] {
            if value.contains(['/', '\\']) {
                return Err(ValidationError::InvalidFieldValue {
                    field,
                    value: value.clone(),
                    reason: "must not contain path separators".to_string(),
                }
                .into());
            }
        }

        let entry_point = EntryPoint::parse(&raw.entry_point)?;

        Ok(ArchiveDescriptor {
            base_name: raw.base_name,
            classifier: raw.classifier,
            entry_point,
        })
    }

    /// Validate a single dependency declaration.
    fn validate_dependency(raw: RawDependency, index: usize) -> ForgeResult<DependencyDeclaration> {
        let coordinate = Coordinate::parse(&raw.coordinate)?;

        if let Some(ref classifier) = raw.classifier {
            if classifier.trim().is_empty() || classifier.contains(['/', '\\']) {
                return Err(ValidationError::InvalidFieldValue {
                    field: "classifier",
                    value: classifier.clone(),
                    reason: format!("invalid classifier for dependency at index {}", index),
                }
                .into());
            }
        }

        Ok(DependencyDeclaration {
            coordinate,
            scope: raw.scope,
            classifier: raw.classifier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CONFIG: &str = r#"
archive:
  base_name: iggy-jmh-benchmarks
  classifier: ""
  entry_point: org.openjdk.jmh.Main

analyzer_entry_point: org.apache.iggy.benchmark.util.JmhResultAnalyzer

dependencies:
  - coordinate: jmh-core:1.37
    scope: compile
  - coordinate: jmh-generator-annprocess:1.37
    scope: annotation-processor
  - coordinate: logback-classic:1.5.6
    scope: runtime-only
  - coordinate: netty-dns-macos:4.1
    scope: runtime-only
    classifier: osx-aarch_64
"#;

    #[test]
    fn test_valid_config() {
        let config = ConfigLoader::load_string(VALID_CONFIG).unwrap();
        assert_eq!(config.archive.base_name, "iggy-jmh-benchmarks");
        assert_eq!(config.archive.entry_point.as_str(), "org.openjdk.jmh.Main");
        assert_eq!(config.dependencies.len(), 4);
        assert_eq!(
            config.dependencies[3].classifier.as_deref(),
            Some("osx-aarch_64")
        );
    }

    #[test]
    fn test_defaults_applied() {
        let config = ConfigLoader::load_string(VALID_CONFIG).unwrap();
        assert_eq!(config.launcher, "java");
        assert_eq!(config.report_dir, PathBuf::from("build/reports/jmh"));
        assert_eq!(
            config.default_results_path(),
            PathBuf::from("build/reports/jmh/results.json")
        );
        assert_eq!(
            config.archive_path(),
            PathBuf::from("build/libs/iggy-jmh-benchmarks.tar")
        );
    }

    #[test]
    fn test_classifier_in_archive_file_name() {
        let yaml = r#"
archive:
  base_name: benchmarks
  classifier: linux-x86_64
  entry_point: org.openjdk.jmh.Main
analyzer_entry_point: org.example.Analyzer
"#;
        let config = ConfigLoader::load_string(yaml).unwrap();
        assert_eq!(config.archive.file_name(), "benchmarks-linux-x86_64.tar");
    }

    #[test]
    fn test_blank_base_name_rejected() {
        let yaml = r#"
archive:
  base_name: "  "
  entry_point: org.openjdk.jmh.Main
analyzer_entry_point: org.example.Analyzer
"#;
        assert!(ConfigLoader::load_string(yaml).is_err());
    }

    #[test]
    fn test_invalid_entry_point_rejected() {
        let yaml = r#"
archive:
  base_name: benchmarks
  entry_point: "org..Main"
analyzer_entry_point: org.example.Analyzer
"#;
        assert!(ConfigLoader::load_string(yaml).is_err());
    }

    #[test]
    fn test_invalid_coordinate_rejected() {
        let yaml = r#"
archive:
  base_name: benchmarks
  entry_point: org.openjdk.jmh.Main
analyzer_entry_point: org.example.Analyzer
dependencies:
  - coordinate: no-version
    scope: compile
"#;
        assert!(ConfigLoader::load_string(yaml).is_err());
    }

    #[test]
    fn test_blank_declared_classifier_rejected() {
        let yaml = r#"
archive:
  base_name: benchmarks
  entry_point: org.openjdk.jmh.Main
analyzer_entry_point: org.example.Analyzer
dependencies:
  - coordinate: jmh-core:1.37
    scope: compile
    classifier: " "
"#;
        assert!(ConfigLoader::load_string(yaml).is_err());
    }

    #[test]
    fn test_missing_analyzer_entry_point_rejected() {
        let yaml = r#"
archive:
  base_name: benchmarks
  entry_point: org.openjdk.jmh.Main
"#;
        let result = ConfigLoader::load_string(yaml);
        assert!(matches!(result, Err(ForgeError::ConfigParse { .. })));
    }
}
