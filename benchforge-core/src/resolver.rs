// SPDX-License-Identifier: Apache-2.0

//! Dependency resolution against a local artifact repository.
//!
//! The repository uses a conventional layout:
//! `<repository>/<name>/<version>/<name>-<version>[-<classifier>].tar`.
//! Resolution is pure filesystem lookup and is cacheable across runs.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::ResolutionError;
use crate::types::{DependencyDeclaration, DependencyScope};

/// A resolved artifact on the classpath.
#[derive(Debug, Clone)]
pub struct ResolvedArtifact {
    pub declaration: DependencyDeclaration,
    pub path: PathBuf,
}

impl ResolvedArtifact {
    /// Human-readable source label used in merge diagnostics.
    pub fn label(&self) -> String {
        self.declaration.coordinate.to_string()
    }
}

/// An ordered, deduplicated classpath.
///
/// Order is declaration order and classloading priority is first-wins:
/// when two artifacts provide the same entry, the one declared earlier
/// takes precedence. The policy is stable across runs.
#[derive(Debug, Clone, Default)]
pub struct Classpath {
    entries: Vec<ResolvedArtifact>,
}

impl Classpath {
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedArtifact> {
        self.entries.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|artifact| artifact.path.as_path())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves dependency declarations into classpaths.
pub struct DependencyResolver {
    repository: PathBuf,
}

impl DependencyResolver {
    pub fn new(repository: impl Into<PathBuf>) -> Self {
        Self {
            repository: repository.into(),
        }
    }

    /// Resolve the runtime classpath: compile plus runtime-only scopes.
    /// Annotation processors never reach the runtime classpath.
    pub fn runtime_classpath(
        &self,
        declarations: &[DependencyDeclaration],
    ) -> Result<Classpath, ResolutionError> {
        self.resolve(
            declarations,
            &[DependencyScope::Compile, DependencyScope::RuntimeOnly],
        )
    }

    /// Resolve declarations matching any of the given scopes.
    ///
    /// Version conflicts are detected across the full declaration set,
    /// regardless of scope filtering. Exact duplicate declarations are
    /// deduplicated, keeping the first occurrence.
    pub fn resolve(
        &self,
        declarations: &[DependencyDeclaration],
        scopes: &[DependencyScope],
    ) -> Result<Classpath, ResolutionError> {
        Self::check_version_conflicts(declarations)?;

        if declarations.is_empty() {
            return Ok(Classpath::default());
        }

        if !self.repository.is_dir() {
            return Err(ResolutionError::RepositoryNotFound {
                path: self.repository.clone(),
            });
        }

        let mut seen: HashSet<(String, Option<String>)> = HashSet::new();
        let mut entries = Vec::new();

        for declaration in declarations {
            if !scopes.contains(&declaration.scope) {
                continue;
            }

            let key = (
                declaration.coordinate.to_string(),
                declaration.classifier.clone(),
            );
            if !seen.insert(key) {
                tracing::debug!(
                    coordinate = %declaration.coordinate,
                    "Skipping duplicate dependency declaration"
                );
                continue;
            }

            let path = self.artifact_path(declaration);
            if !path.is_file() {
                return Err(ResolutionError::ArtifactNotFound {
                    coordinate: declaration.coordinate.to_string(),
                    searched: path,
                });
            }

            tracing::debug!(
                coordinate = %declaration.coordinate,
                scope = %declaration.scope,
                path = %path.display(),
                "Resolved artifact"
            );
            entries.push(ResolvedArtifact {
                declaration: declaration.clone(),
                path,
            });
        }

        Ok(Classpath { entries })
    }

    /// Repository path of a declared artifact.
    fn artifact_path(&self, declaration: &DependencyDeclaration) -> PathBuf {
        self.repository
            .join(declaration.coordinate.name())
            .join(declaration.coordinate.version())
            .join(declaration.artifact_file_name())
    }

    fn check_version_conflicts(
        declarations: &[DependencyDeclaration],
    ) -> Result<(), ResolutionError> {
        let mut versions: HashMap<&str, &str> = HashMap::new();
        for declaration in declarations {
            let name = declaration.coordinate.name();
            let version = declaration.coordinate.version();
            if let Some(existing) = versions.insert(name, version) {
                if existing != version {
                    return Err(ResolutionError::VersionConflict {
                        name: name.to_string(),
                        first: existing.to_string(),
                        second: version.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
