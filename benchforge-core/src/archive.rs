// SPDX-License-Identifier: Apache-2.0

//! Fat-archive packaging.
//!
//! Merges the module's compiled output and every resolved runtime dependency
//! into a single tar archive. Service-metadata files under
//! `META-INF/services/` are concatenated so harness auto-discovery keeps
//! working across merged libraries; any other same-path entry with different
//! content is a hard conflict.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::config::ArchiveDescriptor;
use crate::error::PackagingError;
use crate::resolver::Classpath;

/// Manifest entry path. Dependency manifests are discarded; the packager
/// writes its own.
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// Prefix of service-metadata entries that are merged by concatenation.
pub const SERVICES_PREFIX: &str = "META-INF/services/";

/// Source label for entries coming from the module's own compiled output.
const MODULE_OUTPUT_LABEL: &str = "module output";

/// An entry accumulated during the merge, tagged with the artifact that
/// first provided it.
struct MergedEntry {
    content: Vec<u8>,
    source: String,
}

/// Packages module output and resolved dependencies into one archive.
pub struct FatArchivePackager {
    descriptor: ArchiveDescriptor,
    output_dir: PathBuf,
}

impl FatArchivePackager {
    pub fn new(descriptor: ArchiveDescriptor, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            descriptor,
            output_dir: output_dir.into(),
        }
    }

    /// Deterministic output path derived from base name and classifier.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(self.descriptor.file_name())
    }

    /// Merge module output and the runtime classpath into the fat archive.
    ///
    /// Overwrites any prior archive at the output path. Returns the path of
    /// the written archive.
    pub fn package(
        &self,
        module_output: &Path,
        classpath: &Classpath,
    ) -> Result<PathBuf, PackagingError> {
        if !module_output.is_dir() {
            return Err(PackagingError::MissingModuleOutput {
                path: module_output.to_path_buf(),
            });
        }

        // Module output first: it takes precedence under first-wins.
        let mut entries: BTreeMap<String, MergedEntry> = BTreeMap::new();
        collect_dir(&mut entries, module_output, module_output)?;
        for artifact in classpath.iter() {
            collect_archive(&mut entries, &artifact.path, &artifact.label())?;
        }

        let class_path = self.descriptor.entry_point.class_file_path();
        if !entries.contains_key(&class_path) {
            return Err(PackagingError::EntryPointNotFound {
                entry_point: self.descriptor.entry_point.to_string(),
                class_path,
            });
        }

        let output_path = self.output_path();
        fs::create_dir_all(&self.output_dir).map_err(|e| PackagingError::Io {
            context: format!("creating output directory {}", self.output_dir.display()),
            source: e,
        })?;
        let file = File::create(&output_path).map_err(|e| PackagingError::Io {
            context: format!("creating archive {}", output_path.display()),
            source: e,
        })?;

        let mut builder = tar::Builder::new(file);
        append_entry(&mut builder, MANIFEST_PATH, &self.render_manifest())?;
        // BTreeMap iteration keeps the archive layout stable across runs.
        for (path, entry) in &entries {
            append_entry(&mut builder, path, &entry.content)?;
        }
        builder.finish().map_err(|e| PackagingError::Io {
            context: format!("finishing archive {}", output_path.display()),
            source: e,
        })?;

        tracing::info!(
            archive = %output_path.display(),
            entries = entries.len() + 1,
            dependencies = classpath.len(),
            "Packaged fat archive"
        );
        Ok(output_path)
    }

    /// Generated manifest declaring the harness entry point as the
    /// executable main class.
    fn render_manifest(&self) -> Vec<u8> {
        format!(
            "Manifest-Version: 1.0\n\
             Main-Class: {}\n\
             Created-By: benchforge {}\n\
             Build-Date: {}\n",
            self.descriptor.entry_point,
            env!("CARGO_PKG_VERSION"),
            Utc::now().to_rfc3339(),
        )
        .into_bytes()
    }
}

/// Merge one entry into the accumulated set.
///
/// Policy: dependency manifests are dropped, service files are concatenated
/// in classpath order, identical duplicates keep the first copy, and any
/// other duplicate is a conflict naming both sources.
fn merge_entry(
    entries: &mut BTreeMap<String, MergedEntry>,
    path: String,
    content: Vec<u8>,
    source: &str,
) -> Result<(), PackagingError> {
    if path == MANIFEST_PATH {
        return Ok(());
    }

    match entries.entry(path) {
        Entry::Vacant(vacant) => {
            vacant.insert(MergedEntry {
                content,
                source: source.to_string(),
            });
            Ok(())
        }
        Entry::Occupied(mut occupied) => {
            if occupied.key().starts_with(SERVICES_PREFIX) {
                let existing = occupied.get_mut();
                if !existing.content.is_empty() && !existing.content.ends_with(b"\n") {
                    existing.content.push(b'\n');
                }
                existing.content.extend_from_slice(&content);
                Ok(())
            } else if occupied.get().content == content {
                // Identical duplicate: first declaration wins.
                Ok(())
            } else {
                Err(PackagingError::ConflictingEntry {
                    path: occupied.key().clone(),
                    first: occupied.get().source.clone(),
                    second: source.to_string(),
                })
            }
        }
    }
}

/// Walk the module output tree and merge every file, keyed by its path
/// relative to the root with `/` separators.
fn collect_dir(
    entries: &mut BTreeMap<String, MergedEntry>,
    root: &Path,
    dir: &Path,
) -> Result<(), PackagingError> {
    let read_dir = fs::read_dir(dir).map_err(|e| PackagingError::Io {
        context: format!("reading directory {}", dir.display()),
        source: e,
    })?;

    for dir_entry in read_dir {
        let dir_entry = dir_entry.map_err(|e| PackagingError::Io {
            context: format!("reading directory {}", dir.display()),
            source: e,
        })?;
        let path = dir_entry.path();
        if path.is_dir() {
            collect_dir(entries, root, &path)?;
            continue;
        }

        let relative = path
            .strip_prefix(root)
            .expect("walked path is under the walk root");
        let entry_path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let content = fs::read(&path).map_err(|e| PackagingError::Io {
            context: format!("reading {}", path.display()),
            source: e,
        })?;
        merge_entry(entries, entry_path, content, MODULE_OUTPUT_LABEL)?;
    }
    Ok(())
}

/// Read a dependency archive and merge its regular entries. Special entries
/// (links, devices) are rejected, matching the packaging contract of plain
/// file content only.
fn collect_archive(
    entries: &mut BTreeMap<String, MergedEntry>,
    archive_path: &Path,
    source: &str,
) -> Result<(), PackagingError> {
    let file = File::open(archive_path).map_err(|e| PackagingError::Io {
        context: format!("opening artifact {}", archive_path.display()),
        source: e,
    })?;
    let mut archive = tar::Archive::new(file);

    let archive_entries = archive.entries().map_err(|e| PackagingError::Io {
        context: format!("reading artifact {}", archive_path.display()),
        source: e,
    })?;
    for entry in archive_entries {
        let mut entry = entry.map_err(|e| PackagingError::Io {
            context: format!("reading artifact {}", archive_path.display()),
            source: e,
        })?;

        match entry.header().entry_type() {
            tar::EntryType::Directory => continue,
            tar::EntryType::Regular => {}
            other => {
                return Err(PackagingError::Io {
                    context: format!(
                        "artifact {} contains unsupported entry type {:?}",
                        archive_path.display(),
                        other
                    ),
                    source: std::io::Error::from(std::io::ErrorKind::InvalidData),
                });
            }
        }

        let entry_path = entry
            .path()
            .map_err(|e| PackagingError::Io {
                context: format!("reading entry path in {}", archive_path.display()),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            })?
            .to_string_lossy()
            .into_owned();
        let mut content = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut content).map_err(|e| PackagingError::Io {
            context: format!("reading entry {} in {}", entry_path, archive_path.display()),
            source: e,
        })?;
        merge_entry(entries, entry_path, content, source)?;
    }
    Ok(())
}

fn append_entry<W: std::io::Write>(
    builder: &mut tar::Builder<W>,
    path: &str,
    content: &[u8],
) -> Result<(), PackagingError> {
    let mut header = tar::Header::new_gnu();
    header.set_size(content.len() as u64);
    header.set_mode(0o644);
    header.set_mtime(0);
    builder
        .append_data(&mut header, path, content)
        .map_err(|e| PackagingError::Io {
            context: format!("writing entry {}", path),
            source: e,
        })
}
