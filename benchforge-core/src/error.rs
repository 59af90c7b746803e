//! Custom error types for benchforge.
//!
//! This module defines explicit enum error types as per coding guidelines.
//! No `Box<dyn Error>`, no `anyhow::Result` - all errors are strongly typed.
//! Non-zero child-process exits are never errors; they are propagated as
//! exit codes by the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the benchmark harness.
/// All errors are explicit variants - no catch-all or generic handling.
#[derive(Debug, Error)]
pub enum ForgeError {
    // =========================================================================
    // Configuration Errors - Fail-Fast on Invalid Config
    // =========================================================================
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    // =========================================================================
    // Task Errors - Fatal, Abort the Remaining Task Graph
    // =========================================================================
    #[error("Dependency resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("Packaging error: {0}")]
    Packaging(#[from] PackagingError),

    #[error("Benchmark execution error: {0}")]
    Execution(#[from] ExecutionError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    // =========================================================================
    // System Errors
    // =========================================================================
    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration validation errors. Any invalid field aborts before the
/// task graph starts.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {field} in {context}")]
    MissingRequiredField {
        field: &'static str,
        context: String,
    },

    #[error("Invalid field value: {field} = {value} - {reason}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid coordinate: {value} - {reason}")]
    InvalidCoordinate { value: String, reason: String },

    #[error("Invalid entry point: {value} - {reason}")]
    InvalidEntryPoint { value: String, reason: String },
}

/// Dependency resolution errors - fatal, abort before packaging.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("Artifact repository not found: {path}")]
    RepositoryNotFound { path: PathBuf },

    #[error("Artifact not found for {coordinate}: {searched}")]
    ArtifactNotFound {
        coordinate: String,
        searched: PathBuf,
    },

    #[error("Version conflict for {name}: {first} vs {second}")]
    VersionConflict {
        name: String,
        first: String,
        second: String,
    },
}

/// Packaging errors - fatal, abort before any run or report step.
#[derive(Debug, Error)]
pub enum PackagingError {
    #[error("Module output directory not found: {path}")]
    MissingModuleOutput { path: PathBuf },

    #[error("Conflicting archive entry {path}: provided by both {first} and {second} with different content")]
    ConflictingEntry {
        path: String,
        first: String,
        second: String,
    },

    #[error("Entry point {entry_point} does not resolve to {class_path} in the merged archive")]
    EntryPointNotFound {
        entry_point: String,
        class_path: String,
    },

    #[error("Archive IO error: {context} - {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Benchmark execution errors - failure to start the harness subprocess.
/// A non-zero harness exit is surfaced as an exit code, not as an error.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Packaged archive not found: {path} - run `benchforge package` first")]
    ArchiveMissing { path: PathBuf },

    #[error("Failed to create report directory {path}: {source}")]
    ReportDirCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to spawn {launcher}: {source}")]
    SpawnFailed {
        launcher: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result analysis errors. A missing results file is NOT an error - the
/// reporter skips with a warning instead.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to launch analyzer via {launcher}: {source}")]
    LaunchFailed {
        launcher: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read results file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse results file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No benchmark results found in {path}")]
    NoResults { path: PathBuf },
}

/// Result type alias using ForgeError.
pub type ForgeResult<T> = Result<T, ForgeError>;
