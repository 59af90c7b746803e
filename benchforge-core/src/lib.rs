// SPDX-License-Identifier: Apache-2.0

//! benchforge core library
//!
//! A benchmark packaging and execution harness: resolves a benchmark
//! module's dependency artifacts from a local repository, merges them with
//! the module's compiled output into one self-contained fat archive, runs
//! the archive's harness entry point as a child process, and post-processes
//! the JSON results file it writes.
//!
//! # Task graph
//!
//! - **package** - resolve the runtime classpath and build the fat archive
//!   (cacheable: skipped when the archive is newer than all inputs)
//! - **run-benchmarks** - execute the harness entry point; always stale
//! - **report** - hand the results file to the analyzer, or skip with a
//!   warning when no results exist yet
//!
//! Execution is strictly sequential; the filesystem is the only shared
//! state between tasks.

pub mod analyzer;
pub mod archive;
pub mod config;
pub mod error;
pub mod exec;
pub mod graph;
pub mod pipeline;
pub mod reporter;
pub mod resolver;
pub mod runner;
pub mod types;

pub use config::{ArchiveDescriptor, Config, ConfigLoader};
pub use error::{ForgeError, ForgeResult};
pub use graph::{CachePolicy, TaskGraph, TaskId};
pub use pipeline::{ExecuteOptions, Pipeline, PipelineRun, TaskStatus};
pub use reporter::ReportOutcome;
pub use types::{Coordinate, DependencyDeclaration, DependencyScope, EntryPoint};
