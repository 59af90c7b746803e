// SPDX-License-Identifier: Apache-2.0

//! Sequential pipeline driver.
//!
//! Executes a target task and its dependencies in strict graph order,
//! single-threaded. Each task runs to completion before its dependents
//! start; the filesystem (archive file, results file) is the only state
//! shared between tasks. Any fatal error aborts the remaining graph.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use crate::archive::FatArchivePackager;
use crate::config::Config;
use crate::error::ForgeResult;
use crate::graph::{CachePolicy, TaskGraph, TaskId};
use crate::reporter::{ReportOutcome, ResultReporter};
use crate::resolver::{Classpath, DependencyResolver};
use crate::runner::BenchmarkRunner;

/// How a task in the pipeline completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Executed,
    /// Cacheable task whose outputs were newer than all of its inputs.
    UpToDate,
}

/// Per-run options for the always-stale tasks.
#[derive(Debug, Default)]
pub struct ExecuteOptions<'a> {
    /// Raw argument string forwarded to the benchmark harness.
    pub args: &'a str,
    /// Explicit results file for the report task.
    pub results_file: Option<&'a Path>,
}

/// Record of a completed pipeline run.
#[derive(Debug)]
pub struct PipelineRun {
    pub statuses: Vec<(TaskId, TaskStatus)>,
    /// Exit code of the terminal subprocess, 0 if none ran.
    pub exit_code: i32,
    pub report_outcome: Option<ReportOutcome>,
}

impl PipelineRun {
    pub fn status_of(&self, task: TaskId) -> Option<TaskStatus> {
        self.statuses
            .iter()
            .find(|(id, _)| *id == task)
            .map(|(_, status)| *status)
    }
}

/// Drives the task graph against a validated configuration.
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Execute the target task, running its dependencies first.
    pub fn execute(&self, target: TaskId, options: &ExecuteOptions<'_>) -> ForgeResult<PipelineRun> {
        let mut run = PipelineRun {
            statuses: Vec::new(),
            exit_code: 0,
            report_outcome: None,
        };

        for task in TaskGraph::execution_order(target) {
            tracing::debug!(task = %task, "Starting task");
            match task {
                TaskId::Package => {
                    let resolver = DependencyResolver::new(&self.config.repository);
                    let classpath = resolver.runtime_classpath(&self.config.dependencies)?;

                    if TaskGraph::cache_policy(task) == CachePolicy::Cacheable
                        && self.package_up_to_date(&classpath)?
                    {
                        tracing::info!(
                            archive = %self.config.archive_path().display(),
                            "Archive up to date, skipping packaging"
                        );
                        run.statuses.push((task, TaskStatus::UpToDate));
                        continue;
                    }

                    let packager = FatArchivePackager::new(
                        self.config.archive.clone(),
                        self.config.output_dir.clone(),
                    );
                    packager.package(&self.config.module_output, &classpath)?;
                    run.statuses.push((task, TaskStatus::Executed));
                }
                TaskId::RunBenchmarks => {
                    let runner = BenchmarkRunner::new(&self.config);
                    run.exit_code = runner.run(options.args)?;
                    run.statuses.push((task, TaskStatus::Executed));
                }
                TaskId::Report => {
                    let reporter = ResultReporter::new(&self.config);
                    let outcome = reporter.report(options.results_file)?;
                    if let ReportOutcome::Analyzed { exit_code } = outcome {
                        run.exit_code = exit_code;
                    }
                    run.report_outcome = Some(outcome);
                    run.statuses.push((task, TaskStatus::Executed));
                }
            }
        }

        Ok(run)
    }

    /// The archive is up to date when it exists and is at least as new as
    /// every module-output file and resolved artifact.
    fn package_up_to_date(&self, classpath: &Classpath) -> ForgeResult<bool> {
        let Some(archive_mtime) = mtime(&self.config.archive_path()) else {
            return Ok(false);
        };

        let mut inputs: Vec<SystemTime> = Vec::new();
        if !collect_mtimes(&self.config.module_output, &mut inputs) {
            return Ok(false);
        }
        for path in classpath.paths() {
            match mtime(path) {
                Some(time) => inputs.push(time),
                None => return Ok(false),
            }
        }

        Ok(inputs.into_iter().all(|input| input <= archive_mtime))
    }
}

fn mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|meta| meta.modified()).ok()
}

/// Collect modification times of all files under `dir`. Returns false when
/// the tree cannot be read, which forces repackaging (and a proper error
/// from the packager if the directory is truly missing).
fn collect_mtimes(dir: &Path, out: &mut Vec<SystemTime>) -> bool {
    let Ok(read_dir) = fs::read_dir(dir) else {
        return false;
    };
    for entry in read_dir {
        let Ok(entry) = entry else {
            return false;
        };
        let path = entry.path();
        if path.is_dir() {
            if !collect_mtimes(&path, out) {
                return false;
            }
        } else {
            match mtime(&path) {
                Some(time) => out.push(time),
                None => return false,
            }
        }
    }
    true
}
