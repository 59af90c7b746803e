// SPDX-License-Identifier: Apache-2.0

//! Benchmark execution against the packaged archive.
//!
//! The runner guarantees the report directory exists before launch, splits
//! the user-supplied argument string into tokens, and blocks on the harness
//! subprocess. Its exit code is propagated as-is, never masked. Benchmark
//! runs are time-sensitive, so the runner is never subject to up-to-date
//! skipping.

use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::ExecutionError;
use crate::exec::{tokenize, CommandSpec};
use crate::types::EntryPoint;

pub struct BenchmarkRunner {
    archive: PathBuf,
    entry_point: EntryPoint,
    launcher: String,
    report_dir: PathBuf,
}

impl BenchmarkRunner {
    pub fn new(config: &Config) -> Self {
        Self {
            archive: config.archive_path(),
            entry_point: config.archive.entry_point.clone(),
            launcher: config.launcher.clone(),
            report_dir: config.report_dir.clone(),
        }
    }

    /// Run the harness entry point with the given raw argument string.
    ///
    /// Returns the harness subprocess exit code.
    pub fn run(&self, raw_args: &str) -> Result<i32, ExecutionError> {
        fs::create_dir_all(&self.report_dir).map_err(|e| ExecutionError::ReportDirCreation {
            path: self.report_dir.clone(),
            source: e,
        })?;

        if !self.archive.is_file() {
            return Err(ExecutionError::ArchiveMissing {
                path: self.archive.clone(),
            });
        }

        let args = tokenize(raw_args);
        tracing::info!(
            archive = %self.archive.display(),
            entry_point = %self.entry_point,
            args = ?args,
            "Launching benchmark harness"
        );

        let exit_code = CommandSpec::new(
            self.launcher.clone(),
            vec![self.archive.clone()],
            self.entry_point.clone(),
        )
        .args(args)
        .status()
        .map_err(|e| ExecutionError::SpawnFailed {
            launcher: self.launcher.clone(),
            source: e,
        })?;

        if exit_code != 0 {
            tracing::warn!(exit_code, "Benchmark harness exited non-zero");
        }
        Ok(exit_code)
    }
}
