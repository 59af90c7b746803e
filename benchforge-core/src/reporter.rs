// SPDX-License-Identifier: Apache-2.0

//! Result reporting: hand the benchmark results file to the analyzer.
//!
//! A missing results file is an expected precondition failure (the user
//! simply has not run benchmarks yet), so the reporter warns with
//! remediation guidance and skips instead of failing. Skip-vs-invoke is an
//! explicit outcome, not an exception.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::AnalysisError;
use crate::exec::CommandSpec;
use crate::types::EntryPoint;

/// Outcome of a reporting step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Results file absent; analyzer was never invoked. Not an error.
    Skipped { missing: PathBuf },
    /// Analyzer ran; its exit code is propagated as-is.
    Analyzed { exit_code: i32 },
}

pub struct ResultReporter {
    archive: PathBuf,
    analyzer_entry_point: EntryPoint,
    launcher: String,
    default_results_path: PathBuf,
}

impl ResultReporter {
    pub fn new(config: &Config) -> Self {
        Self {
            archive: config.archive_path(),
            analyzer_entry_point: config.analyzer_entry_point.clone(),
            launcher: config.launcher.clone(),
            default_results_path: config.default_results_path(),
        }
    }

    /// Analyze the results file, defaulting to `<report_dir>/results.json`.
    ///
    /// The analyzer receives the absolute results path as its sole
    /// positional argument and the archive on its classpath.
    pub fn report(&self, results_file: Option<&Path>) -> Result<ReportOutcome, AnalysisError> {
        let requested = results_file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.default_results_path.clone());
        let resolved = std::path::absolute(&requested).map_err(|e| AnalysisError::Io {
            path: requested.clone(),
            source: e,
        })?;

        if !resolved.is_file() {
            tracing::warn!(
                results_file = %resolved.display(),
                "Benchmark results file not found"
            );
            tracing::warn!(
                "Run benchmarks first with: benchforge run-benchmarks --args='-rf json -rff {}'",
                requested.display()
            );
            return Ok(ReportOutcome::Skipped { missing: resolved });
        }

        tracing::info!(
            results_file = %resolved.display(),
            analyzer = %self.analyzer_entry_point,
            "Invoking result analyzer"
        );
        let exit_code = CommandSpec::new(
            self.launcher.clone(),
            vec![self.archive.clone()],
            self.analyzer_entry_point.clone(),
        )
        .args(vec![resolved.display().to_string()])
        .status()
        .map_err(|e| AnalysisError::LaunchFailed {
            launcher: self.launcher.clone(),
            source: e,
        })?;

        if exit_code != 0 {
            tracing::warn!(exit_code, "Analyzer exited non-zero");
        }
        Ok(ReportOutcome::Analyzed { exit_code })
    }
}
