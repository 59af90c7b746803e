// SPDX-License-Identifier: Apache-2.0

//! `benchforge report` command - Analyze benchmark results.
//!
//! A missing results file is a skip with a warning, not a failure; running
//! `report` before `run-benchmarks` is an expected sequencing mistake. The
//! analyzer's exit code becomes the process exit code.

use std::path::Path;

use benchforge_core::pipeline::{ExecuteOptions, Pipeline};
use benchforge_core::{ConfigLoader, ReportOutcome, TaskId};

pub fn execute(config_path: &str, results_file: Option<&Path>) -> anyhow::Result<()> {
    let config = ConfigLoader::load_file(config_path)?;
    let pipeline = Pipeline::new(config);

    let options = ExecuteOptions {
        args: "",
        results_file,
    };
    let run = pipeline.execute(TaskId::Report, &options)?;

    match run.report_outcome {
        Some(ReportOutcome::Analyzed { exit_code }) if exit_code != 0 => {
            std::process::exit(exit_code);
        }
        _ => Ok(()),
    }
}
