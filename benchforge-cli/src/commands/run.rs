// SPDX-License-Identifier: Apache-2.0

//! `benchforge run-benchmarks` command - Execute the packaged harness.
//!
//! Always re-runs; benchmark results are time-sensitive and must never be
//! skipped as up to date. The harness subprocess exit code becomes the
//! process exit code.

use benchforge_core::pipeline::{ExecuteOptions, Pipeline};
use benchforge_core::{ConfigLoader, TaskId};

pub fn execute(config_path: &str, args: &str) -> anyhow::Result<()> {
    let config = ConfigLoader::load_file(config_path)?;
    let pipeline = Pipeline::new(config);

    let options = ExecuteOptions {
        args,
        results_file: None,
    };
    let run = pipeline.execute(TaskId::RunBenchmarks, &options)?;

    if run.exit_code != 0 {
        std::process::exit(run.exit_code);
    }
    Ok(())
}
