// SPDX-License-Identifier: Apache-2.0

//! `benchforge package` command - Build the fat archive.

use benchforge_core::pipeline::{ExecuteOptions, Pipeline, TaskStatus};
use benchforge_core::{ConfigLoader, TaskId};

pub fn execute(config_path: &str) -> anyhow::Result<()> {
    let config = ConfigLoader::load_file(config_path)?;
    let pipeline = Pipeline::new(config);

    let run = pipeline.execute(TaskId::Package, &ExecuteOptions::default())?;
    let archive = pipeline.config().archive_path();

    match run.status_of(TaskId::Package) {
        Some(TaskStatus::UpToDate) => {
            println!("Archive up to date: {}", archive.display());
        }
        _ => {
            println!("✓ Packaged fat archive: {}", archive.display());
        }
    }
    Ok(())
}
