// SPDX-License-Identifier: Apache-2.0

//! `benchforge analyze` command - Built-in throughput summary.

use std::path::Path;

use benchforge_core::analyzer;

pub fn execute(file: &Path) -> anyhow::Result<()> {
    let summaries = analyzer::analyze_file(file)?;
    print!("{}", analyzer::render_table(&summaries));
    Ok(())
}
