// SPDX-License-Identifier: Apache-2.0

//! `benchforge validate` command - Validate configuration file.

use benchforge_core::ConfigLoader;

pub fn execute(config_path: &str) -> anyhow::Result<()> {
    tracing::info!(file = %config_path, "Validating configuration");

    match ConfigLoader::load_file(config_path) {
        Ok(config) => {
            println!("✓ Configuration is valid");
            println!();
            println!("Archive:");
            println!("  File Name:      {}", config.archive.file_name());
            println!("  Entry Point:    {}", config.archive.entry_point);
            println!("  Output Path:    {}", config.archive_path().display());
            println!();
            println!("Execution:");
            println!("  Launcher:       {}", config.launcher);
            println!("  Analyzer:       {}", config.analyzer_entry_point);
            println!("  Report Dir:     {}", config.report_dir.display());
            println!("  Results File:   {}", config.default_results_path().display());
            println!();
            println!("Dependencies ({}):", config.dependencies.len());
            for dep in &config.dependencies {
                match &dep.classifier {
                    Some(classifier) => println!(
                        "  - {} ({}, classifier: {})",
                        dep.coordinate, dep.scope, classifier
                    ),
                    None => println!("  - {} ({})", dep.coordinate, dep.scope),
                }
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed:");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
