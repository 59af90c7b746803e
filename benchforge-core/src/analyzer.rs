// SPDX-License-Identifier: Apache-2.0

//! Built-in analysis of benchmark harness JSON results.
//!
//! Parses the results array written by the harness (`-rf json`) and
//! calculates actual message throughput: operations/sec multiplied by the
//! number of messages per operation, taken from the `messagesPerBatch` or
//! `messagesPerPoll` benchmark parameter.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::AnalysisError;

/// Raw benchmark record as emitted by the harness.
#[derive(Debug, Deserialize)]
struct RawBenchmark {
    benchmark: String,
    #[serde(default)]
    params: HashMap<String, String>,
    #[serde(rename = "primaryMetric")]
    primary_metric: RawPrimaryMetric,
}

#[derive(Debug, Deserialize)]
struct RawPrimaryMetric {
    score: f64,
    // The harness writes the literal string "NaN" when the error is
    // undefined, so this cannot be a plain f64.
    #[serde(rename = "scoreError", default)]
    score_error: serde_json::Value,
}

/// Throughput summary for one benchmark.
#[derive(Debug, Clone)]
pub struct BenchmarkSummary {
    pub name: String,
    pub params: String,
    pub ops_per_sec: f64,
    pub ops_error: f64,
    pub messages_per_sec: f64,
    pub messages_error: f64,
    pub multiplier: u64,
}

/// Parse a results file and summarize every benchmark, sorted by name.
pub fn analyze_file(path: &Path) -> Result<Vec<BenchmarkSummary>, AnalysisError> {
    let file = File::open(path).map_err(|e| AnalysisError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let raw: Vec<RawBenchmark> =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| AnalysisError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

    if raw.is_empty() {
        return Err(AnalysisError::NoResults {
            path: path.to_path_buf(),
        });
    }

    let mut summaries: Vec<BenchmarkSummary> = raw.into_iter().map(summarize).collect();
    summaries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(summaries)
}

fn summarize(raw: RawBenchmark) -> BenchmarkSummary {
    let ops_per_sec = raw.primary_metric.score;
    let ops_error = raw.primary_metric.score_error.as_f64().unwrap_or(0.0);

    let int_param = |key: &str| -> Option<u64> {
        raw.params.get(key).and_then(|value| value.parse().ok())
    };

    let (multiplier, mut params) = if let Some(batch) = int_param("messagesPerBatch") {
        (batch, format!("batch={}", batch))
    } else if let Some(poll) = int_param("messagesPerPoll") {
        (poll, format!("poll={}", poll))
    } else {
        (1, "single".to_string())
    };

    if let Some(payload_size) = int_param("payloadSizeBytes") {
        params.push_str(&format!(", size={}B", format_count(payload_size as f64)));
    }

    BenchmarkSummary {
        name: raw.benchmark,
        params,
        ops_per_sec,
        ops_error,
        messages_per_sec: ops_per_sec * multiplier as f64,
        messages_error: ops_error * multiplier as f64,
        multiplier,
    }
}

/// Format a count with K/M suffixes, matching the report table convention.
pub fn format_count(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.2}K", value / 1_000.0)
    } else {
        format!("{:.2}", value)
    }
}

/// Keep the last `keep` chars of a value longer than `max` chars, prefixed
/// with `...`. Slices on char boundaries; benchmark names may legally
/// contain non-ASCII identifier characters.
fn truncate_keep_tail(value: &str, max: usize, keep: usize) -> String {
    let chars = value.chars().count();
    if chars <= max {
        return value.to_string();
    }
    let start = value
        .char_indices()
        .nth(chars - keep)
        .map(|(index, _)| index)
        .unwrap_or(0);
    format!("...{}", &value[start..])
}

/// Keep the first `keep` chars of a value longer than `max` chars, suffixed
/// with `...`.
fn truncate_keep_head(value: &str, max: usize, keep: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let end = value
        .char_indices()
        .nth(keep)
        .map(|(index, _)| index)
        .unwrap_or(value.len());
    format!("{}...", &value[..end])
}

/// Render the fixed-width throughput table.
pub fn render_table(summaries: &[BenchmarkSummary]) -> String {
    let separator = "=".repeat(120);
    let line = "-".repeat(120);

    let mut out = String::new();
    out.push('\n');
    out.push_str(&separator);
    out.push_str("\nBenchmark Results - Message Throughput Analysis\n");
    out.push_str(&separator);
    out.push('\n');
    out.push_str(&format!(
        "{:<50} {:<20} {:<15} {:<15} {:<10}\n",
        "Benchmark", "Parameters", "Ops/sec", "Messages/sec", "Multiplier"
    ));
    out.push_str(&line);
    out.push('\n');

    for summary in summaries {
        let name = truncate_keep_tail(&summary.name, 48, 45);
        let params = truncate_keep_head(&summary.params, 18, 15);

        let mut ops = format!("{}/s", format_count(summary.ops_per_sec));
        if summary.ops_error > 0.0 {
            ops.push_str(&format!(" ±{}", format_count(summary.ops_error)));
        }
        let mut msgs = format!("{}/s", format_count(summary.messages_per_sec));
        if summary.messages_error > 0.0 {
            msgs.push_str(&format!(" ±{}", format_count(summary.messages_error)));
        }

        out.push_str(&format!(
            "{:<50} {:<20} {:<15} {:<15} {:<10}\n",
            name,
            params,
            ops,
            msgs,
            format!("x{}", summary.multiplier)
        ));
    }

    out.push_str(&separator);
    out.push_str("\n\nNote: Ops/sec x Multiplier = Messages/sec\n");
    out.push_str("      Multiplier is determined by the messagesPerBatch or messagesPerPoll parameter\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE_RESULTS: &str = r#"[
      {
        "benchmark": "org.example.SendBenchmark.sendBatch",
        "params": { "messagesPerBatch": "100", "payloadSizeBytes": "1024" },
        "primaryMetric": { "score": 5000.0, "scoreError": 250.0 }
      },
      {
        "benchmark": "org.example.PollBenchmark.poll",
        "params": { "messagesPerPoll": "50" },
        "primaryMetric": { "score": 2000.0, "scoreError": "NaN" }
      },
      {
        "benchmark": "org.example.EchoBenchmark.echo",
        "primaryMetric": { "score": 123.4, "scoreError": 1.2 }
      }
    ]"#;

    fn write_results(content: &str) -> (TempDir, std::path::PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("results.json");
        std::fs::write(&path, content).unwrap();
        (temp, path)
    }

    #[test]
    fn test_batch_multiplier() {
        let (_temp, path) = write_results(SAMPLE_RESULTS);
        let summaries = analyze_file(&path).unwrap();

        let batch = summaries
            .iter()
            .find(|s| s.name.ends_with("sendBatch"))
            .unwrap();
        assert_eq!(batch.multiplier, 100);
        assert!((batch.messages_per_sec - 500_000.0).abs() < f64::EPSILON);
        assert!((batch.messages_error - 25_000.0).abs() < f64::EPSILON);
        assert!(batch.params.contains("batch=100"));
        assert!(batch.params.contains("size=1.02KB"));
    }

    #[test]
    fn test_poll_multiplier_and_nan_error() {
        let (_temp, path) = write_results(SAMPLE_RESULTS);
        let summaries = analyze_file(&path).unwrap();

        let poll = summaries.iter().find(|s| s.name.ends_with("poll")).unwrap();
        assert_eq!(poll.multiplier, 50);
        assert!((poll.messages_per_sec - 100_000.0).abs() < f64::EPSILON);
        assert_eq!(poll.ops_error, 0.0);
    }

    #[test]
    fn test_single_multiplier_without_params() {
        let (_temp, path) = write_results(SAMPLE_RESULTS);
        let summaries = analyze_file(&path).unwrap();

        let single = summaries.iter().find(|s| s.name.ends_with("echo")).unwrap();
        assert_eq!(single.multiplier, 1);
        assert_eq!(single.params, "single");
    }

    #[test]
    fn test_sorted_by_name() {
        let (_temp, path) = write_results(SAMPLE_RESULTS);
        let summaries = analyze_file(&path).unwrap();
        let names: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_empty_results() {
        let (_temp, path) = write_results("[]");
        assert!(matches!(
            analyze_file(&path),
            Err(AnalysisError::NoResults { .. })
        ));
    }

    #[test]
    fn test_malformed_results() {
        let (_temp, path) = write_results("{ not json");
        assert!(matches!(
            analyze_file(&path),
            Err(AnalysisError::Parse { .. })
        ));
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(512.0), "512.00");
        assert_eq!(format_count(1_500.0), "1.50K");
        assert_eq!(format_count(2_500_000.0), "2.50M");
    }

    #[test]
    fn test_render_table_truncates_multibyte_names_on_char_boundaries() {
        let name = format!("org.example.{}", "ä".repeat(50));
        let results = format!(
            r#"[{{ "benchmark": "{}", "primaryMetric": {{ "score": 1.0, "scoreError": 0.0 }} }}]"#,
            name
        );
        let (_temp, path) = write_results(&results);
        let summaries = analyze_file(&path).unwrap();

        let table = render_table(&summaries);
        assert!(table.contains(&format!("...{}", "ä".repeat(45))));
    }

    #[test]
    fn test_truncate_keeps_short_values_unchanged() {
        assert_eq!(truncate_keep_tail("org.example.Short", 48, 45), "org.example.Short");
        assert_eq!(truncate_keep_head("batch=100", 18, 15), "batch=100");
    }

    #[test]
    fn test_render_table() {
        let (_temp, path) = write_results(SAMPLE_RESULTS);
        let summaries = analyze_file(&path).unwrap();
        let table = render_table(&summaries);

        assert!(table.contains("Message Throughput Analysis"));
        assert!(table.contains("org.example.PollBenchmark.poll"));
        assert!(table.contains("x100"));
        assert!(table.contains("500.00K/s"));
    }
}
