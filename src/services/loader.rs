//! Builds a coverage submission from files on disk.
//!
//! Reads the Istanbul coverage map plus, on a best-effort basis, test counts
//! from whichever summary file the test runner produced.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{CoverageSubmission, RawFileCoverage, SubmissionSummary, TestStats};
use crate::services::parser;

/// Read the coverage map, aggregate it and assemble the submission payload.
///
/// A missing or malformed coverage file is fatal. Missing test stats are not:
/// the fallback chain in [`read_test_stats`] degrades to zeroed counts.
pub fn build_submission(config: &Config) -> AppResult<CoverageSubmission> {
    info!("Reading coverage file: {}", config.coverage_path.display());
    let coverage = read_coverage_map(&config.coverage_path)?;

    info!("Calculating coverage totals over {} files", coverage.len());
    let summary = parser::aggregate(&coverage);
    let tests = read_test_stats(&config.summary_path, &config.results_path);

    Ok(CoverageSubmission {
        project_name: config.project_name.clone(),
        branch: config.branch.clone(),
        commit_hash: config.commit_hash.clone(),
        duration: config.duration,
        summary: SubmissionSummary::new(summary, tests),
    })
}

/// Read and decode an Istanbul `coverage-final.json` map.
fn read_coverage_map(path: &Path) -> AppResult<HashMap<String, RawFileCoverage>> {
    let content = fs::read_to_string(path).map_err(|source| AppError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|e| AppError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Resolve test counts, trying sources in order:
///
/// 1. the json-summary file's `total.tests` structure;
/// 2. the Jest results file's `numTotalTests`/`numPassedTests`/`numFailedTests`;
/// 3. zeroed stats with a warning.
///
/// A file that is missing, unreadable or lacks the expected fields falls
/// through to the next tier; test-stats absence never blocks submission.
pub fn read_test_stats(summary_path: &Path, results_path: &Path) -> TestStats {
    if let Some(stats) = stats_from_summary(summary_path) {
        info!("Read test results from {}", summary_path.display());
        return stats;
    }

    if let Some(stats) = stats_from_results(results_path) {
        info!("Read test results from {}", results_path.display());
        return stats;
    }

    warn!("No test results found, submitting zeroed test counts. Run tests with coverage first.");
    TestStats::default()
}

/// json-summary format: a `total` object that may carry test counts.
#[derive(Debug, Deserialize)]
struct SummaryFile {
    total: Option<SummaryTotals>,
}

#[derive(Debug, Deserialize)]
struct SummaryTotals {
    tests: Option<SummaryTestCounts>,
}

#[derive(Debug, Deserialize)]
struct SummaryTestCounts {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    passed: u64,
    #[serde(default)]
    failed: u64,
}

fn stats_from_summary(path: &Path) -> Option<TestStats> {
    let content = read_optional(path)?;
    let summary: SummaryFile = match serde_json::from_str(&content) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Ignoring malformed {}: {}", path.display(), e);
            return None;
        }
    };

    let counts = summary.total?.tests?;
    Some(TestStats {
        total: counts.total,
        passed: counts.passed,
        failed: counts.failed,
    })
}

/// Jest `--json` output shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JestResultsFile {
    num_total_tests: Option<u64>,
    #[serde(default)]
    num_passed_tests: u64,
    #[serde(default)]
    num_failed_tests: u64,
}

fn stats_from_results(path: &Path) -> Option<TestStats> {
    let content = read_optional(path)?;
    let results: JestResultsFile = match serde_json::from_str(&content) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Ignoring malformed {}: {}", path.display(), e);
            return None;
        }
    };

    let total = results.num_total_tests?;
    Some(TestStats {
        total,
        passed: results.num_passed_tests,
        failed: results.num_failed_tests,
    })
}

fn read_optional(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("{} not present", path.display());
            None
        }
        Err(e) => {
            warn!("Could not read {}: {}", path.display(), e);
            None
        }
    }
}
