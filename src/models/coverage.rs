//! Write-path models: raw Istanbul coverage input and the submission payload.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One source file's entry in an Istanbul `coverage-final.json` map.
///
/// Hit counts are keyed by instrumented-code-point identifier. The `s`, `f`
/// and `b` maps are required; a file record missing any of them fails to
/// decode, which aborts the whole parse (no partial aggregation).
#[derive(Debug, Clone, Deserialize)]
pub struct RawFileCoverage {
    /// Statement hit counts
    pub s: HashMap<String, u64>,
    /// Function hit counts
    pub f: HashMap<String, u64>,
    /// Branch hit counts, one entry per branch arm
    pub b: HashMap<String, Vec<u64>>,
}

/// Covered/total tallies plus the derived percentage for one metric category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageMetric {
    pub covered: u64,
    pub total: u64,
    pub pct: f64,
}

impl CoverageMetric {
    /// Build a metric from tallies; `pct` is 0 when `total` is 0.
    pub fn new(covered: u64, total: u64) -> Self {
        let pct = if total > 0 {
            (covered as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CoverageMetric {
            covered,
            total,
            pct,
        }
    }

    /// All-zero metric.
    pub fn zero() -> Self {
        CoverageMetric::new(0, 0)
    }
}

/// Aggregated coverage over all files, one metric per category.
///
/// `lines` always mirrors `statements`: no independent line-hit map is
/// consulted. This mirrors the reporter the backend was built against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageSummary {
    pub statements: CoverageMetric,
    pub branches: CoverageMetric,
    pub functions: CoverageMetric,
    pub lines: CoverageMetric,
}

impl CoverageSummary {
    /// All-zero summary, used for empty coverage maps.
    pub fn zero() -> Self {
        CoverageSummary {
            statements: CoverageMetric::zero(),
            branches: CoverageMetric::zero(),
            functions: CoverageMetric::zero(),
            lines: CoverageMetric::zero(),
        }
    }
}

/// Test counts attached to a submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestStats {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
}

/// The `summary` object of a submission: four metrics plus test counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionSummary {
    pub statements: CoverageMetric,
    pub branches: CoverageMetric,
    pub functions: CoverageMetric,
    pub lines: CoverageMetric,
    pub tests: TestStats,
}

impl SubmissionSummary {
    /// Combine an aggregated summary with test stats.
    pub fn new(summary: CoverageSummary, tests: TestStats) -> Self {
        SubmissionSummary {
            statements: summary.statements,
            branches: summary.branches,
            functions: summary.functions,
            lines: summary.lines,
            tests,
        }
    }
}

/// One normalized coverage record, POSTed once per reporting run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageSubmission {
    pub project_name: String,
    pub branch: String,
    pub commit_hash: String,
    /// Test-run duration in seconds
    pub duration: u64,
    pub summary: SubmissionSummary,
}

/// Backend acknowledgement for an accepted submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionAck {
    pub message: String,
    pub id: i64,
    pub project: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}
