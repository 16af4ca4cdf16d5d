//! Read-path models: persisted runs, per-project aggregates and trend series
//! as returned by the backend.

use chrono::NaiveDateTime;
use serde::Deserialize;

/// A persisted coverage run with flattened percentages.
///
/// Owned by the backend; the dashboard holds read-only copies for the current
/// session. Timestamps arrive as ISO local date-times without a zone.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageResult {
    pub id: i64,
    pub project_name: String,
    pub branch: String,
    pub commit_hash: String,
    pub statements_coverage: f64,
    pub branches_coverage: f64,
    pub functions_coverage: f64,
    pub lines_coverage: f64,
    pub total_tests: i64,
    pub passed_tests: i64,
    pub failed_tests: i64,
    /// Test-run duration in seconds
    pub duration: i64,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl CoverageResult {
    /// Mean of the four coverage percentages for this run.
    pub fn average_coverage(&self) -> f64 {
        (self.statements_coverage
            + self.branches_coverage
            + self.functions_coverage
            + self.lines_coverage)
            / 4.0
    }

    /// First seven characters of the commit hash, for compact display.
    pub fn short_commit(&self) -> &str {
        let end = self.commit_hash.len().min(7);
        &self.commit_hash[..end]
    }
}

/// Backend-computed per-project aggregate, refreshed on every dashboard load.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCoverageSummary {
    pub project_name: String,
    pub avg_statements: f64,
    pub avg_branches: f64,
    pub avg_functions: f64,
    pub avg_lines: f64,
    pub last_updated: NaiveDateTime,
    pub total_runs: i64,
    #[serde(default)]
    pub last_commit: Option<String>,
}

/// Wire shape of one trend bucket from `/trend?days=N`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageTrendDto {
    pub date: String,
    pub avg_statements: f64,
    pub avg_branches: f64,
    pub avg_functions: f64,
    pub avg_lines: f64,
}

/// One time-bucketed trend point as charted by the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageTrendPoint {
    pub date: String,
    pub statements: f64,
    pub branches: f64,
    pub functions: f64,
    pub lines: f64,
}

impl From<CoverageTrendDto> for CoverageTrendPoint {
    fn from(dto: CoverageTrendDto) -> Self {
        CoverageTrendPoint {
            date: dto.date,
            statements: dto.avg_statements,
            branches: dto.avg_branches,
            functions: dto.avg_functions,
            lines: dto.avg_lines,
        }
    }
}

/// Backend acknowledgement for a deleted run.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteAck {
    pub message: String,
}
