//! Data models shared between the submission path and the dashboard.

pub mod coverage;
pub mod result;
pub mod status;

pub use coverage::{
    CoverageMetric, CoverageSubmission, CoverageSummary, RawFileCoverage, SubmissionAck,
    SubmissionSummary, TestStats,
};
pub use result::{CoverageResult, CoverageTrendDto, CoverageTrendPoint, DeleteAck, ProjectCoverageSummary};
pub use status::CoverageStatus;
