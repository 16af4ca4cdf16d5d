//! Write-path services: coverage aggregation, payload construction and
//! submission to the backend.

pub mod loader;
pub mod parser;
pub mod submission;

pub use submission::{run_report, SubmissionClient};
