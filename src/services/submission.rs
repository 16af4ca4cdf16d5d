//! Submission client for the coverage API write path.
//!
//! One connectivity probe, one POST, no retries: a failed run exits non-zero
//! and CI re-triggers the whole submission.

use std::time::Duration;

use tracing::{error, info};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{CoverageSubmission, SubmissionAck};
use crate::services::loader;

/// HTTP connect timeout for all submission-path requests.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP total timeout for all submission-path requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for submitting coverage records to the backend.
pub struct SubmissionClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl SubmissionClient {
    /// Create a client for the given backend base URL.
    pub fn new(base_url: &str) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(SubmissionClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// Pre-flight connectivity probe: a lightweight GET against the projects
    /// listing. Gates submission so backend problems surface before any parse
    /// result is discarded.
    pub async fn test_connection(&self) -> AppResult<()> {
        let url = format!("{}/api/coverage/projects", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Connectivity {
                url: self.base_url.clone(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(AppError::Connectivity {
                url: self.base_url.clone(),
                message: format!("probe returned HTTP {}", response.status().as_u16()),
            });
        }

        info!("Connection test successful");
        Ok(())
    }

    /// POST one coverage submission. Non-2xx responses surface status and body
    /// for diagnostics; there is no automatic retry.
    pub async fn submit(&self, submission: &CoverageSubmission) -> AppResult<SubmissionAck> {
        let url = format!("{}/api/coverage", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .json(submission)
            .send()
            .await
            .map_err(|e| AppError::Submission {
                status: None,
                body: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Submission {
                status: Some(status.as_u16()),
                body,
            });
        }

        response.json().await.map_err(|e| AppError::Submission {
            status: Some(status.as_u16()),
            body: format!("invalid acknowledgement body: {}", e),
        })
    }
}

/// Run one full reporting pass: probe, parse, submit, strictly in that order.
///
/// The probe failing prevents any POST from being issued. Errors propagate to
/// the caller, which is expected to exit non-zero.
pub async fn run_report(config: &Config) -> AppResult<SubmissionAck> {
    let client = SubmissionClient::new(config.api_base())?;

    info!("Starting coverage submission...");
    match client.test_connection().await {
        Ok(()) => info!("Connected to coverage API successfully"),
        Err(e) => {
            error!("Cannot connect to coverage API. Please check your backend.");
            return Err(e);
        }
    }

    let submission = loader::build_submission(config)?;

    info!("Coverage data prepared:");
    info!("Project: {} ({})", submission.project_name, submission.branch);
    info!("Statements: {:.1}%", submission.summary.statements.pct);
    info!("Branches: {:.1}%", submission.summary.branches.pct);
    info!("Functions: {:.1}%", submission.summary.functions.pct);
    info!("Lines: {:.1}%", submission.summary.lines.pct);

    let ack = client.submit(&submission).await?;
    info!("Coverage data submitted successfully: {}", ack.message);
    Ok(ack)
}
