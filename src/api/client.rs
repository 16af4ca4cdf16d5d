//! Stateless request wrappers over the backend's coverage endpoints.
//!
//! Every call is one-shot, triggered by a dashboard state change; callers must
//! not assume retries. Responses are decoded into typed models at this
//! boundary so malformed payloads fail fast instead of leaking into the view.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{
    CoverageResult, CoverageSubmission, CoverageTrendDto, CoverageTrendPoint, DeleteAck,
    ProjectCoverageSummary, SubmissionAck,
};

/// HTTP connect timeout for dashboard reads.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP total timeout for dashboard reads.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Pagination query parameters accepted by the listing endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// Date-range query parameters (ISO dates) accepted by the run listing.
#[derive(Debug, Clone, Default)]
pub struct DateRange {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Client for the backend's coverage read endpoints.
pub struct CoverageApi {
    base_url: String,
    http_client: reqwest::Client,
}

impl CoverageApi {
    /// Create a client for the given backend base URL.
    pub fn new(base_url: &str) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(CoverageApi {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// List coverage runs across all projects.
    pub async fn all_projects(&self, page: PageParams) -> AppResult<Vec<CoverageResult>> {
        let url = format!("{}/api/coverage/projects", self.base_url);
        self.get_json(&url, &page_query(page)).await
    }

    /// List runs for one project, newest first, with optional pagination and
    /// date filtering.
    pub async fn project_runs(
        &self,
        project: &str,
        page: PageParams,
        range: &DateRange,
    ) -> AppResult<Vec<CoverageResult>> {
        let url = format!(
            "{}/api/coverage/project/{}",
            self.base_url,
            urlencoding::encode(project)
        );
        let mut query = page_query(page);
        if let Some(ref start) = range.start_date {
            query.push(("startDate".to_string(), start.clone()));
        }
        if let Some(ref end) = range.end_date {
            query.push(("endDate".to_string(), end.clone()));
        }
        self.get_json(&url, &query).await
    }

    /// Fetch the time-bucketed trend series for a project over the last
    /// `days` days, mapped from the wire DTO at this boundary.
    pub async fn project_trend(
        &self,
        project: &str,
        days: u32,
    ) -> AppResult<Vec<CoverageTrendPoint>> {
        let url = format!(
            "{}/api/coverage/project/{}/trend",
            self.base_url,
            urlencoding::encode(project)
        );
        let query = vec![("days".to_string(), days.to_string())];
        let dtos: Vec<CoverageTrendDto> = self.get_json(&url, &query).await?;
        Ok(dtos.into_iter().map(CoverageTrendPoint::from).collect())
    }

    /// Per-project aggregate summaries.
    pub async fn projects_summary(&self) -> AppResult<Vec<ProjectCoverageSummary>> {
        let url = format!("{}/api/coverage/projects/summary", self.base_url);
        self.get_json(&url, &[]).await
    }

    /// Overall aggregate summaries.
    pub async fn overall_summary(&self) -> AppResult<Vec<ProjectCoverageSummary>> {
        let url = format!("{}/api/coverage/summary", self.base_url);
        self.get_json(&url, &[]).await
    }

    /// Most recent run for a project.
    pub async fn latest(&self, project: &str) -> AppResult<CoverageResult> {
        let url = format!(
            "{}/api/coverage/project/{}/latest",
            self.base_url,
            urlencoding::encode(project)
        );
        self.get_json(&url, &[]).await
    }

    /// Delete a run by id.
    pub async fn delete_run(&self, id: i64) -> AppResult<DeleteAck> {
        let url = format!("{}/api/coverage/{}", self.base_url, id);
        let response = self
            .http_client
            .delete(&url)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    /// Submit several coverage records in one request.
    pub async fn submit_bulk(
        &self,
        submissions: &[CoverageSubmission],
    ) -> AppResult<Vec<SubmissionAck>> {
        let url = format!("{}/api/coverage/bulk", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .json(submissions)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> AppResult<T> {
        debug!("GET {}", url);
        let response = self
            .http_client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Http {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(|e| AppError::Http {
            status: status.as_u16(),
            body: format!("invalid response body: {}", e),
        })
    }
}

fn page_query(page: PageParams) -> Vec<(String, String)> {
    let mut query = Vec::new();
    if let Some(number) = page.page {
        query.push(("page".to_string(), number.to_string()));
    }
    if let Some(size) = page.size {
        query.push(("size".to_string(), size.to_string()));
    }
    query
}
