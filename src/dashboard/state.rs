//! Dashboard UI state: selections, per-slice fetch lifecycle and derived
//! values.
//!
//! Each data slice moves through `idle -> loading -> loaded | errored`.
//! Loads carry a monotonically increasing request token; a completion whose
//! token is stale (a newer load for the same slice has started since) is
//! discarded, so out-of-order responses can never overwrite fresher state.

use crate::models::{CoverageResult, CoverageTrendPoint, ProjectCoverageSummary};

/// Selectable trend time ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    Week,
    Month,
    Quarter,
}

impl TimeRange {
    /// Number of days covered by this range.
    pub fn days(&self) -> u32 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
        }
    }

    /// Range matching a day count, when it is one of the supported options.
    pub fn from_days(days: u32) -> Option<Self> {
        match days {
            7 => Some(TimeRange::Week),
            30 => Some(TimeRange::Month),
            90 => Some(TimeRange::Quarter),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Week => "Last 7 days",
            TimeRange::Month => "Last 30 days",
            TimeRange::Quarter => "Last 90 days",
        }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::Month
    }
}

/// Identifies one in-flight load so late completions can be recognized.
pub type RequestToken = u64;

/// Fetch lifecycle for one data slice.
#[derive(Debug, Clone, PartialEq)]
pub enum Slice<T> {
    Idle,
    Loading { token: RequestToken },
    Loaded(T),
    Errored(String),
}

impl<T> Slice<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Slice::Loading { .. })
    }

    /// The loaded value, if this slice holds one.
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Slice::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Slice::Errored(message) => Some(message),
            _ => None,
        }
    }

    /// True when a completion with `token` should be applied: the slice is
    /// still waiting on exactly that load.
    fn accepts(&self, token: RequestToken) -> bool {
        matches!(self, Slice::Loading { token: current } if *current == token)
    }
}

/// All UI state owned by the dashboard.
#[derive(Debug)]
pub struct DashboardState {
    selected_project: Option<String>,
    time_range: TimeRange,
    pub summaries: Slice<Vec<ProjectCoverageSummary>>,
    pub runs: Slice<Vec<CoverageResult>>,
    pub trend: Slice<Vec<CoverageTrendPoint>>,
    next_token: RequestToken,
}

impl DashboardState {
    pub fn new(time_range: TimeRange) -> Self {
        DashboardState {
            selected_project: None,
            time_range,
            summaries: Slice::Idle,
            runs: Slice::Idle,
            trend: Slice::Idle,
            next_token: 0,
        }
    }

    pub fn selected_project(&self) -> Option<&str> {
        self.selected_project.as_deref()
    }

    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    fn issue_token(&mut self) -> RequestToken {
        self.next_token += 1;
        self.next_token
    }

    /// Select a project. Re-selecting the current project is a no-op; a new
    /// selection resets the dependent slices so they reload.
    pub fn select_project(&mut self, project: &str) -> bool {
        if self.selected_project.as_deref() == Some(project) {
            return false;
        }
        self.selected_project = Some(project.to_string());
        self.runs = Slice::Idle;
        self.trend = Slice::Idle;
        true
    }

    /// Change the trend time range. Re-selecting the current range is a
    /// no-op; a new range resets the trend slice so it reloads.
    pub fn select_time_range(&mut self, range: TimeRange) -> bool {
        if self.time_range == range {
            return false;
        }
        self.time_range = range;
        self.trend = Slice::Idle;
        true
    }

    pub fn begin_summaries_load(&mut self) -> RequestToken {
        let token = self.issue_token();
        self.summaries = Slice::Loading { token };
        token
    }

    /// Apply a summaries response. Returns false when the token is stale and
    /// the response was discarded. On first load, selects the first project.
    pub fn summaries_loaded(
        &mut self,
        token: RequestToken,
        data: Vec<ProjectCoverageSummary>,
    ) -> bool {
        if !self.summaries.accepts(token) {
            return false;
        }
        if self.selected_project.is_none() {
            if let Some(first) = data.first() {
                self.selected_project = Some(first.project_name.clone());
            }
        }
        self.summaries = Slice::Loaded(data);
        true
    }

    pub fn summaries_failed(&mut self, token: RequestToken, message: String) -> bool {
        if !self.summaries.accepts(token) {
            return false;
        }
        self.summaries = Slice::Errored(message);
        true
    }

    pub fn begin_runs_load(&mut self) -> RequestToken {
        let token = self.issue_token();
        self.runs = Slice::Loading { token };
        token
    }

    pub fn runs_loaded(&mut self, token: RequestToken, data: Vec<CoverageResult>) -> bool {
        if !self.runs.accepts(token) {
            return false;
        }
        self.runs = Slice::Loaded(data);
        true
    }

    pub fn runs_failed(&mut self, token: RequestToken, message: String) -> bool {
        if !self.runs.accepts(token) {
            return false;
        }
        self.runs = Slice::Errored(message);
        true
    }

    pub fn begin_trend_load(&mut self) -> RequestToken {
        let token = self.issue_token();
        self.trend = Slice::Loading { token };
        token
    }

    pub fn trend_loaded(&mut self, token: RequestToken, data: Vec<CoverageTrendPoint>) -> bool {
        if !self.trend.accepts(token) {
            return false;
        }
        self.trend = Slice::Loaded(data);
        true
    }

    pub fn trend_failed(&mut self, token: RequestToken, message: String) -> bool {
        if !self.trend.accepts(token) {
            return false;
        }
        self.trend = Slice::Errored(message);
        true
    }

    /// Aggregate summary of the selected project, if loaded.
    pub fn selected_summary(&self) -> Option<&ProjectCoverageSummary> {
        let selected = self.selected_project.as_deref()?;
        self.summaries
            .loaded()?
            .iter()
            .find(|summary| summary.project_name == selected)
    }

    /// Most recent run of the selected project, if the run list is loaded.
    /// The backend returns runs newest first.
    pub fn latest_run(&self) -> Option<&CoverageResult> {
        self.runs.loaded()?.first()
    }
}

/// Mean coverage across runs: each run contributes the average of its four
/// metrics; the result is rounded to two decimals. Empty input yields 0.
pub fn average_coverage(runs: &[CoverageResult]) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    let total: f64 = runs.iter().map(CoverageResult::average_coverage).sum();
    (total / runs.len() as f64 * 100.0).round() / 100.0
}
