//! Terminal rendering of the dashboard state.
//!
//! Renderers are pure functions of the state; they are recomputed on every
//! render and never mutate anything. A slice that failed renders an error
//! panel for that slice only; the rest of the dashboard still renders.

use std::fmt::Write;

use crate::dashboard::state::{average_coverage, DashboardState, Slice};
use crate::models::{CoverageResult, CoverageStatus, CoverageTrendPoint, ProjectCoverageSummary};

/// Render the full dashboard.
pub fn render(state: &DashboardState) -> String {
    match &state.summaries {
        Slice::Idle | Slice::Loading { .. } => {
            return "Loading coverage data...\n".to_string();
        }
        Slice::Errored(message) => {
            return render_error_panel("project summaries", message);
        }
        Slice::Loaded(summaries) if summaries.is_empty() => {
            return "No coverage data available.\n\
                    Submit your first coverage report to get started.\n"
                .to_string();
        }
        Slice::Loaded(_) => {}
    }

    let mut out = String::new();
    render_header(state, &mut out);

    if let Some(summaries) = state.summaries.loaded() {
        render_project_cards(state, summaries, &mut out);
    }

    // Detail sections need both the selected project's aggregate and its runs.
    if state.selected_summary().is_some() {
        if let Some(latest) = state.latest_run() {
            render_latest_run(latest, &mut out);
            render_test_results(latest, &mut out);
        }
    }

    render_trend(state, &mut out);
    render_recent_runs(state, &mut out);

    out
}

/// Error panel for one failed data slice, with a manual-retry hint.
pub fn render_error_panel(slice_name: &str, message: &str) -> String {
    format!(
        "Error loading {}\n  {}\n  Check that the backend is running, then retry.\n",
        slice_name, message
    )
}

fn render_header(state: &DashboardState, out: &mut String) {
    let _ = writeln!(out, "=== Test Coverage Dashboard ===");
    let _ = writeln!(
        out,
        "Project: {}   Time range: {}",
        state.selected_project().unwrap_or("(none)"),
        state.time_range().label()
    );
    let _ = writeln!(out);
}

fn render_project_cards(
    state: &DashboardState,
    summaries: &[ProjectCoverageSummary],
    out: &mut String,
) {
    let _ = writeln!(out, "Projects");
    for summary in summaries {
        let selected = state.selected_project() == Some(summary.project_name.as_str());
        let marker = if selected { ">" } else { " " };
        let avg = match state.runs.loaded() {
            Some(runs) if selected => average_coverage(runs),
            _ => {
                (summary.avg_statements
                    + summary.avg_branches
                    + summary.avg_functions
                    + summary.avg_lines)
                    / 4.0
            }
        };
        let _ = writeln!(
            out,
            "{} {:<24} {:>8}  stmts {:>6} | branch {:>6} | funcs {:>6} | lines {:>6}  ({} runs)",
            marker,
            summary.project_name,
            CoverageStatus::from_pct(avg).to_string(),
            format_pct(summary.avg_statements),
            format_pct(summary.avg_branches),
            format_pct(summary.avg_functions),
            format_pct(summary.avg_lines),
            summary.total_runs,
        );
    }
    let _ = writeln!(out);
}

fn render_latest_run(latest: &CoverageResult, out: &mut String) {
    let _ = writeln!(
        out,
        "Latest run  ({} @ {} on {})",
        latest.short_commit(),
        latest.branch,
        latest.created_at.format("%b %d, %Y %H:%M")
    );
    for (label, value) in [
        ("Statements", latest.statements_coverage),
        ("Branches", latest.branches_coverage),
        ("Functions", latest.functions_coverage),
        ("Lines", latest.lines_coverage),
    ] {
        let _ = writeln!(
            out,
            "  {:<12} {:>7}  [{}]",
            label,
            format_pct(value),
            CoverageStatus::from_pct(value)
        );
    }
    let _ = writeln!(out);
}

fn render_test_results(latest: &CoverageResult, out: &mut String) {
    let _ = writeln!(
        out,
        "Tests: {} passed, {} failed, {} total",
        latest.passed_tests, latest.failed_tests, latest.total_tests
    );
    let _ = writeln!(out);
}

fn render_trend(state: &DashboardState, out: &mut String) {
    let _ = writeln!(out, "Coverage trend ({})", state.time_range().label());
    match &state.trend {
        Slice::Idle | Slice::Loading { .. } => {
            let _ = writeln!(out, "  loading...");
        }
        Slice::Errored(message) => {
            out.push_str(&indent(&render_error_panel("trend data", message)));
        }
        Slice::Loaded(points) if points.is_empty() => {
            let _ = writeln!(out, "  No trend data available.");
            let _ = writeln!(out, "  Submit more coverage reports to see trends.");
        }
        Slice::Loaded(points) => {
            let _ = writeln!(
                out,
                "  {:<12} {:>8} {:>8} {:>8} {:>8}",
                "date", "stmts", "branch", "funcs", "lines"
            );
            for point in points {
                render_trend_point(point, out);
            }
        }
    }
    let _ = writeln!(out);
}

fn render_trend_point(point: &CoverageTrendPoint, out: &mut String) {
    let _ = writeln!(
        out,
        "  {:<12} {:>8} {:>8} {:>8} {:>8}",
        point.date,
        format_pct(point.statements),
        format_pct(point.branches),
        format_pct(point.functions),
        format_pct(point.lines)
    );
}

/// Newest ten runs of the selected project.
fn render_recent_runs(state: &DashboardState, out: &mut String) {
    let _ = writeln!(out, "Recent runs");
    match &state.runs {
        Slice::Idle | Slice::Loading { .. } => {
            let _ = writeln!(out, "  loading...");
        }
        Slice::Errored(message) => {
            out.push_str(&indent(&render_error_panel("run history", message)));
        }
        Slice::Loaded(runs) if runs.is_empty() => {
            let _ = writeln!(out, "  No runs recorded.");
        }
        Slice::Loaded(runs) => {
            let _ = writeln!(
                out,
                "  {:<17} {:<12} {:<8} {:>7} {:>7} {:>7} {:>7}  {}",
                "date", "branch", "commit", "stmts", "branch", "funcs", "lines", "tests"
            );
            for run in runs.iter().take(10) {
                let pass_ratio = if run.total_tests > 0 {
                    format!(
                        "{}/{} ({:.0}%)",
                        run.passed_tests,
                        run.total_tests,
                        run.passed_tests as f64 / run.total_tests as f64 * 100.0
                    )
                } else {
                    format!("{}/{}", run.passed_tests, run.total_tests)
                };
                let _ = writeln!(
                    out,
                    "  {:<17} {:<12} {:<8} {:>7} {:>7} {:>7} {:>7}  {}",
                    run.created_at.format("%Y-%m-%d %H:%M").to_string(),
                    run.branch,
                    run.short_commit(),
                    format_pct(run.statements_coverage),
                    format_pct(run.branches_coverage),
                    format_pct(run.functions_coverage),
                    format_pct(run.lines_coverage),
                    pass_ratio
                );
            }
            if runs.len() > 10 {
                let _ = writeln!(out, "  ... and {} more runs", runs.len() - 10);
            }
        }
    }
}

/// One-decimal percentage, e.g. `82.5%`.
pub fn format_pct(value: f64) -> String {
    format!("{:.1}%", value)
}

fn indent(block: &str) -> String {
    block
        .lines()
        .map(|line| format!("  {}\n", line))
        .collect()
}
