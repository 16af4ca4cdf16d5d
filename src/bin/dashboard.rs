//! One-shot dashboard CLI.
//!
//! Fetches project summaries, run history and the trend series from the
//! backend, drives the dashboard state through its load transitions and
//! prints the rendered view. A failed summaries fetch is fatal; failures of
//! the other slices render as per-slice error panels.

use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use coverage_reporter::api::{CoverageApi, DateRange, PageParams};
use coverage_reporter::config::Config;
use coverage_reporter::dashboard::{view, DashboardState, TimeRange};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let config = Config::from_env();
    let time_range = TimeRange::from_days(config.dashboard_days).unwrap_or_default();

    let api = match CoverageApi::new(config.api_base()) {
        Ok(api) => api,
        Err(e) => {
            error!("Failed to build API client: {}", e);
            std::process::exit(1);
        }
    };

    let mut state = DashboardState::new(time_range);

    // Summaries drive everything else; without them there is nothing to show.
    let token = state.begin_summaries_load();
    match api.projects_summary().await {
        Ok(summaries) => {
            state.summaries_loaded(token, summaries);
        }
        Err(e) => {
            state.summaries_failed(token, e.to_string());
            print!("{}", view::render(&state));
            std::process::exit(1);
        }
    }

    // Prefer the configured project when it exists in the summaries.
    let has_configured_project = state
        .summaries
        .loaded()
        .map(|summaries| {
            summaries
                .iter()
                .any(|summary| summary.project_name == config.project_name)
        })
        .unwrap_or(false);
    if has_configured_project {
        state.select_project(&config.project_name);
    }

    if let Some(project) = state.selected_project().map(str::to_string) {
        let token = state.begin_runs_load();
        match api
            .project_runs(&project, PageParams::default(), &DateRange::default())
            .await
        {
            Ok(runs) => {
                state.runs_loaded(token, runs);
            }
            Err(e) => {
                state.runs_failed(token, e.to_string());
            }
        }

        let token = state.begin_trend_load();
        match api.project_trend(&project, state.time_range().days()).await {
            Ok(points) => {
                state.trend_loaded(token, points);
            }
            Err(e) => {
                state.trend_failed(token, e.to_string());
            }
        }
    }

    print!("{}", view::render(&state));
}
