//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Default values used when environment variables are absent.
pub mod defaults {
    pub const PROJECT_NAME: &str = "jest-test-project";
    pub const BRANCH: &str = "main";
    pub const COMMIT_HASH: &str = "unknown";
    pub const DURATION_SECS: u64 = 0;
    pub const API_BASE_URL: &str = "http://localhost:8080";
    pub const DASHBOARD_DAYS: u32 = 30;

    /// Istanbul per-file coverage map, written by Jest's coverage reporter.
    pub const COVERAGE_PATH: &str = "./coverage/coverage-final.json";
    /// Jest json-summary reporter output, first tier of the test-stats fallback chain.
    pub const SUMMARY_PATH: &str = "./coverage/coverage-summary.json";
    /// Jest --json output, second tier of the test-stats fallback chain.
    pub const RESULTS_PATH: &str = "./test-results.json";
}

/// Runtime configuration for both binaries.
///
/// Constructed once at process start and passed down; components never read
/// the environment themselves.
#[derive(Debug, Clone)]
pub struct Config {
    /// Project name recorded with each submission
    pub project_name: String,
    /// Git branch recorded with each submission
    pub branch: String,
    /// Git commit hash recorded with each submission
    pub commit_hash: String,
    /// Test-run duration in seconds
    pub duration: u64,
    /// Base URL of the coverage API backend
    pub api_base_url: String,
    /// Time range (in days) for dashboard trend queries
    pub dashboard_days: u32,
    /// Istanbul coverage-final.json path
    pub coverage_path: PathBuf,
    /// coverage-summary.json path (test-stats tier 1)
    pub summary_path: PathBuf,
    /// test-results.json path (test-stats tier 2)
    pub results_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables:
    /// - `PROJECT_NAME`: project name (default: jest-test-project)
    /// - `BRANCH`: branch name (default: main)
    /// - `COMMIT_HASH`: commit hash (default: unknown)
    /// - `DURATION`: test-run duration in seconds (default: 0)
    /// - `COVERAGE_API_URL`: backend base URL (default: http://localhost:8080)
    /// - `DASHBOARD_DAYS`: trend time range in days (default: 30)
    ///
    /// Missing or malformed values log a warning and fall back to the default;
    /// configuration never aborts a run.
    pub fn from_env() -> Self {
        Config {
            project_name: string_var("PROJECT_NAME", defaults::PROJECT_NAME),
            branch: string_var("BRANCH", defaults::BRANCH),
            commit_hash: string_var("COMMIT_HASH", defaults::COMMIT_HASH),
            duration: parsed_var("DURATION", defaults::DURATION_SECS),
            api_base_url: string_var("COVERAGE_API_URL", defaults::API_BASE_URL),
            dashboard_days: parsed_var("DASHBOARD_DAYS", defaults::DASHBOARD_DAYS),
            coverage_path: PathBuf::from(defaults::COVERAGE_PATH),
            summary_path: PathBuf::from(defaults::SUMMARY_PATH),
            results_path: PathBuf::from(defaults::RESULTS_PATH),
        }
    }

    /// Base URL with any trailing slash removed, for joining endpoint paths.
    pub fn api_base(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}

fn string_var(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => {
            tracing::warn!("{} not set, using default: {}", key, default);
            default.to_string()
        }
    }
}

fn parsed_var<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                tracing::warn!("Invalid {} value: {}, using default: {}", key, value, default);
                default
            }
        },
        Err(_) => {
            tracing::warn!("{} not set, using default: {}", key, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            project_name: "demo".to_string(),
            branch: "main".to_string(),
            commit_hash: "abc1234".to_string(),
            duration: 42,
            api_base_url: "http://localhost:8080/".to_string(),
            dashboard_days: 30,
            coverage_path: PathBuf::from(defaults::COVERAGE_PATH),
            summary_path: PathBuf::from(defaults::SUMMARY_PATH),
            results_path: PathBuf::from(defaults::RESULTS_PATH),
        }
    }

    #[test]
    fn test_api_base_strips_trailing_slash() {
        let config = test_config();
        assert_eq!(config.api_base(), "http://localhost:8080");
    }

    #[test]
    fn test_api_base_keeps_bare_url() {
        let mut config = test_config();
        config.api_base_url = "http://coverage.internal:9090".to_string();
        assert_eq!(config.api_base(), "http://coverage.internal:9090");
    }

    #[test]
    fn test_default_paths() {
        let config = Config::from_env();
        assert_eq!(
            config.coverage_path,
            PathBuf::from("./coverage/coverage-final.json")
        );
        assert_eq!(
            config.summary_path,
            PathBuf::from("./coverage/coverage-summary.json")
        );
        assert_eq!(config.results_path, PathBuf::from("./test-results.json"));
    }
}
