//! Domain error types for the coverage reporter.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use std::path::PathBuf;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Coverage or test-result file missing or unreadable
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON or missing expected fields in a coverage record
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Pre-flight connectivity probe against the backend failed
    #[error("Cannot connect to coverage API at {url}: {message}")]
    Connectivity { url: String, message: String },

    /// Coverage POST was rejected or never reached the backend
    #[error("Coverage submission failed{}: {body}", status_suffix(.status))]
    Submission { status: Option<u16>, body: String },

    /// A dashboard read endpoint returned a non-2xx status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The backend was unreachable on a dashboard read
    #[error("Network error: {0}")]
    Network(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {})", code),
        None => String::new(),
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_error_includes_status_when_present() {
        let err = AppError::Submission {
            status: Some(422),
            body: "bad payload".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("HTTP 422"));
        assert!(msg.contains("bad payload"));
    }

    #[test]
    fn test_submission_error_without_status() {
        let err = AppError::Submission {
            status: None,
            body: "connection reset".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Coverage submission failed: connection reset"
        );
    }

    #[test]
    fn test_file_read_error_shows_path() {
        let err = AppError::FileRead {
            path: PathBuf::from("./coverage/coverage-final.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().contains("coverage-final.json"));
    }
}
