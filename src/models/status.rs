//! Health-status classification from coverage percentages.

use std::fmt;

/// Categorical health label derived from a coverage percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl CoverageStatus {
    /// Classify a percentage: >=80 excellent, >=60 good, >=40 fair, else poor.
    pub fn from_pct(pct: f64) -> Self {
        if pct >= 80.0 {
            CoverageStatus::Excellent
        } else if pct >= 60.0 {
            CoverageStatus::Good
        } else if pct >= 40.0 {
            CoverageStatus::Fair
        } else {
            CoverageStatus::Poor
        }
    }
}

impl fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverageStatus::Excellent => write!(f, "excellent"),
            CoverageStatus::Good => write!(f, "good"),
            CoverageStatus::Fair => write!(f, "fair"),
            CoverageStatus::Poor => write!(f, "poor"),
        }
    }
}
