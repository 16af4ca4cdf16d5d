//! Coverage aggregation over an Istanbul per-file coverage map.
//!
//! Pure arithmetic: no I/O. The caller is responsible for decoding the JSON
//! into typed records first (see `services::loader`).

use std::collections::HashMap;

use crate::models::{CoverageMetric, CoverageSummary, RawFileCoverage};

/// Aggregate a per-file coverage map into a single summary.
///
/// Statements and functions count code points with at least one hit over the
/// total number of code points. Branches flatten every branch point's arm
/// vector and count individually covered arms. Lines reuses the statements
/// tallies verbatim; no line-hit map is consulted.
///
/// Percentages are computed from the covered/total sums across all files,
/// never by averaging per-file percentages, so large files weigh in
/// proportionally.
pub fn aggregate(coverage: &HashMap<String, RawFileCoverage>) -> CoverageSummary {
    let mut statements = Tally::default();
    let mut branches = Tally::default();
    let mut functions = Tally::default();

    for file in coverage.values() {
        statements.add_hits(file.s.values());
        functions.add_hits(file.f.values());
        for arms in file.b.values() {
            branches.add_hits(arms.iter());
        }
    }

    CoverageSummary {
        statements: statements.into_metric(),
        branches: branches.into_metric(),
        functions: functions.into_metric(),
        // Lines coverage is derived from the statements tallies.
        lines: statements.into_metric(),
    }
}

/// Running covered/total counts for one metric category.
#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    covered: u64,
    total: u64,
}

impl Tally {
    fn add_hits<'a>(&mut self, hits: impl Iterator<Item = &'a u64>) {
        for &count in hits {
            self.total += 1;
            if count > 0 {
                self.covered += 1;
            }
        }
    }

    fn into_metric(self) -> CoverageMetric {
        CoverageMetric::new(self.covered, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(s: &[(&str, u64)], f: &[(&str, u64)], b: &[(&str, Vec<u64>)]) -> RawFileCoverage {
        RawFileCoverage {
            s: s.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            f: f.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            b: b.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        }
    }

    #[test]
    fn test_empty_map_yields_all_zero_metrics() {
        let summary = aggregate(&HashMap::new());
        for metric in [
            summary.statements,
            summary.branches,
            summary.functions,
            summary.lines,
        ] {
            assert_eq!(metric.covered, 0);
            assert_eq!(metric.total, 0);
            assert_eq!(metric.pct, 0.0);
        }
    }

    #[test]
    fn test_single_file_worked_example() {
        let mut coverage = HashMap::new();
        coverage.insert(
            "src/app.ts".to_string(),
            file(
                &[("0", 1), ("1", 0), ("2", 3)],
                &[("0", 1)],
                &[("0", vec![1, 0]), ("1", vec![0, 0])],
            ),
        );

        let summary = aggregate(&coverage);

        assert_eq!(summary.statements.covered, 2);
        assert_eq!(summary.statements.total, 3);
        assert!((summary.statements.pct - 200.0 / 3.0).abs() < 1e-9);

        assert_eq!(summary.functions.covered, 1);
        assert_eq!(summary.functions.total, 1);
        assert_eq!(summary.functions.pct, 100.0);

        assert_eq!(summary.branches.covered, 1);
        assert_eq!(summary.branches.total, 4);
        assert_eq!(summary.branches.pct, 25.0);
    }

    #[test]
    fn test_lines_mirror_statements() {
        let mut coverage = HashMap::new();
        coverage.insert(
            "a.ts".to_string(),
            file(&[("0", 5), ("1", 0)], &[], &[]),
        );
        coverage.insert(
            "b.ts".to_string(),
            file(&[("0", 0), ("1", 0), ("2", 1)], &[], &[]),
        );

        let summary = aggregate(&coverage);
        assert_eq!(summary.lines.covered, summary.statements.covered);
        assert_eq!(summary.lines.total, summary.statements.total);
        assert_eq!(summary.lines.pct, summary.statements.pct);
    }

    #[test]
    fn test_pct_from_global_sums_not_per_file_mean() {
        // Small file: 1/1 covered (100%). Large file: 1/9 covered (~11.1%).
        // Mean of per-file percentages would be ~55.6%; global is 2/10 = 20%.
        let mut coverage = HashMap::new();
        coverage.insert("small.ts".to_string(), file(&[("0", 1)], &[], &[]));
        coverage.insert(
            "large.ts".to_string(),
            file(
                &[
                    ("0", 1),
                    ("1", 0),
                    ("2", 0),
                    ("3", 0),
                    ("4", 0),
                    ("5", 0),
                    ("6", 0),
                    ("7", 0),
                    ("8", 0),
                ],
                &[],
                &[],
            ),
        );

        let summary = aggregate(&coverage);
        assert_eq!(summary.statements.covered, 2);
        assert_eq!(summary.statements.total, 10);
        assert!((summary.statements.pct - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_covered_never_exceeds_total() {
        let mut coverage = HashMap::new();
        coverage.insert(
            "a.ts".to_string(),
            file(
                &[("0", 7), ("1", 7)],
                &[("0", 2), ("1", 0)],
                &[("0", vec![3, 3, 3])],
            ),
        );

        let summary = aggregate(&coverage);
        for metric in [
            summary.statements,
            summary.branches,
            summary.functions,
            summary.lines,
        ] {
            assert!(metric.covered <= metric.total);
        }
    }

    #[test]
    fn test_branch_arms_counted_individually() {
        let mut coverage = HashMap::new();
        coverage.insert(
            "a.ts".to_string(),
            file(&[], &[], &[("0", vec![2, 0, 1]), ("1", vec![0])]),
        );

        let summary = aggregate(&coverage);
        assert_eq!(summary.branches.covered, 2);
        assert_eq!(summary.branches.total, 4);
    }
}
