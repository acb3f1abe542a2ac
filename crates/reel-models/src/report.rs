//! Quality reports for produced reels.

use serde::{Deserialize, Serialize};

/// Conformance report for a single produced reel.
///
/// Built once by the verifier and never mutated afterwards. `issues`
/// keeps human-readable findings in the order they were detected;
/// advisory entries (too short / too long) do not affect the booleans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityReport {
    /// Output file is present on disk
    pub file_exists: bool,
    /// Actual duration within tolerance of the expected window
    pub duration_check: bool,
    /// Frame size exactly matches the target
    pub resolution_check: bool,
    /// File size in megabytes, rounded to two decimals
    pub file_size_mb: f64,
    /// Ordered human-readable findings
    pub issues: Vec<String>,
}

impl QualityReport {
    /// True when the file exists and both hard checks pass.
    pub fn passed(&self) -> bool {
        self.file_exists && self.duration_check && self.resolution_check
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_report_fails() {
        let report = QualityReport::default();
        assert!(!report.passed());
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_passed_requires_all_checks() {
        let report = QualityReport {
            file_exists: true,
            duration_check: true,
            resolution_check: true,
            file_size_mb: 1.25,
            issues: vec!["reel too short (< 5s)".to_string()],
        };
        // Advisory issues do not flip the overall verdict.
        assert!(report.passed());

        let report = QualityReport {
            resolution_check: false,
            ..report
        };
        assert!(!report.passed());
    }

    #[test]
    fn test_report_serializes() {
        let report = QualityReport {
            file_exists: true,
            duration_check: false,
            resolution_check: false,
            file_size_mb: 0.05,
            issues: vec!["file size too small".to_string()],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("file_size_mb"));
        assert!(json.contains("file size too small"));
    }
}
