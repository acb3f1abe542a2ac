//! Quality verification of produced reels.

use std::path::Path;

use reel_models::{FrameSize, QualityReport, TimeWindow};

use crate::probe::probe_video;

/// Allowed drift between expected and encoded duration, in seconds.
/// Encoders round cuts to keyframe/frame boundaries.
pub const DURATION_TOLERANCE_SECS: f64 = 2.0;

/// Advisory lower bound on reel duration.
const ADVISORY_MIN_SECS: f64 = 5.0;
/// Advisory upper bound on reel duration.
const ADVISORY_MAX_SECS: f64 = 60.0;

/// Flag files under this size as suspicious (encode likely failed).
const MIN_REEL_MEGABYTES: f64 = 0.1;

/// Inspect a produced reel and report whether it conforms to the
/// expected window and target frame.
///
/// Never fails: probing errors are folded into the issue list so the
/// pipeline can keep verifying the remaining reels.
pub async fn verify_reel(
    path: impl AsRef<Path>,
    expected: &TimeWindow,
    target: FrameSize,
) -> QualityReport {
    let path = path.as_ref();
    let mut report = QualityReport::default();

    if !path.exists() {
        report.issues.push("reel file does not exist".to_string());
        return report;
    }
    report.file_exists = true;

    match tokio::fs::metadata(path).await {
        Ok(meta) => {
            let mb = meta.len() as f64 / (1024.0 * 1024.0);
            report.file_size_mb = (mb * 100.0).round() / 100.0;
            if mb < MIN_REEL_MEGABYTES {
                report.issues.push("file size too small".to_string());
            }
        }
        Err(e) => {
            report.issues.push(format!("failed to stat reel: {}", e));
        }
    }

    match probe_video(path).await {
        Ok(info) => {
            let expected_duration = expected.duration();
            if (info.duration - expected_duration).abs() <= DURATION_TOLERANCE_SECS {
                report.duration_check = true;
            } else {
                report.issues.push(format!(
                    "duration mismatch: got {:.1}s, expected {:.1}s",
                    info.duration, expected_duration
                ));
            }

            if info.width == target.width && info.height == target.height {
                report.resolution_check = true;
            } else {
                report
                    .issues
                    .push(format!("wrong resolution: {}x{}", info.width, info.height));
            }

            if info.duration < ADVISORY_MIN_SECS {
                report.issues.push("reel too short (< 5s)".to_string());
            } else if info.duration > ADVISORY_MAX_SECS {
                report.issues.push("reel too long (> 60s)".to_string());
            }
        }
        Err(e) => {
            report.issues.push(format!("error analyzing reel: {}", e));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_verify_missing_file() {
        let expected = TimeWindow::new(0.0, 10.0).unwrap();
        let report = verify_reel("/nonexistent/reel_1.mp4", &expected, FrameSize::REEL).await;

        assert!(!report.file_exists);
        assert!(!report.duration_check);
        assert!(!report.resolution_check);
        assert!(!report.issues.is_empty());
        assert!(!report.passed());
    }

    #[tokio::test]
    async fn test_verify_unreadable_video_reports_issue() {
        // A file that exists but is not a video: size check runs, the
        // probe failure lands in the issue list, and nothing panics.
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("reel_1.mp4");
        tokio::fs::write(&path, b"not a video").await.unwrap();

        let expected = TimeWindow::new(0.0, 10.0).unwrap();
        let report = verify_reel(&path, &expected, FrameSize::REEL).await;

        assert!(report.file_exists);
        assert!(!report.duration_check);
        assert!(!report.resolution_check);
        assert!(report.issues.iter().any(|i| i.contains("file size too small")));
        assert!(report.issues.len() >= 2);
    }
}
