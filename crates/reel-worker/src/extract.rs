//! Segment extraction from highlight text.
//!
//! The highlight provider returns free-form prose expected to contain
//! bracketed `[start] - [end]` pairs. This module scans for those pairs,
//! parses them leniently, and turns the survivors into ordered segments.

use std::sync::OnceLock;

use regex::Regex;

use reel_models::{parse_timestamp_or_zero, Segment, TimeWindow};

use crate::notify::NotificationSink;

/// Two bracketed tokens separated by a hyphen, whitespace-tolerant.
fn window_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[([^\]]+)\]\s*-\s*\[([^\]]+)\]").unwrap())
}

/// Extract highlight segments from model text.
///
/// Matches are processed in order of appearance and the output keeps
/// that order; nothing is sorted, deduplicated, or merged. Pairs whose
/// start is not strictly before their end are dropped silently
/// (malformed tokens parse as zero, so they usually die here). When
/// `max_duration` is known, windows starting at or beyond it are
/// dropped and ends beyond it are clamped, each with a warning to the
/// sink naming the offending pair.
///
/// Empty input or no matches yields an empty list, not an error. The
/// function is a pure function of its arguments; re-running it yields
/// identical output.
pub fn extract_segments(
    text: &str,
    max_duration: Option<f64>,
    sink: &dyn NotificationSink,
) -> Vec<Segment> {
    let mut segments = Vec::new();

    for caps in window_pattern().captures_iter(text) {
        let start_str = caps[1].trim().to_string();
        let end_str = caps[2].trim().to_string();
        let start = parse_timestamp_or_zero(&start_str);
        let mut end = parse_timestamp_or_zero(&end_str);

        if start >= end {
            continue;
        }

        if let Some(total) = max_duration {
            if start >= total {
                sink.warn(&format!(
                    "Skipping segment {}-{}: starts after video ends ({:.1}s)",
                    start_str, end_str, total
                ));
                continue;
            }
            if end > total {
                sink.warn(&format!(
                    "Adjusting end time for segment {}-{}: was beyond video duration",
                    start_str, end_str
                ));
                end = total;
            }
        }

        if let Some(window) = TimeWindow::new(start, end) {
            segments.push(Segment::new(window, segments.len()));
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemorySink;

    fn windows(segments: &[Segment]) -> Vec<(f64, f64)> {
        segments
            .iter()
            .map(|s| (s.window.start(), s.window.end()))
            .collect()
    }

    #[test]
    fn test_extract_drops_inverted_pairs() {
        let sink = MemorySink::new();
        let text = "[00:10] - [00:20] great moment [00:05]-[00:02] junk";
        let segments = extract_segments(text, None, &sink);

        assert_eq!(windows(&segments), vec![(10.0, 20.0)]);
        assert!(sink.warnings().is_empty());
    }

    #[test]
    fn test_extract_clamps_end_with_warning() {
        let sink = MemorySink::new();
        let segments = extract_segments("[00:05] - [00:40]", Some(30.0), &sink);

        assert_eq!(windows(&segments), vec![(5.0, 30.0)]);
        let warnings = sink.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Adjusting end time"));
    }

    #[test]
    fn test_extract_skips_window_past_duration() {
        let sink = MemorySink::new();
        let segments = extract_segments("[00:35] - [00:50]", Some(30.0), &sink);

        assert!(segments.is_empty());
        let warnings = sink.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Skipping segment"));
    }

    #[test]
    fn test_extract_keeps_source_order_and_indexes() {
        let sink = MemorySink::new();
        let text = "best part [01:00] - [01:10], earlier [00:10] - [00:20]";
        let segments = extract_segments(text, None, &sink);

        assert_eq!(windows(&segments), vec![(60.0, 70.0), (10.0, 20.0)]);
        assert_eq!(segments[0].output_name(), "reel_1");
        assert_eq!(segments[1].output_name(), "reel_2");
    }

    #[test]
    fn test_extract_tolerates_surrounding_prose() {
        let sink = MemorySink::new();
        let text = "Here are the highlights:\n\
                    1. The big reveal [00:15] - [00:25] is gold.\n\
                    2. Strong closer: [12s]-[22.5s].";
        let segments = extract_segments(text, None, &sink);

        assert_eq!(windows(&segments), vec![(15.0, 25.0), (12.0, 22.5)]);
    }

    #[test]
    fn test_extract_malformed_token_becomes_zero() {
        // Historical lenient behavior: an unparseable start token becomes
        // 0.0 and the pair survives as a zero-anchored window.
        let sink = MemorySink::new();
        let segments = extract_segments("[abc] - [00:10]", None, &sink);

        assert_eq!(windows(&segments), vec![(0.0, 10.0)]);
    }

    #[test]
    fn test_extract_no_matches() {
        let sink = MemorySink::new();
        assert!(extract_segments("", None, &sink).is_empty());
        assert!(extract_segments("no timestamps here", Some(30.0), &sink).is_empty());
    }

    #[test]
    fn test_extract_is_idempotent() {
        let sink = MemorySink::new();
        let text = "[00:05] - [00:40] and [00:50] - [01:10]";
        let first = extract_segments(text, Some(60.0), &sink);
        let second = extract_segments(text, Some(60.0), &sink);

        assert_eq!(first, second);
    }

    #[test]
    fn test_extract_allows_overlapping_windows() {
        let sink = MemorySink::new();
        let text = "[00:10] - [00:30] then again [00:20] - [00:40]";
        let segments = extract_segments(text, None, &sink);

        assert_eq!(windows(&segments), vec![(10.0, 30.0), (20.0, 40.0)]);
    }
}
