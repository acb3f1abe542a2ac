//! Time windows and output segments.

use serde::{Deserialize, Serialize};

/// A `[start, end)` time range in seconds within a source video.
///
/// Invariant: `0 <= start < end`. Construct through [`TimeWindow::new`];
/// the fields are immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    start: f64,
    end: f64,
}

impl TimeWindow {
    /// Create a window, rejecting negative bounds and non-positive
    /// durations.
    pub fn new(start: f64, end: f64) -> Option<Self> {
        if start < 0.0 || end < 0.0 || start >= end {
            return None;
        }
        Some(Self { start, end })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}s-{:.1}s", self.start, self.end)
    }
}

/// A validated, clamped window with a stable position in the extracted
/// list. The index drives deterministic output naming.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub window: TimeWindow,
    pub index: usize,
}

impl Segment {
    pub fn new(window: TimeWindow, index: usize) -> Self {
        Self { window, index }
    }

    /// Deterministic artifact stem: `reel_1`, `reel_2`, ...
    pub fn output_name(&self) -> String {
        format!("reel_{}", self.index + 1)
    }
}
