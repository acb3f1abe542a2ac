//! Shared data models for the reelsmith pipeline.
//!
//! This crate provides:
//! - Timestamp parsing for highlight text
//! - Time windows and output segments
//! - Encoding configuration and the target reel frame
//! - Quality reports for produced reels

pub mod encoding;
pub mod report;
pub mod timestamp;
pub mod window;

// Re-export common types
pub use encoding::{EncodingConfig, FrameSize};
pub use report::QualityReport;
pub use timestamp::{format_mm_ss, parse_timestamp, parse_timestamp_or_zero, TimestampError};
pub use window::{Segment, TimeWindow};
