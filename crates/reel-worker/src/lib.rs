//! Reel pipeline orchestration.
//!
//! Wires the media layer to the external providers: transcription,
//! highlight selection, and a caller-supplied notification sink. The
//! pipeline itself is strictly sequential; one segment is cut and
//! verified before the next begins.

pub mod config;
pub mod error;
pub mod extract;
pub mod highlights;
pub mod notify;
pub mod pipeline;
pub mod transcribe;

pub use config::PipelineConfig;
pub use error::{WorkerError, WorkerResult};
pub use extract::extract_segments;
pub use highlights::{HighlightProvider, OpenAiClient};
pub use notify::{MemorySink, Notice, NoticeLevel, NotificationSink, TracingSink};
pub use pipeline::{PipelineReport, ReelOutcome, ReelPipeline};
pub use transcribe::{TranscriptionProvider, WhisperClient};
