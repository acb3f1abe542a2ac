//! Pipeline configuration.

use reel_models::{EncodingConfig, FrameSize};

use crate::error::{WorkerError, WorkerResult};
use crate::highlights::DEFAULT_HIGHLIGHT_MODEL;
use crate::transcribe::DEFAULT_TRANSCRIPTION_MODEL;

/// Default API base URL for both providers.
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";

/// Pipeline configuration.
///
/// Everything the pipeline needs travels in here explicitly; there is
/// no ambient session state.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// API key for the transcription and highlight providers
    pub api_key: String,
    /// API base URL (overridable for tests and proxies)
    pub api_base_url: String,
    /// Transcription model name
    pub transcription_model: String,
    /// Highlight-selection model name
    pub highlight_model: String,
    /// Output frame size
    pub target: FrameSize,
    /// Maximum reel length in seconds
    pub max_reel_secs: f64,
    /// Encoder settings for produced reels
    pub encoding: EncodingConfig,
}

impl PipelineConfig {
    /// Create config from environment variables.
    ///
    /// `OPENAI_API_KEY` is required; everything else has defaults.
    pub fn from_env() -> WorkerResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| WorkerError::config_error("OPENAI_API_KEY not set"))?;

        Ok(Self {
            api_key,
            api_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            transcription_model: std::env::var("REEL_TRANSCRIPTION_MODEL")
                .unwrap_or_else(|_| DEFAULT_TRANSCRIPTION_MODEL.to_string()),
            highlight_model: std::env::var("REEL_HIGHLIGHT_MODEL")
                .unwrap_or_else(|_| DEFAULT_HIGHLIGHT_MODEL.to_string()),
            target: FrameSize::REEL,
            max_reel_secs: std::env::var("REEL_MAX_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(reel_media::reel::DEFAULT_MAX_REEL_SECS),
            encoding: EncodingConfig::default(),
        })
    }
}
