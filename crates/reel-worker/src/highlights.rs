//! Highlight selection via a chat completion model.
//!
//! The model receives the transcript and the known duration, and
//! replies with free-form text expected to contain `[MM:SS] - [MM:SS]`
//! pairs. The reply is handed to the segment extractor as-is; no
//! structure is imposed here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use reel_models::format_mm_ss;

use crate::error::{WorkerError, WorkerResult};

/// Default chat model.
pub const DEFAULT_HIGHLIGHT_MODEL: &str = "gpt-3.5-turbo";

const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 500;

/// Source of highlight suggestions for a transcript.
#[async_trait]
pub trait HighlightProvider: Send + Sync {
    /// Ask for highlight windows; returns the model's raw reply text.
    async fn find_highlights(&self, transcript: &str, media_duration: f64)
        -> WorkerResult<String>;
}

/// OpenAI chat completions client.
pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a client against the given API base URL (no trailing
    /// slash), e.g. `https://api.openai.com/v1`.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }
}

/// Build the highlight-selection prompt for a transcript.
pub fn build_prompt(transcript: &str, media_duration: f64) -> String {
    format!(
        "Identify 3-5 most engaging moments for social media reels from this transcript.\n\
         \n\
         Timestamps should be within {} ({:.2} seconds total).\n\
         Use [MM:SS] - [MM:SS] format for each highlight.\n\
         \n\
         Transcript:\n\
         {}",
        format_mm_ss(media_duration),
        media_duration,
        transcript
    )
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    content: String,
}

#[async_trait]
impl HighlightProvider for OpenAiClient {
    async fn find_highlights(
        &self,
        transcript: &str,
        media_duration: f64,
    ) -> WorkerResult<String> {
        info!("Requesting highlights from {}", self.model);

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_prompt(transcript, media_duration),
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WorkerError::ai_failed(format!(
                "API error ({}): {}",
                status, body
            )));
        }

        let parsed: ChatResponse = response.json().await?;
        let reply = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| WorkerError::ai_failed("response contained no choices"))?;

        Ok(reply.message.content)
    }
}
