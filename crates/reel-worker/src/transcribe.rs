//! Transcription provider.
//!
//! Audio goes to the OpenAI `audio/transcriptions` endpoint as a
//! multipart upload; the response text is the sole input to segment
//! extraction downstream.

use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use tracing::info;

use crate::error::{WorkerError, WorkerResult};

/// Default transcription model.
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";

/// Source of transcripts for the pipeline.
#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    /// Transcribe the audio file at `audio_path` to plain text.
    async fn transcribe(&self, audio_path: &Path) -> WorkerResult<String>;
}

/// OpenAI Whisper API client.
pub struct WhisperClient {
    api_key: String,
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl WhisperClient {
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

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[async_trait]
impl TranscriptionProvider for WhisperClient {
    async fn transcribe(&self, audio_path: &Path) -> WorkerResult<String> {
        info!("Transcribing {}", audio_path.display());

        let bytes = tokio::fs::read(audio_path).await?;
        let file_name = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.mp3")
            .to_string();

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("audio/mpeg")?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("response_format", "json");

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WorkerError::transcription_failed(format!(
                "API error ({}): {}",
                status, body
            )));
        }

        let parsed: TranscriptionResponse = response.json().await?;
        Ok(parsed.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_transcribe_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "text": "hello from the video"
                })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::TempDir::new().unwrap();
        let audio = dir.path().join("audio.mp3");
        tokio::fs::write(&audio, b"fake audio bytes").await.unwrap();

        let client = WhisperClient::new("test-key", server.uri(), DEFAULT_TRANSCRIPTION_MODEL);
        let text = client.transcribe(&audio).await.unwrap();
        assert_eq!(text, "hello from the video");
    }

    #[tokio::test]
    async fn test_transcribe_surfaces_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let dir = tempfile::TempDir::new().unwrap();
        let audio = dir.path().join("audio.mp3");
        tokio::fs::write(&audio, b"fake audio bytes").await.unwrap();

        let client = WhisperClient::new("test-key", server.uri(), DEFAULT_TRANSCRIPTION_MODEL);
        let err = client.transcribe(&audio).await.unwrap_err();
        assert!(matches!(err, WorkerError::TranscriptionFailed(_)));
        assert!(err.to_string().contains("401"));
    }
}
