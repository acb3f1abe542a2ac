//! The reel pipeline: transcript → highlights → sequential cut/verify →
//! optional archive.

use std::path::{Path, PathBuf};

use tracing::info;

use reel_media::{
    build_archive, create_reel, extract_audio, get_duration, verify_reel, ReelArtifact,
    ReelOptions,
};
use reel_models::{format_mm_ss, QualityReport, Segment};

use crate::config::PipelineConfig;
use crate::error::WorkerResult;
use crate::extract::extract_segments;
use crate::highlights::HighlightProvider;
use crate::notify::NotificationSink;
use crate::transcribe::TranscriptionProvider;

/// One successfully produced reel with its verification result.
#[derive(Debug)]
pub struct ReelOutcome {
    pub segment: Segment,
    pub artifact: ReelArtifact,
    pub report: QualityReport,
}

/// Result of a full pipeline run.
#[derive(Debug)]
pub struct PipelineReport {
    /// Probed source duration in seconds
    pub media_duration: f64,
    /// Segments the highlight text asked for (after extraction)
    pub segments_requested: usize,
    /// Produced reels, in segment order
    pub outcomes: Vec<ReelOutcome>,
    /// Segments whose transform failed
    pub failed: usize,
    /// Archive path when more than one reel was produced
    pub archive: Option<PathBuf>,
}

/// Orchestrates one source video through the full pipeline.
///
/// Strictly sequential: each segment is cut, verified, and reported
/// before the next begins. A failed transform aborts only its own
/// segment.
pub struct ReelPipeline<'a> {
    transcriber: &'a dyn TranscriptionProvider,
    highlighter: &'a dyn HighlightProvider,
    config: &'a PipelineConfig,
}

impl<'a> ReelPipeline<'a> {
    pub fn new(
        transcriber: &'a dyn TranscriptionProvider,
        highlighter: &'a dyn HighlightProvider,
        config: &'a PipelineConfig,
    ) -> Self {
        Self {
            transcriber,
            highlighter,
            config,
        }
    }

    /// Run the pipeline for `video_path`, placing all intermediate and
    /// output files under `workdir`.
    pub async fn run(
        &self,
        video_path: &Path,
        workdir: &Path,
        sink: &dyn NotificationSink,
    ) -> WorkerResult<PipelineReport> {
        tokio::fs::create_dir_all(workdir).await?;

        let media_duration = get_duration(video_path).await?;
        sink.info(&format!(
            "Video duration: {} ({:.1}s)",
            format_mm_ss(media_duration),
            media_duration
        ));

        let audio_path = workdir.join("audio.mp3");
        info!("Extracting audio to {}", audio_path.display());
        extract_audio(video_path, &audio_path).await?;

        sink.info("Transcribing audio...");
        let transcript = self.transcriber.transcribe(&audio_path).await?;
        info!("Transcript: {} chars", transcript.len());

        sink.info("Selecting highlights...");
        let highlight_text = self
            .highlighter
            .find_highlights(&transcript, media_duration)
            .await?;

        let segments = extract_segments(&highlight_text, Some(media_duration), sink);
        if segments.is_empty() {
            sink.warn("No valid timestamps found. Highlight output may be malformed.");
            return Ok(PipelineReport {
                media_duration,
                segments_requested: 0,
                outcomes: Vec::new(),
                failed: 0,
                archive: None,
            });
        }

        let opts = ReelOptions {
            target: self.config.target,
            max_len: self.config.max_reel_secs,
            media_duration: Some(media_duration),
        };

        let total = segments.len();
        let mut outcomes = Vec::new();
        let mut failed = 0usize;

        for segment in &segments {
            sink.info(&format!("Creating reel {}/{}...", segment.index + 1, total));
            let output = workdir.join(format!("{}.mp4", segment.output_name()));

            match create_reel(
                video_path,
                &output,
                segment.window,
                &opts,
                &self.config.encoding,
            )
            .await
            {
                Ok(artifact) => {
                    let report =
                        verify_reel(&artifact.path, &segment.window, self.config.target).await;
                    for issue in &report.issues {
                        sink.warn(&format!("{}: {}", segment.output_name(), issue));
                    }
                    outcomes.push(ReelOutcome {
                        segment: *segment,
                        artifact,
                        report,
                    });
                }
                Err(e) => {
                    failed += 1;
                    sink.error(&format!(
                        "Error creating {} ({}): {}",
                        segment.output_name(),
                        segment.window,
                        e
                    ));
                }
            }
        }

        let archive = if outcomes.len() > 1 {
            let dest = workdir.join("video_reels.zip");
            let paths: Vec<PathBuf> = outcomes.iter().map(|o| o.artifact.path.clone()).collect();
            Some(build_archive(&paths, &dest)?)
        } else {
            None
        };

        sink.info(&format!(
            "Processed {}/{} reel(s)",
            outcomes.len(),
            total
        ));

        Ok(PipelineReport {
            media_duration,
            segments_requested: total,
            outcomes,
            failed,
            archive,
        })
    }
}
