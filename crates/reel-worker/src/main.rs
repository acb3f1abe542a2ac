//! Reelsmith CLI binary.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reel_worker::{
    OpenAiClient, PipelineConfig, ReelPipeline, TracingSink, WhisperClient,
};

#[derive(Parser, Debug)]
#[command(
    name = "reelsmith",
    version,
    about = "Cut transcript-driven vertical reels from a video"
)]
struct Cli {
    /// Local source video file
    input: Option<PathBuf>,

    /// Fetch the source video from a URL instead
    #[arg(long, conflicts_with = "input")]
    url: Option<String>,

    /// Directory that receives the reels and archive
    #[arg(long, default_value = "reels")]
    output_dir: PathBuf,

    /// Maximum reel length in seconds (overrides REEL_MAX_SECS)
    #[arg(long)]
    max_len: Option<f64>,

    /// Keep the temporary working directory after the run
    #[arg(long)]
    keep_workdir: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    reel_media::check_ffmpeg().context("ffmpeg is required")?;
    reel_media::check_ffprobe().context("ffprobe is required")?;

    let mut config = PipelineConfig::from_env()?;
    if let Some(max_len) = cli.max_len {
        if max_len < 1.0 {
            bail!("--max-len must be at least 1 second");
        }
        config.max_reel_secs = max_len;
    }

    // Everything intermediate lives in one scoped directory that is
    // removed on every exit path unless --keep-workdir is set.
    let workdir = tempfile::Builder::new()
        .prefix("reelsmith-")
        .tempdir()
        .context("failed to create working directory")?;

    let source = match (&cli.input, &cli.url) {
        (Some(input), None) => {
            if !input.exists() {
                bail!("input file not found: {}", input.display());
            }
            input.clone()
        }
        (None, Some(url)) => reel_media::download_video(url, workdir.path())
            .await
            .context("video download failed")?,
        _ => bail!("provide a source video path or --url"),
    };

    let transcriber = WhisperClient::new(
        &config.api_key,
        &config.api_base_url,
        &config.transcription_model,
    );
    let highlighter = OpenAiClient::new(
        &config.api_key,
        &config.api_base_url,
        &config.highlight_model,
    );

    let sink = TracingSink;
    let pipeline = ReelPipeline::new(&transcriber, &highlighter, &config);
    let report = pipeline.run(&source, workdir.path(), &sink).await?;

    tokio::fs::create_dir_all(&cli.output_dir)
        .await
        .with_context(|| format!("failed to create {}", cli.output_dir.display()))?;

    for outcome in &report.outcomes {
        let file_name = outcome
            .artifact
            .path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(format!("{}.mp4", outcome.segment.output_name())));
        let dest = cli.output_dir.join(&file_name);
        tokio::fs::copy(&outcome.artifact.path, &dest).await?;

        let verdict = if outcome.report.passed() { "ok" } else { "check" };
        info!(
            "{} ({:.1}s, {}x{}, {:.2} MB) [{}]",
            dest.display(),
            outcome.artifact.duration,
            outcome.artifact.width,
            outcome.artifact.height,
            outcome.report.file_size_mb,
            verdict
        );
    }

    if let Some(archive) = &report.archive {
        let dest = cli.output_dir.join("video_reels.zip");
        tokio::fs::copy(archive, &dest).await?;
        info!("Archive: {}", dest.display());
    }

    if report.outcomes.is_empty() {
        info!(
            "No reels produced ({} of {} segment(s) failed)",
            report.failed, report.segments_requested
        );
    }

    if cli.keep_workdir {
        let kept = workdir.into_path();
        info!("Working directory kept at {}", kept.display());
    }

    Ok(())
}

fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}
