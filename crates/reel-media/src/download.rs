//! Video download using yt-dlp.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::info;

use crate::command::check_ytdlp;
use crate::error::{MediaError, MediaResult};

/// Fixed stem for downloaded sources; yt-dlp picks the extension.
const DOWNLOAD_STEM: &str = "source";

/// Download a video into `output_dir` and return the downloaded path.
///
/// Prefers an mp4 rendition, falling back to the best available format.
pub async fn download_video(url: &str, output_dir: impl AsRef<Path>) -> MediaResult<PathBuf> {
    let output_dir = output_dir.as_ref();
    check_ytdlp()?;

    tokio::fs::create_dir_all(output_dir).await?;

    let template = output_dir.join(format!("{}.%(ext)s", DOWNLOAD_STEM));
    info!("Downloading video from {}", url);

    let output = Command::new("yt-dlp")
        .args([
            "-f",
            "best[ext=mp4]/best",
            "--no-playlist",
            "--quiet",
            "--no-warnings",
            "-o",
        ])
        .arg(&template)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MediaError::download_failed(stderr.trim().to_string()));
    }

    // yt-dlp may choose any container; find what it actually wrote.
    for entry in std::fs::read_dir(output_dir)? {
        let path = entry?.path();
        if path.file_stem().and_then(|s| s.to_str()) == Some(DOWNLOAD_STEM) && path.is_file() {
            info!("Download complete: {}", path.display());
            return Ok(path);
        }
    }

    Err(MediaError::download_failed(
        "download produced no file".to_string(),
    ))
}
