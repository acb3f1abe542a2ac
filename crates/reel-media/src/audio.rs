//! Audio extraction for transcription.

use std::path::Path;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// Extract the audio track of `video` into `audio_out`.
///
/// The output container is chosen by the extension of `audio_out`
/// (the pipeline uses `.mp3` to keep transcription uploads small).
pub async fn extract_audio(
    video: impl AsRef<Path>,
    audio_out: impl AsRef<Path>,
) -> MediaResult<()> {
    let cmd = FfmpegCommand::new(video.as_ref(), audio_out.as_ref())
        .output_args(["-vn", "-q:a", "0", "-map", "a"]);

    FfmpegRunner::new().run(&cmd).await
}
