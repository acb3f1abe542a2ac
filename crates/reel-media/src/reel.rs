//! The reel transform: cut a window out of a source video and fit it to
//! the target portrait frame, preserving aspect ratio via
//! letterbox/pillarbox padding.

use std::path::{Path, PathBuf};
use tracing::info;

use reel_models::{EncodingConfig, FrameSize, TimeWindow};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};
use crate::probe::probe_video;

/// Default cap on reel length in seconds.
pub const DEFAULT_MAX_REEL_SECS: f64 = 30.0;

/// Minimum reel duration in seconds after clamping.
pub const MIN_REEL_SECS: f64 = 1.0;

/// Options for reel creation.
#[derive(Debug, Clone)]
pub struct ReelOptions {
    /// Output frame size
    pub target: FrameSize,
    /// Maximum reel length; longer windows are shrunk, never extended
    pub max_len: f64,
    /// Known source duration, when probed ahead of time
    pub media_duration: Option<f64>,
}

impl Default for ReelOptions {
    fn default() -> Self {
        Self {
            target: FrameSize::REEL,
            max_len: DEFAULT_MAX_REEL_SECS,
            media_duration: None,
        }
    }
}

/// A produced reel file plus probed metadata.
#[derive(Debug, Clone)]
pub struct ReelArtifact {
    pub path: PathBuf,
    pub duration: f64,
    pub width: u32,
    pub height: u32,
    pub size_bytes: u64,
}

/// Validate and clamp a requested window before any transcoding work.
///
/// - Fails when the window starts at or beyond the known media duration.
/// - Clamps the end down to the media duration.
/// - Shrinks windows longer than `max_len` to `[start, start + max_len)`.
/// - Fails when the clamped duration falls under one second.
pub fn resolve_window(
    window: TimeWindow,
    max_len: f64,
    media_duration: Option<f64>,
) -> MediaResult<TimeWindow> {
    let start = window.start();
    let mut end = window.end();

    if let Some(total) = media_duration {
        if start >= total {
            return Err(MediaError::InvalidWindow {
                start,
                media_duration: total,
            });
        }
        if end > total {
            end = total;
        }
    }

    if end - start > max_len {
        end = start + max_len;
    }

    let duration = end - start;
    if duration < MIN_REEL_SECS {
        return Err(MediaError::SegmentTooShort { duration });
    }

    TimeWindow::new(start, end).ok_or(MediaError::SegmentTooShort { duration })
}

/// How a source frame maps onto the target box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalePlan {
    /// Source frame after uniform scaling; never exceeds the target box
    pub scaled: FrameSize,
    /// Output frame
    pub target: FrameSize,
}

impl ScalePlan {
    /// Compute the uniform scale `min(tw/ow, th/oh)` and the resulting
    /// frame. Dimensions are floored and rounded down to even values;
    /// libx264 rejects odd frame sizes, and rounding down only ever
    /// shrinks.
    pub fn compute(source: FrameSize, target: FrameSize) -> Self {
        let scale = f64::min(
            target.width as f64 / source.width as f64,
            target.height as f64 / source.height as f64,
        );
        let width = (((source.width as f64 * scale) as u32) & !1).max(2);
        let height = (((source.height as f64 * scale) as u32) & !1).max(2);
        Self {
            scaled: FrameSize::new(width, height),
            target,
        }
    }

    /// True when the scaled frame leaves a gap on either axis.
    pub fn needs_padding(&self) -> bool {
        self.scaled.width < self.target.width || self.scaled.height < self.target.height
    }

    /// FFmpeg video filter realizing this plan: scale, then center on a
    /// black canvas of exactly the target size when padding is needed.
    pub fn filter(&self) -> String {
        if self.needs_padding() {
            let x = (self.target.width - self.scaled.width) / 2;
            let y = (self.target.height - self.scaled.height) / 2;
            format!(
                "scale={}:{},pad={}:{}:{}:{}:black",
                self.scaled.width, self.scaled.height, self.target.width, self.target.height, x, y
            )
        } else {
            format!("scale={}:{}", self.scaled.width, self.scaled.height)
        }
    }
}

/// Cut `window` out of `input` and encode it into the target frame at
/// `output`.
///
/// The window is validated and clamped first; no FFmpeg work happens for
/// rejected windows. On success the output is probed and returned as a
/// [`ReelArtifact`].
pub async fn create_reel(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    window: TimeWindow,
    opts: &ReelOptions,
    encoding: &EncodingConfig,
) -> MediaResult<ReelArtifact> {
    let input = input.as_ref();
    let output = output.as_ref();

    let window = resolve_window(window, opts.max_len, opts.media_duration)?;

    let info = probe_video(input).await?;
    if info.width == 0 || info.height == 0 {
        return Err(MediaError::InvalidVideo(format!(
            "source reports {}x{} frame",
            info.width, info.height
        )));
    }

    let plan = ScalePlan::compute(FrameSize::new(info.width, info.height), opts.target);

    info!(
        "Creating reel: {} -> {} ({}, {} -> {})",
        input.display(),
        output.display(),
        window,
        plan.scaled,
        plan.target
    );

    let cmd = FfmpegCommand::new(input, output)
        .seek(window.start())
        .duration(window.duration())
        .video_filter(plan.filter())
        .output_args(encoding.to_ffmpeg_args());

    FfmpegRunner::new().run(&cmd).await?;

    let out = probe_video(output).await?;
    Ok(ReelArtifact {
        path: output.to_path_buf(),
        duration: out.duration,
        width: out.width,
        height: out.height,
        size_bytes: out.size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_window_passthrough() {
        let w = TimeWindow::new(10.0, 25.0).unwrap();
        let resolved = resolve_window(w, 30.0, Some(100.0)).unwrap();
        assert_eq!(resolved, w);
    }

    #[test]
    fn test_resolve_window_caps_at_max_len() {
        let w = TimeWindow::new(10.0, 90.0).unwrap();
        let resolved = resolve_window(w, 30.0, Some(120.0)).unwrap();
        assert_eq!(resolved.start(), 10.0);
        assert!((resolved.duration() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_window_clamps_end_to_media_duration() {
        let w = TimeWindow::new(5.0, 40.0).unwrap();
        let resolved = resolve_window(w, 60.0, Some(30.0)).unwrap();
        assert_eq!(resolved.end(), 30.0);
    }

    #[test]
    fn test_resolve_window_start_beyond_duration() {
        let w = TimeWindow::new(35.0, 50.0).unwrap();
        let err = resolve_window(w, 30.0, Some(30.0)).unwrap_err();
        assert!(matches!(err, MediaError::InvalidWindow { .. }));
    }

    #[test]
    fn test_resolve_window_too_short() {
        let w = TimeWindow::new(29.5, 45.0).unwrap();
        let err = resolve_window(w, 30.0, Some(30.0)).unwrap_err();
        assert!(matches!(err, MediaError::SegmentTooShort { .. }));
    }

    #[test]
    fn test_scale_plan_landscape_source_letterboxes() {
        // 1920x1080 into 1080x1920: width binds, scale = 0.5625.
        let plan = ScalePlan::compute(FrameSize::new(1920, 1080), FrameSize::REEL);
        assert_eq!(plan.scaled, FrameSize::new(1080, 606));
        assert!(plan.needs_padding());
        assert_eq!(plan.filter(), "scale=1080:606,pad=1080:1920:0:657:black");
    }

    #[test]
    fn test_scale_plan_portrait_source_fills_box() {
        let plan = ScalePlan::compute(FrameSize::new(1080, 1920), FrameSize::REEL);
        assert_eq!(plan.scaled, FrameSize::REEL);
        assert!(!plan.needs_padding());
        assert_eq!(plan.filter(), "scale=1080:1920");
    }

    #[test]
    fn test_scale_plan_never_exceeds_target_box() {
        let sources = [
            (1920, 1080),
            (1280, 720),
            (640, 480),
            (1080, 1920),
            (720, 1280),
            (3840, 2160),
            (101, 99),
        ];
        for (w, h) in sources {
            let plan = ScalePlan::compute(FrameSize::new(w, h), FrameSize::REEL);
            assert!(plan.scaled.width <= plan.target.width, "{}x{}", w, h);
            assert!(plan.scaled.height <= plan.target.height, "{}x{}", w, h);
            assert_eq!(plan.scaled.width % 2, 0);
            assert_eq!(plan.scaled.height % 2, 0);
        }
    }

    #[test]
    fn test_scale_plan_pad_centers_exactly() {
        let plan = ScalePlan::compute(FrameSize::new(1280, 720), FrameSize::REEL);
        // 1280x720 -> 1080x606 (floor to even), pad fills to 1080x1920.
        let x = (plan.target.width - plan.scaled.width) / 2;
        let y = (plan.target.height - plan.scaled.height) / 2;
        assert!(plan
            .filter()
            .ends_with(&format!("pad=1080:1920:{}:{}:black", x, y)));
    }
}
