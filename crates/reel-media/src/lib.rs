//! FFmpeg CLI wrapper for the reel pipeline.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building
//! - Video probing via ffprobe
//! - The reel transform (cut, scale, letterbox/pillarbox to the target frame)
//! - Quality verification of produced reels
//! - ZIP archiving of reel batches
//! - Audio extraction and yt-dlp download glue

pub mod archive;
pub mod audio;
pub mod command;
pub mod download;
pub mod error;
pub mod probe;
pub mod reel;
pub mod verify;

pub use archive::build_archive;
pub use audio::extract_audio;
pub use command::{check_ffmpeg, check_ffprobe, check_ytdlp, FfmpegCommand, FfmpegRunner};
pub use download::download_video;
pub use error::{MediaError, MediaResult};
pub use probe::{get_duration, probe_video, VideoInfo};
pub use reel::{create_reel, resolve_window, ReelArtifact, ReelOptions, ScalePlan};
pub use verify::{verify_reel, DURATION_TOLERANCE_SECS};
