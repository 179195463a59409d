//! Media decoding backend trait and shared types.
//!
//! The [`MediaBackend`] trait defines the three operations frame acquisition
//! needs: decode an image, probe a video container, and read one video frame.
//! Picking *which* frame to read and capping the result stay outside the
//! backend (see [`acquire`](crate::acquire)), so they can be tested against a
//! mock without any real media.
//!
//! The production implementation is
//! [`NativeBackend`](super::native_backend::NativeBackend): the `image` crate
//! for stills, the system `ffprobe`/`ffmpeg` binaries for video.

use super::frame::Frame;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("Failed to probe {path}: {reason}")]
    Probe { path: PathBuf, reason: String },
    #[error("No readable frames in {0}")]
    NoFrames(PathBuf),
    #[error("{tool} did not finish within {seconds}s")]
    Timeout { tool: String, seconds: u64 },
    #[error("{0} could not be started (is it installed and on PATH?)")]
    ToolMissing(String),
}

impl BackendError {
    pub fn decode(path: &Path, reason: impl ToString) -> Self {
        Self::Decode {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn probe(path: &Path, reason: impl ToString) -> Self {
        Self::Probe {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Container-level facts about a video, as reported by a probe.
///
/// Any field the container does not declare is `None`; [`total_frames`]
/// and [`seek_seconds`] derive what they can from the rest.
///
/// [`total_frames`]: VideoInfo::total_frames
/// [`seek_seconds`]: VideoInfo::seek_seconds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
    /// Frame count declared by the stream header.
    pub frame_count: Option<u64>,
    /// Average frames per second.
    pub fps: Option<f64>,
    pub duration_secs: Option<f64>,
}

impl VideoInfo {
    /// Number of addressable frames, or 0 if it cannot be determined.
    ///
    /// Prefers the declared count; containers that omit it (Matroska, most
    /// notably) fall back to `duration × fps`.
    pub fn total_frames(&self) -> u64 {
        if let Some(count) = self.frame_count.filter(|&n| n > 0) {
            return count;
        }
        match (self.duration_secs, self.fps) {
            (Some(duration), Some(fps)) if duration > 0.0 && fps > 0.0 => {
                (duration * fps).floor() as u64
            }
            _ => 0,
        }
    }

    /// Presentation time of frame `index`, in seconds.
    pub fn seek_seconds(&self, index: u64) -> f64 {
        if let Some(fps) = self.fps.filter(|&f| f > 0.0) {
            return index as f64 / fps;
        }
        let total = self.total_frames();
        match self.duration_secs {
            Some(duration) if total > 0 => index as f64 / total as f64 * duration,
            _ => 0.0,
        }
    }
}

/// Trait for media decoding backends.
///
/// Implementations report failures as [`BackendError`] and never substitute
/// placeholder frames themselves; that policy belongs to the caller.
pub trait MediaBackend {
    /// Decode a still image into an RGB frame at its native resolution.
    fn decode_image(&self, path: &Path) -> Result<Frame, BackendError>;

    /// Read container metadata without decoding any frames.
    fn probe_video(&self, path: &Path) -> Result<VideoInfo, BackendError>;

    /// Decode the single frame at `index` (0-based).
    fn read_video_frame(
        &self,
        path: &Path,
        info: &VideoInfo,
        index: u64,
    ) -> Result<Frame, BackendError>;
}
