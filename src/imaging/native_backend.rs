//! Production media backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, BMP, WebP) | `image::ImageReader`, format sniffed from content |
//! | Colour normalization | `DynamicImage::into_rgb8` (alpha dropped) |
//! | Probe video | system `ffprobe`, JSON output |
//! | Read one video frame | system `ffmpeg`, raw `rgb24` on stdout |

use super::backend::{BackendError, MediaBackend, VideoInfo};
use super::frame::Frame;
use super::video::VideoTools;
use image::ImageReader;
use std::path::Path;

/// Backend used outside of tests.
///
/// See the [module docs](self) for the crate-to-operation mapping.
#[derive(Debug, Clone, Default)]
pub struct NativeBackend {
    tools: VideoTools,
}

impl NativeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tools(tools: VideoTools) -> Self {
        Self { tools }
    }

    pub fn tools(&self) -> &VideoTools {
        &self.tools
    }
}

impl MediaBackend for NativeBackend {
    fn decode_image(&self, path: &Path) -> Result<Frame, BackendError> {
        // Sniff the real format: files in the wild are often misnamed.
        let reader = ImageReader::open(path)?.with_guessed_format()?;
        let decoded = reader
            .decode()
            .map_err(|e| BackendError::decode(path, e))?;
        Ok(decoded.into_rgb8())
    }

    fn probe_video(&self, path: &Path) -> Result<VideoInfo, BackendError> {
        self.tools.probe(path)
    }

    fn read_video_frame(
        &self,
        path: &Path,
        info: &VideoInfo,
        index: u64,
    ) -> Result<Frame, BackendError> {
        self.tools.read_frame(path, info, index)
    }
}
