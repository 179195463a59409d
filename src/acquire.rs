//! Frame acquisition: turn a [`PoolEntry`] into a capped [`Frame`].
//!
//! Acquisition reports failures as a [`DecodeError`] instead of hiding them.
//! The fallback to a placeholder is a separate, explicit step,
//! [`frame_or_placeholder`], which the [`Deck`](crate::deck::Deck) applies at
//! its call site. Tests can therefore tell a real decode from a substituted
//! placeholder.

use crate::imaging::{BackendError, Frame, MediaBackend, cap_resolution, placeholder_frame};
use crate::scan::MediaKind;
use crate::session::PoolEntry;
use rand::Rng;
use std::path::Path;

/// Error type at the acquisition boundary.
pub type DecodeError = BackendError;

/// Where the frame currently on the canvas came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOrigin {
    Decoded,
    /// Decoding failed; the white placeholder is shown instead.
    Placeholder { reason: String },
}

impl FrameOrigin {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }
}

/// Decode `entry` and cap it to `max_dimension`.
///
/// Videos contribute one uniformly random frame from `[0, total_frames)`.
#[tracing::instrument(skip_all, fields(kind = ?entry.kind, path = %entry.path.display()))]
pub fn acquire_frame<B, R>(
    backend: &B,
    entry: &PoolEntry,
    max_dimension: u32,
    rng: &mut R,
) -> Result<Frame, DecodeError>
where
    B: MediaBackend + ?Sized,
    R: Rng + ?Sized,
{
    let frame = match entry.kind {
        MediaKind::Image => backend.decode_image(&entry.path)?,
        MediaKind::Video => read_random_video_frame(backend, &entry.path, rng)?,
    };
    Ok(cap_resolution(frame, max_dimension))
}

fn read_random_video_frame<B, R>(backend: &B, path: &Path, rng: &mut R) -> Result<Frame, DecodeError>
where
    B: MediaBackend + ?Sized,
    R: Rng + ?Sized,
{
    let info = backend.probe_video(path)?;
    let total = info.total_frames();
    if total == 0 {
        return Err(BackendError::NoFrames(path.to_path_buf()));
    }
    let index = rng.gen_range(0..total);
    tracing::debug!(index, total, "reading video frame");
    backend.read_video_frame(path, &info, index)
}

/// Fallback policy: substitute the placeholder for any acquisition failure.
pub fn frame_or_placeholder(result: Result<Frame, DecodeError>) -> (Frame, FrameOrigin) {
    match result {
        Ok(frame) => (frame, FrameOrigin::Decoded),
        Err(e) => {
            tracing::warn!("showing placeholder: {e}");
            (
                placeholder_frame(),
                FrameOrigin::Placeholder {
                    reason: e.to_string(),
                },
            )
        }
    }
}
