//! Frame decoding and pixel operations.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode stills** | `image::ImageReader` → RGB8 |
//! | **Extract a video frame** | `ffprobe` + `ffmpeg` subprocesses |
//! | **Cap resolution** | `imageops::thumbnail` (area averaging) |
//! | **Transforms** | `imageops` flips/rotations/blur + per-pixel maps |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Clamped effect strengths
//! - **Frame**: The shared raster type, placeholder and capping
//! - **Transforms**: Pure frame → frame functions
//! - **Backend**: [`MediaBackend`] trait + [`NativeBackend`]

pub mod backend;
pub mod calculations;
pub mod frame;
pub mod native_backend;
mod params;
pub mod transforms;
pub mod video;

pub use backend::{BackendError, MediaBackend, VideoInfo};
pub use frame::{DEFAULT_MAX_DIMENSION, Frame, cap_resolution, placeholder_frame};
pub use native_backend::NativeBackend;
pub use params::{Brightness, Contrast, PosterLevels, ZoomLevel};
pub use video::VideoTools;
