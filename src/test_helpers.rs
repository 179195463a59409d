//! Shared test utilities for the gesture-deck test suite.
//!
//! Synthetic frames for the pixel tests and small on-disk fixtures for the
//! scan and decode tests. Everything here panics on failure; it is only
//! compiled under `#[cfg(test)]`.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! write_png(&tmp.path().join("pose.png"), 64, 48);
//! touch(&tmp.path().join("clip.mp4"));
//!
//! let frame = gradient_frame(16, 9);
//! ```

use crate::imaging::Frame;
use image::{ImageFormat, Rgb};
use std::path::Path;

// =========================================================================
// Frames
// =========================================================================

/// A frame filled with one colour.
pub fn solid_frame(width: u32, height: u32, rgb: [u8; 3]) -> Frame {
    Frame::from_pixel(width, height, Rgb(rgb))
}

/// A frame where every row and every column differs from its neighbours,
/// so flips and rotations are observable.
pub fn gradient_frame(width: u32, height: u32) -> Frame {
    Frame::from_fn(width, height, |x, y| {
        Rgb([
            ((x * 13) % 256) as u8,
            ((y * 29) % 256) as u8,
            (((x + y) * 7) % 256) as u8,
        ])
    })
}

// =========================================================================
// Files
// =========================================================================

/// Create an empty file, creating parent directories as needed.
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, b"").unwrap();
}

fn write_encoded(path: &Path, width: u32, height: u32, format: ImageFormat) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    gradient_frame(width, height)
        .save_with_format(path, format)
        .unwrap();
}

/// Write a valid PNG regardless of the file extension.
pub fn write_png(path: &Path, width: u32, height: u32) {
    write_encoded(path, width, height, ImageFormat::Png);
}

pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    write_encoded(path, width, height, ImageFormat::Jpeg);
}

pub fn write_bmp(path: &Path, width: u32, height: u32) {
    write_encoded(path, width, height, ImageFormat::Bmp);
}
