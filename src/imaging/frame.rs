//! The raster type shared by acquisition, transforms and the canvas.

use super::calculations::capped_dimensions;
use image::{Rgb, RgbImage, imageops};

/// A decoded frame: `height × width × 3`, 8 bits per channel, row-major, RGB.
pub type Frame = RgbImage;

/// Largest edge, in pixels, a frame keeps after acquisition.
pub const DEFAULT_MAX_DIMENSION: u32 = 1600;

pub const PLACEHOLDER_WIDTH: u32 = 800;
pub const PLACEHOLDER_HEIGHT: u32 = 600;

/// Plain white frame shown in place of media that could not be decoded.
///
/// Pure in-memory allocation, so the fallback path itself cannot fail.
pub fn placeholder_frame() -> Frame {
    Frame::from_pixel(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT, Rgb([255, 255, 255]))
}

/// Shrink `frame` so its longer edge is at most `max_dimension`.
///
/// Frames that already fit are returned untouched. Downscaling uses
/// `imageops::thumbnail`, which averages every source pixel into its target
/// cell (area interpolation).
pub fn cap_resolution(frame: Frame, max_dimension: u32) -> Frame {
    match capped_dimensions(frame.dimensions(), max_dimension) {
        Some((width, height)) => imageops::thumbnail(&frame, width, height),
        None => frame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{gradient_frame, solid_frame};

    #[test]
    fn placeholder_is_white_800x600() {
        let frame = placeholder_frame();
        assert_eq!(frame.dimensions(), (800, 600));
        assert!(frame.pixels().all(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn cap_shrinks_oversized_frame() {
        let frame = gradient_frame(400, 100);
        let capped = cap_resolution(frame, 200);
        assert_eq!(capped.dimensions(), (200, 50));
    }

    #[test]
    fn cap_shrinks_portrait_frame() {
        let capped = cap_resolution(gradient_frame(90, 300), 150);
        assert_eq!(capped.dimensions(), (45, 150));
    }

    #[test]
    fn cap_leaves_small_frame_unchanged() {
        let frame = gradient_frame(120, 80);
        let capped = cap_resolution(frame.clone(), 200);
        assert_eq!(capped, frame);
    }

    #[test]
    fn cap_averages_uniform_colour() {
        let capped = cap_resolution(solid_frame(64, 64, [10, 120, 240]), 16);
        assert_eq!(capped.dimensions(), (16, 16));
        assert!(capped.pixels().all(|p| p.0 == [10, 120, 240]));
    }
}
