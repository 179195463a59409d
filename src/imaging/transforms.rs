//! Pure frame-to-frame transforms.
//!
//! Every function borrows its input and returns a freshly allocated frame, so
//! a transform can never corrupt a frame the caller still holds. None of them
//! keep state between calls; given the same frame and parameters they always
//! produce the same output.
//!
//! | Effect | Function |
//! |---|---|
//! | Flip H / Flip V | [`flip_horizontal`], [`flip_vertical`] |
//! | Rotate L / R | [`rotate_left`], [`rotate_right`] |
//! | Gray | [`grayscale`] |
//! | Bright± | [`adjust_brightness`] |
//! | Contrast± | [`adjust_contrast`] |
//! | Sketch | [`sketch`] |
//! | Sepia | [`sepia`] |
//! | Poster | [`posterize`] |
//! | Zoom± | [`zoom`] |

use super::calculations::{centered_offset, scaled_dimensions};
use super::frame::Frame;
use super::params::{Brightness, Contrast, PosterLevels, ZoomLevel};
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, Rgb};

/// Gaussian sigma equivalent to a 21×21 kernel with automatic sigma.
const SKETCH_BLUR_SIGMA: f32 = 3.5;

/// Sepia mixing matrix in BGR channel order: row `i` produces output channel
/// `i` (B, G, R) from the input (B, G, R).
const SEPIA_BGR: [[f32; 3]; 3] = [
    [0.272, 0.534, 0.131],
    [0.349, 0.686, 0.168],
    [0.393, 0.769, 0.189],
];

pub fn flip_horizontal(frame: &Frame) -> Frame {
    imageops::flip_horizontal(frame)
}

pub fn flip_vertical(frame: &Frame) -> Frame {
    imageops::flip_vertical(frame)
}

/// Rotate 90° counter-clockwise.
pub fn rotate_left(frame: &Frame) -> Frame {
    imageops::rotate270(frame)
}

/// Rotate 90° clockwise.
pub fn rotate_right(frame: &Frame) -> Frame {
    imageops::rotate90(frame)
}

/// Luminance replicated into all three channels.
///
/// Uses BT.601 weights in 14-bit fixed point. The weights sum to exactly
/// 1.0, so a pixel whose channels are already equal maps to itself and the
/// transform is idempotent.
pub fn grayscale(frame: &Frame) -> Frame {
    replicate(&luminance(frame))
}

pub fn adjust_brightness(frame: &Frame, beta: Brightness) -> Frame {
    let beta = beta.value();
    map_channels(frame, |v| (i32::from(v) + beta).clamp(0, 255) as u8)
}

pub fn adjust_contrast(frame: &Frame, alpha: Contrast) -> Frame {
    let alpha = alpha.value();
    map_channels(frame, |v| (f32::from(v) * alpha).round().clamp(0.0, 255.0) as u8)
}

/// Pencil-sketch look: colour-dodge of the luminance over its blurred inverse.
pub fn sketch(frame: &Frame) -> Frame {
    let gray = luminance(frame);
    let mut inverted = gray.clone();
    imageops::invert(&mut inverted);
    let blurred = imageops::blur(&inverted, SKETCH_BLUR_SIGMA);

    let dodged = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let g = u32::from(gray.get_pixel(x, y).0[0]);
        let divisor = 255 - u32::from(blurred.get_pixel(x, y).0[0]);
        if divisor == 0 {
            return Luma([0]);
        }
        let value = (g * 256 + divisor / 2) / divisor;
        Luma([value.min(255) as u8])
    });
    replicate(&dodged)
}

pub fn sepia(frame: &Frame) -> Frame {
    let mut out = frame.clone();
    for pixel in out.pixels_mut() {
        let [r, g, b] = pixel.0.map(f32::from);
        let [out_b, out_g, out_r] = SEPIA_BGR.map(|[wb, wg, wr]| {
            (wb * b + wg * g + wr * r).round().clamp(0.0, 255.0) as u8
        });
        pixel.0 = [out_r, out_g, out_b];
    }
    out
}

/// Quantize every channel into `levels` evenly spaced buckets.
pub fn posterize(frame: &Frame, levels: PosterLevels) -> Frame {
    if levels.0 < 2 {
        return frame.clone();
    }
    let shift = levels.shift();
    map_channels(frame, |v| (u16::from(v) / shift * shift) as u8)
}

/// Scale about the centre while keeping the frame's dimensions.
///
/// Zooming in center-crops the enlarged frame; zooming out centres the
/// shrunken frame on a black canvas.
pub fn zoom(frame: &Frame, level: ZoomLevel) -> Frame {
    let scale = level.value();
    if scale == 1.0 {
        return frame.clone();
    }

    let (width, height) = frame.dimensions();
    let (new_width, new_height) = scaled_dimensions((width, height), scale);
    let resized = imageops::resize(frame, new_width, new_height, FilterType::Triangle);

    if scale > 1.0 {
        let x = centered_offset(new_width, width);
        let y = centered_offset(new_height, height);
        imageops::crop_imm(&resized, x, y, width, height).to_image()
    } else {
        let mut canvas = Frame::new(width, height);
        let x = centered_offset(width, new_width);
        let y = centered_offset(height, new_height);
        imageops::replace(&mut canvas, &resized, i64::from(x), i64::from(y));
        canvas
    }
}

fn luma(pixel: &Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0.map(u32::from);
    ((r * 4899 + g * 9617 + b * 1868 + 8192) >> 14) as u8
}

fn luminance(frame: &Frame) -> GrayImage {
    GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
        Luma([luma(frame.get_pixel(x, y))])
    })
}

fn replicate(gray: &GrayImage) -> Frame {
    Frame::from_fn(gray.width(), gray.height(), |x, y| {
        let v = gray.get_pixel(x, y).0[0];
        Rgb([v, v, v])
    })
}

fn map_channels(frame: &Frame, f: impl Fn(u8) -> u8) -> Frame {
    let mut out = frame.clone();
    for pixel in out.pixels_mut() {
        pixel.0 = pixel.0.map(&f);
    }
    out
}
