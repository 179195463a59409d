//! Pure calculation functions for frame dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the dimensions a frame must be shrunk to so that its longer edge
/// fits within `max_dimension`.
///
/// Returns `None` when the frame already fits; frames are never upscaled.
/// The longer edge lands exactly on `max_dimension`; the shorter edge is
/// scaled by the same ratio and rounded, never below 1 pixel.
///
/// # Examples
/// ```
/// # use gesture_deck::imaging::calculations::capped_dimensions;
/// assert_eq!(capped_dimensions((3200, 2400), 1600), Some((1600, 1200)));
/// assert_eq!(capped_dimensions((800, 600), 1600), None);
/// ```
pub fn capped_dimensions(original: (u32, u32), max_dimension: u32) -> Option<(u32, u32)> {
    let (w, h) = original;
    let longer_edge = w.max(h);
    if longer_edge <= max_dimension || max_dimension == 0 {
        return None;
    }

    let ratio = max_dimension as f64 / longer_edge as f64;
    let shorten = |edge: u32| ((edge as f64 * ratio).round() as u32).max(1);

    if w >= h {
        Some((max_dimension, shorten(h)))
    } else {
        Some((shorten(w), max_dimension))
    }
}

/// Dimensions of a frame resized by `scale` (truncated, at least 1 pixel).
pub fn scaled_dimensions(original: (u32, u32), scale: f32) -> (u32, u32) {
    let (w, h) = original;
    let scale = f64::from(scale);
    let apply = |edge: u32| ((edge as f64 * scale) as u32).max(1);
    (apply(w), apply(h))
}

/// Offset that centres an `inner` span inside an `outer` span.
///
/// Works in either direction: for a crop `outer` is the larger, resized span;
/// for padding it is the canvas. Returns 0 when `inner >= outer`.
pub fn centered_offset(outer: u32, inner: u32) -> u32 {
    outer.saturating_sub(inner) / 2
}
