//! Parameter types for effect operations.
//!
//! These newtypes describe *how strong* an effect is, not how it is applied.
//! Each one clamps on construction, so a value that exists is always inside
//! its legal range and the stepping helpers can never walk out of it. The
//! [`transforms`](super::transforms) take them by value; the
//! [`effects`](crate::effects) state machine owns and steps them.
//!
//! ## Types
//!
//! - [`Brightness`]: additive offset, −200..=200 in steps of 20 (default 0).
//! - [`Contrast`]: multiplicative gain, 0.3..=3.0 in ×1.15 steps (default 1.0).
//! - [`ZoomLevel`]: scale about the frame centre, 0.5..=3.0 in 0.15 steps (default 1.0).
//! - [`PosterLevels`]: number of quantization buckets per channel (default 4).

/// Additive brightness offset (`beta`), clamped to −200..=200.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Brightness(i32);

impl Brightness {
    pub const MIN: i32 = -200;
    pub const MAX: i32 = 200;
    pub const STEP: i32 = 20;

    pub fn new(value: i32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> i32 {
        self.0
    }

    pub fn brighter(self) -> Self {
        Self::new(self.0 + Self::STEP)
    }

    pub fn darker(self) -> Self {
        Self::new(self.0 - Self::STEP)
    }
}

/// Multiplicative contrast gain (`alpha`), clamped to 0.3..=3.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contrast(f32);

impl Contrast {
    pub const MIN: f32 = 0.3;
    pub const MAX: f32 = 3.0;
    pub const FACTOR: f32 = 1.15;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn increased(self) -> Self {
        Self::new(self.0 * Self::FACTOR)
    }

    pub fn decreased(self) -> Self {
        Self::new(self.0 / Self::FACTOR)
    }
}

impl Default for Contrast {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Zoom factor about the frame centre, clamped to 0.5..=3.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLevel(f32);

impl ZoomLevel {
    pub const MIN: f32 = 0.5;
    pub const MAX: f32 = 3.0;
    pub const STEP: f32 = 0.15;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn zoomed_in(self) -> Self {
        Self::new(self.0 + Self::STEP)
    }

    pub fn zoomed_out(self) -> Self {
        Self::new(self.0 - Self::STEP)
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Quantization buckets per channel for posterization.
///
/// Values below 2 are kept as-is; the transform treats them as "no-op".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PosterLevels(pub u8);

impl PosterLevels {
    /// Width of one bucket in 8-bit intensity units.
    pub fn shift(self) -> u16 {
        256 / u16::from(self.0.max(1))
    }
}

impl Default for PosterLevels {
    fn default() -> Self {
        Self(4)
    }
}
