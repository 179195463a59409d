//! The effect state machine.
//!
//! A [`Canvas`] holds the *base* frame (as decoded) and the *display* frame
//! (what the user sees). Each [`Effect`] is classified by where it reads from:
//!
//! | Source | Effects | Behaviour |
//! |---|---|---|
//! | [`Source::Base`] (absolute) | Gray, Color, Bright±, Contrast±, Zoom±, Reset | re-derive from the base, discarding earlier effects |
//! | [`Source::Display`] (compositional) | Flip H/V, Rotate L/R, Sketch, Sepia, Poster | stack on top of what is shown |
//!
//! Bright±, Contrast± and Zoom± first step their parameter in
//! [`EffectState`] (clamped), then render from the base with the new value.
//! Loading a frame or applying Reset returns every parameter to its default.
//!
//! Effects are a closed enum. The only place an unknown name can appear is
//! string parsing ([`Effect::from_str`]), which reports [`UnknownEffect`].

use crate::imaging::transforms;
use crate::imaging::{Brightness, Contrast, Frame, PosterLevels, ZoomLevel};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown effect: {0:?}")]
pub struct UnknownEffect(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    FlipHorizontal,
    FlipVertical,
    Gray,
    Color,
    RotateLeft,
    RotateRight,
    BrightUp,
    BrightDown,
    ContrastUp,
    ContrastDown,
    Sketch,
    Sepia,
    Poster(PosterLevels),
    ZoomIn,
    ZoomOut,
    Reset,
}

/// Which frame an effect reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Base,
    Display,
}

impl Effect {
    /// Every effect, in toolbar order.
    pub const ALL: [Effect; 16] = [
        Effect::FlipHorizontal,
        Effect::FlipVertical,
        Effect::Gray,
        Effect::Color,
        Effect::RotateLeft,
        Effect::RotateRight,
        Effect::BrightUp,
        Effect::BrightDown,
        Effect::ContrastUp,
        Effect::ContrastDown,
        Effect::Sketch,
        Effect::Sepia,
        Effect::Poster(PosterLevels(4)),
        Effect::ZoomIn,
        Effect::ZoomOut,
        Effect::Reset,
    ];

    /// Toolbar label, also the accepted spelling for [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Effect::FlipHorizontal => "Flip H",
            Effect::FlipVertical => "Flip V",
            Effect::Gray => "Gray",
            Effect::Color => "Color",
            Effect::RotateLeft => "Rotate L",
            Effect::RotateRight => "Rotate R",
            Effect::BrightUp => "Bright+",
            Effect::BrightDown => "Bright-",
            Effect::ContrastUp => "Contrast+",
            Effect::ContrastDown => "Contrast-",
            Effect::Sketch => "Sketch",
            Effect::Sepia => "Sepia",
            Effect::Poster(_) => "Poster",
            Effect::ZoomIn => "Zoom+",
            Effect::ZoomOut => "Zoom-",
            Effect::Reset => "Reset",
        }
    }

    pub fn source(self) -> Source {
        match self {
            Effect::FlipHorizontal
            | Effect::FlipVertical
            | Effect::RotateLeft
            | Effect::RotateRight
            | Effect::Sketch
            | Effect::Sepia
            | Effect::Poster(_) => Source::Display,
            Effect::Gray
            | Effect::Color
            | Effect::BrightUp
            | Effect::BrightDown
            | Effect::ContrastUp
            | Effect::ContrastDown
            | Effect::ZoomIn
            | Effect::ZoomOut
            | Effect::Reset => Source::Base,
        }
    }

    fn render(self, input: &Frame, state: &EffectState) -> Frame {
        match self {
            Effect::FlipHorizontal => transforms::flip_horizontal(input),
            Effect::FlipVertical => transforms::flip_vertical(input),
            Effect::Gray => transforms::grayscale(input),
            Effect::Color | Effect::Reset => input.clone(),
            Effect::RotateLeft => transforms::rotate_left(input),
            Effect::RotateRight => transforms::rotate_right(input),
            Effect::BrightUp | Effect::BrightDown => {
                transforms::adjust_brightness(input, state.brightness)
            }
            Effect::ContrastUp | Effect::ContrastDown => {
                transforms::adjust_contrast(input, state.contrast)
            }
            Effect::Sketch => transforms::sketch(input),
            Effect::Sepia => transforms::sepia(input),
            Effect::Poster(levels) => transforms::posterize(input, levels),
            Effect::ZoomIn | Effect::ZoomOut => transforms::zoom(input, state.zoom),
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Effect {
    type Err = UnknownEffect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Effect::ALL
            .into_iter()
            .find(|e| e.name() == name)
            .ok_or_else(|| UnknownEffect(s.to_string()))
    }
}

/// Parameters the stepped effects accumulate between frames.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EffectState {
    pub zoom: ZoomLevel,
    pub brightness: Brightness,
    pub contrast: Contrast,
}

impl EffectState {
    /// State after `effect` has stepped its parameter.
    pub fn after(self, effect: Effect) -> Self {
        match effect {
            Effect::BrightUp => Self {
                brightness: self.brightness.brighter(),
                ..self
            },
            Effect::BrightDown => Self {
                brightness: self.brightness.darker(),
                ..self
            },
            Effect::ContrastUp => Self {
                contrast: self.contrast.increased(),
                ..self
            },
            Effect::ContrastDown => Self {
                contrast: self.contrast.decreased(),
                ..self
            },
            Effect::ZoomIn => Self {
                zoom: self.zoom.zoomed_in(),
                ..self
            },
            Effect::ZoomOut => Self {
                zoom: self.zoom.zoomed_out(),
                ..self
            },
            Effect::Reset => Self::default(),
            _ => self,
        }
    }
}

/// Base frame, display frame and effect parameters for one viewer.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    base: Option<Frame>,
    display: Option<Frame>,
    state: EffectState,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a freshly acquired frame with all parameters at their defaults.
    pub fn load_frame(&mut self, frame: Frame) {
        self.display = Some(frame.clone());
        self.base = Some(frame);
        self.state = EffectState::default();
    }

    /// Apply `effect`; does nothing until a frame has been loaded.
    pub fn apply(&mut self, effect: Effect) {
        let Some(base) = self.base.as_ref() else {
            return;
        };
        self.state = self.state.after(effect);

        let input = match effect.source() {
            Source::Base => base,
            Source::Display => self.display.as_ref().unwrap_or(base),
        };
        let next = effect.render(input, &self.state);
        tracing::debug!(%effect, width = next.width(), height = next.height(), "applied effect");
        self.display = Some(next);
    }

    /// Drop both frames, as when a session stops.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn base(&self) -> Option<&Frame> {
        self.base.as_ref()
    }

    pub fn display(&self) -> Option<&Frame> {
        self.display.as_ref()
    }

    pub fn state(&self) -> EffectState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{gradient_frame, solid_frame};

    fn loaded(frame: Frame) -> Canvas {
        let mut canvas = Canvas::new();
        canvas.load_frame(frame);
        canvas
    }

    // =========================================================================
    // Names
    // =========================================================================

    #[test]
    fn every_name_parses_back() {
        for effect in Effect::ALL {
            assert_eq!(effect.name().parse::<Effect>(), Ok(effect));
        }
    }

    #[test]
    fn recognized_names_are_the_toolbar_labels() {
        let names: Vec<&str> = Effect::ALL.iter().map(|e| e.name()).collect();
        assert_eq!(
            names,
            vec![
                "Flip H", "Flip V", "Gray", "Color", "Rotate L", "Rotate R", "Bright+",
                "Bright-", "Contrast+", "Contrast-", "Sketch", "Sepia", "Poster", "Zoom+",
                "Zoom-", "Reset"
            ]
        );
    }

    #[test]
    fn unknown_name_is_error() {
        assert_eq!(
            "Blur".parse::<Effect>(),
            Err(UnknownEffect("Blur".to_string()))
        );
        assert!("flip h".parse::<Effect>().is_err());
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(" Gray ".parse::<Effect>(), Ok(Effect::Gray));
    }

    // =========================================================================
    // State machine
    // =========================================================================

    #[test]
    fn apply_without_frame_is_noop() {
        let mut canvas = Canvas::new();
        canvas.apply(Effect::BrightUp);
        assert!(canvas.display().is_none());
        assert_eq!(canvas.state(), EffectState::default());
    }

    #[test]
    fn load_frame_resets_state_and_copies_display() {
        let mut canvas = loaded(gradient_frame(8, 8));
        canvas.apply(Effect::ZoomIn);
        canvas.apply(Effect::BrightUp);

        let next = gradient_frame(5, 3);
        canvas.load_frame(next.clone());
        assert_eq!(canvas.state(), EffectState::default());
        assert_eq!(canvas.base(), Some(&next));
        assert_eq!(canvas.display(), Some(&next));
    }

    #[test]
    fn flip_twice_restores_base() {
        let base = gradient_frame(9, 7);
        let mut canvas = loaded(base.clone());
        canvas.apply(Effect::FlipHorizontal);
        assert_ne!(canvas.display(), Some(&base));
        canvas.apply(Effect::FlipHorizontal);
        assert_eq!(canvas.display(), Some(&base));
    }

    #[test]
    fn gray_twice_equals_gray_once() {
        let mut canvas = loaded(gradient_frame(12, 10));
        canvas.apply(Effect::Gray);
        let once = canvas.display().cloned();
        canvas.apply(Effect::Gray);
        assert_eq!(canvas.display().cloned(), once);
    }

    #[test]
    fn absolute_effect_discards_compositional_ones() {
        let base = gradient_frame(12, 10);
        let mut canvas = loaded(base.clone());
        canvas.apply(Effect::FlipVertical);
        canvas.apply(Effect::Gray);
        assert_eq!(canvas.display(), Some(&transforms::grayscale(&base)));
    }

    #[test]
    fn compositional_effects_stack() {
        let base = gradient_frame(12, 10);
        let mut canvas = loaded(base.clone());
        canvas.apply(Effect::Sepia);
        canvas.apply(Effect::FlipHorizontal);
        let expected = transforms::flip_horizontal(&transforms::sepia(&base));
        assert_eq!(canvas.display(), Some(&expected));
    }

    #[test]
    fn color_restores_base() {
        let base = gradient_frame(6, 6);
        let mut canvas = loaded(base.clone());
        canvas.apply(Effect::Sketch);
        canvas.apply(Effect::Poster(PosterLevels::default()));
        canvas.apply(Effect::Color);
        assert_eq!(canvas.display(), Some(&base));
    }

    #[test]
    fn rotation_swaps_then_zoom_rederives_from_base() {
        let mut canvas = loaded(gradient_frame(20, 10));
        canvas.apply(Effect::RotateRight);
        assert_eq!(canvas.display().unwrap().dimensions(), (10, 20));
        canvas.apply(Effect::ZoomIn);
        assert_eq!(canvas.display().unwrap().dimensions(), (20, 10));
    }

    #[test]
    fn brightness_caps_after_eleven_steps() {
        let mut canvas = loaded(solid_frame(4, 4, [10, 10, 10]));
        for _ in 0..11 {
            canvas.apply(Effect::BrightUp);
        }
        assert_eq!(canvas.state().brightness.value(), 200);
        assert_eq!(canvas.display().unwrap().get_pixel(0, 0).0, [210, 210, 210]);
    }

    #[test]
    fn brightness_renders_from_base_not_display() {
        let mut canvas = loaded(solid_frame(2, 2, [100, 100, 100]));
        canvas.apply(Effect::BrightUp);
        canvas.apply(Effect::BrightUp);
        assert_eq!(canvas.display().unwrap().get_pixel(0, 0).0, [140, 140, 140]);
        canvas.apply(Effect::BrightDown);
        assert_eq!(canvas.display().unwrap().get_pixel(0, 0).0, [120, 120, 120]);
    }

    #[test]
    fn contrast_steps_multiplicatively() {
        let mut canvas = loaded(solid_frame(2, 2, [100, 100, 100]));
        canvas.apply(Effect::ContrastUp);
        assert!((canvas.state().contrast.value() - 1.15).abs() < 1e-6);
        assert_eq!(canvas.display().unwrap().get_pixel(0, 0).0, [115, 115, 115]);
        canvas.apply(Effect::ContrastDown);
        canvas.apply(Effect::ContrastDown);
        assert!((canvas.state().contrast.value() - 1.0 / 1.15).abs() < 1e-5);
    }

    #[test]
    fn zoom_in_then_out_keeps_dimensions() {
        let mut canvas = loaded(gradient_frame(33, 21));
        for _ in 0..3 {
            canvas.apply(Effect::ZoomIn);
        }
        for _ in 0..3 {
            canvas.apply(Effect::ZoomOut);
        }
        assert_eq!(canvas.display().unwrap().dimensions(), (33, 21));
        assert!((canvas.state().zoom.value() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn zoom_clamps_at_bounds() {
        let mut canvas = loaded(gradient_frame(10, 10));
        for _ in 0..30 {
            canvas.apply(Effect::ZoomOut);
        }
        assert_eq!(canvas.state().zoom.value(), 0.5);
        assert_eq!(canvas.display().unwrap().dimensions(), (10, 10));
    }

    #[test]
    fn reset_restores_defaults_and_base() {
        let base = gradient_frame(10, 8);
        let mut canvas = loaded(base.clone());
        canvas.apply(Effect::ZoomIn);
        canvas.apply(Effect::ContrastDown);
        canvas.apply(Effect::Sepia);
        canvas.apply(Effect::Reset);
        assert_eq!(canvas.state(), EffectState::default());
        assert_eq!(canvas.display(), Some(&base));
    }

    #[test]
    fn effects_never_alias_base() {
        let base = gradient_frame(10, 8);
        let mut canvas = loaded(base.clone());
        canvas.apply(Effect::RotateLeft);
        canvas.apply(Effect::Sketch);
        assert_eq!(canvas.base(), Some(&base));
    }

    #[test]
    fn clear_drops_frames() {
        let mut canvas = loaded(gradient_frame(4, 4));
        canvas.clear();
        assert!(canvas.base().is_none());
        assert!(canvas.display().is_none());
    }
}
