//! The practice deck: one owned value tying session, acquisition and canvas
//! together.
//!
//! A [`Deck`] owns its media backend, its random source, the current
//! [`Session`] and the [`Canvas`]. All operations take `&mut self` and finish
//! before returning, so two decks never share state and a single deck cannot
//! be re-entered.
//!
//! ```text
//! load_session(dir, len) ──▶ Session
//! get_frame(i) ──▶ acquire_frame ──▶ frame_or_placeholder ──▶ Canvas::load_frame
//! apply_effect(e) / apply_named("Gray") ──▶ Canvas::apply
//! ```

use crate::acquire::{FrameOrigin, acquire_frame, frame_or_placeholder};
use crate::config::DeckConfig;
use crate::effects::{Canvas, Effect, EffectState, UnknownEffect};
use crate::imaging::{DEFAULT_MAX_DIMENSION, Frame, MediaBackend, NativeBackend};
use crate::session::{self, DEFAULT_MAX_VIDEOS, Session};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

pub struct Deck<B: MediaBackend = NativeBackend, R: Rng = StdRng> {
    backend: B,
    rng: R,
    max_dimension: u32,
    max_videos: usize,
    session: Session,
    canvas: Canvas,
    origin: Option<FrameOrigin>,
}

impl Deck {
    /// A deck with the production backend, default limits and an
    /// entropy-seeded random source.
    pub fn new() -> Self {
        Self::with_backend_and_rng(NativeBackend::new(), StdRng::from_entropy())
    }

    /// A production deck honouring the limits and tools in `config`.
    pub fn from_config(config: &DeckConfig) -> Self {
        Self::from_config_with_rng(config, StdRng::from_entropy())
    }

    /// Like [`Deck::from_config`], with a caller-chosen random source (e.g. a
    /// seeded one for a reproducible drill).
    pub fn from_config_with_rng(config: &DeckConfig, rng: StdRng) -> Self {
        let backend = NativeBackend::with_tools(config.video.to_video_tools());
        Self::with_backend_and_rng(backend, rng)
            .with_limits(config.frames.max_dimension, config.frames.max_videos)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: MediaBackend, R: Rng> Deck<B, R> {
    pub fn with_backend_and_rng(backend: B, rng: R) -> Self {
        Self {
            backend,
            rng,
            max_dimension: DEFAULT_MAX_DIMENSION,
            max_videos: DEFAULT_MAX_VIDEOS,
            session: Session::default(),
            canvas: Canvas::new(),
            origin: None,
        }
    }

    /// Override the resolution cap and the video pool bound.
    pub fn with_limits(mut self, max_dimension: u32, max_videos: usize) -> Self {
        self.max_dimension = max_dimension;
        self.max_videos = max_videos;
        self
    }

    /// Replace the current session with a fresh draw from `dir`.
    ///
    /// Clears the canvas. Returns the new session length, which is 0 when
    /// the directory is missing or holds no usable media.
    pub fn load_session(&mut self, dir: &Path, length: usize) -> usize {
        self.session = session::build_session(dir, length, self.max_videos, &mut self.rng);
        self.canvas.clear();
        self.origin = None;
        self.session.len()
    }

    /// Acquire item `index` of the session and show it with default effect
    /// parameters.
    ///
    /// Returns `None`, leaving the canvas untouched, when `index` is negative
    /// or not below the session length. Decode failures never surface here:
    /// the placeholder is shown and [`Deck::last_origin`] records why.
    pub fn get_frame<I: TryInto<usize>>(&mut self, index: I) -> Option<&Frame> {
        let index = index.try_into().ok()?;
        let entry = self.session.get(index)?;
        let result = acquire_frame(&self.backend, entry, self.max_dimension, &mut self.rng);
        let (frame, origin) = frame_or_placeholder(result);

        self.canvas.load_frame(frame);
        self.origin = Some(origin);
        self.canvas.display()
    }

    /// Apply `effect` to the shown frame. No-op before the first frame.
    pub fn apply_effect(&mut self, effect: Effect) {
        self.canvas.apply(effect);
    }

    /// Apply an effect by its toolbar name.
    ///
    /// An unrecognized name is reported and leaves every piece of state as
    /// it was.
    pub fn apply_named(&mut self, name: &str) -> Result<(), UnknownEffect> {
        let effect: Effect = name.parse()?;
        self.apply_effect(effect);
        Ok(())
    }

    pub fn display_frame(&self) -> Option<&Frame> {
        self.canvas.display()
    }

    pub fn base_frame(&self) -> Option<&Frame> {
        self.canvas.base()
    }

    pub fn effect_state(&self) -> EffectState {
        self.canvas.state()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// How the frame on the canvas was obtained; `None` before the first
    /// [`Deck::get_frame`] of a session.
    pub fn last_origin(&self) -> Option<&FrameOrigin> {
        self.origin.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
