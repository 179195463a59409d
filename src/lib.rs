//! # Gesture Deck
//!
//! The core of a gesture-drawing practice tool. Point it at a folder of
//! reference photos and video clips; it draws a random practice session,
//! extracts one still per item (a random frame for videos), and lets the
//! artist restyle the still with a fixed set of effects.
//!
//! # Architecture
//!
//! ```text
//! media dir ──scan──▶ Inventory ──session──▶ Session (with VideoPool)
//!                                               │ get_frame(i)
//!                                               ▼
//!                      acquire (decode + cap) ──▶ Frame | placeholder
//!                                               │ load_frame
//!                                               ▼
//!                      Canvas { base, display, EffectState } ◀── Effect
//! ```
//!
//! Everything above is owned by one [`deck::Deck`] value. There is no global
//! state: two decks never interfere, and a deck takes `&mut self` for every
//! operation so it cannot be re-entered.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Non-recursive directory listing, image/video classification by extension |
//! | [`session`] | Bounded video pool sampling and the with-replacement session draw |
//! | [`acquire`] | One pool entry → one capped frame; explicit placeholder fallback |
//! | [`imaging`] | Frame type, media backends (`image` crate, `ffmpeg`), pure transforms |
//! | [`effects`] | Closed `Effect` enum and the base/display canvas state machine |
//! | [`deck`] | The owned value tying session, acquisition and canvas together |
//! | [`playback`] | Timed walk through a session (countdown, pause, progress) |
//! | [`config`] | `gesture-deck.toml` loading, merging over defaults, and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Failures Become Placeholders, Visibly
//!
//! A practice run should never stop because one file is broken. Acquisition
//! itself returns `Result`; the [`acquire::frame_or_placeholder`] policy swaps
//! any error for a plain white 800×600 frame and the deck records a
//! [`acquire::FrameOrigin`] so callers can still see what happened.
//!
//! ## Video Through Subprocesses
//!
//! Stills decode in-process with the `image` crate. Video frames come from the
//! system `ffprobe`/`ffmpeg`, one short-lived child per call, each held by a
//! guard that kills and reaps it on every exit path and bounded by a timeout.
//! No codec libraries are linked.
//!
//! ## Absolute vs. Compositional Effects
//!
//! Gray, Color, brightness, contrast, zoom and Reset always re-derive from the
//! untouched base frame, so stepping a slider never compounds rounding error.
//! Flips, rotations, Sketch, Sepia and Poster stack on whatever is shown.
//!
//! ## Injected Randomness
//!
//! Session draws and video frame picks use the deck's own `rand::Rng`. Tests
//! and `--seed` pass a seeded `StdRng` for reproducible sessions.

pub mod acquire;
pub mod config;
pub mod deck;
pub mod effects;
pub mod imaging;
pub mod output;
pub mod playback;
pub mod scan;
pub mod session;

#[cfg(test)]
pub(crate) mod test_helpers;
