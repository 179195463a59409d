//! Timed walk through a session.
//!
//! [`Playback`] is a clock-free state machine: the caller feeds it elapsed
//! time through [`Playback::tick`] (the CLI drill uses [`TICK_INTERVAL`]) and
//! reacts to the returned [`TickEvent`]. Keeping real time out of the type
//! makes every transition testable without sleeping.
//!
//! ```text
//!            start            pause
//! Stopped ─────────▶ Running ◀──────▶ Paused
//!    ▲                  │     resume
//!    └──── stop / last item expires
//! ```
//!
//! A looping playback never finishes on its own: the last item wraps back to
//! the first. Resuming, or restyling the shown item, starts its countdown over.

use std::time::Duration;

/// How often the drill loop ticks the countdown.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

pub const MIN_ITEM_DURATION: Duration = Duration::from_secs(1);
pub const MAX_ITEM_DURATION: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Running,
    Paused,
    Stopped,
}

/// What the caller should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Keep showing the current item.
    Continue,
    /// Time ran out; acquire and show the item at this index.
    Advance(usize),
    /// The last item expired and playback stopped.
    Finished,
}

#[derive(Debug, Clone)]
pub struct Playback {
    duration: Duration,
    elapsed: Duration,
    index: usize,
    len: usize,
    looping: bool,
    state: PlaybackState,
}

impl Playback {
    /// A stopped playback over `len` items, `duration` each.
    ///
    /// The duration is clamped to 1..=120 seconds.
    pub fn new(len: usize, duration: Duration) -> Self {
        Self {
            duration: duration.clamp(MIN_ITEM_DURATION, MAX_ITEM_DURATION),
            elapsed: Duration::ZERO,
            index: 0,
            len,
            looping: false,
            state: PlaybackState::Stopped,
        }
    }

    /// Wrap to the first item instead of finishing.
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Begin at the first item. An empty session stays stopped.
    pub fn start(&mut self) {
        self.index = 0;
        self.elapsed = Duration::ZERO;
        self.state = if self.len == 0 {
            PlaybackState::Stopped
        } else {
            PlaybackState::Running
        };
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Running {
            self.state = PlaybackState::Paused;
        }
    }

    /// Continue a paused playback with a full countdown on the current item.
    pub fn resume(&mut self) {
        if self.state == PlaybackState::Paused {
            self.elapsed = Duration::ZERO;
            self.state = PlaybackState::Running;
        }
    }

    /// Give the current item its full duration again, e.g. after an effect
    /// changed what is shown. The index and state are untouched.
    pub fn restart_countdown(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.index = 0;
        self.elapsed = Duration::ZERO;
    }

    /// Advance the countdown by `dt`. Only a running playback moves.
    pub fn tick(&mut self, dt: Duration) -> TickEvent {
        if self.state != PlaybackState::Running {
            return TickEvent::Continue;
        }

        self.elapsed += dt;
        if self.elapsed < self.duration {
            return TickEvent::Continue;
        }

        self.elapsed = Duration::ZERO;
        let next = self.index + 1;
        if next >= self.len && self.looping {
            self.index = 0;
            tracing::debug!(items = self.len, "playback wrapped");
            TickEvent::Advance(0)
        } else if next >= self.len {
            self.state = PlaybackState::Stopped;
            tracing::debug!(items = self.len, "playback finished");
            TickEvent::Finished
        } else {
            self.index = next;
            TickEvent::Advance(next)
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Time left on the current item.
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }

    /// Remaining time as a fraction of the item duration, in `[0, 1]`.
    pub fn countdown_fraction(&self) -> f64 {
        (self.remaining().as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Arc of the countdown overlay, in degrees.
    pub fn sweep_degrees(&self) -> f64 {
        self.countdown_fraction() * 360.0
    }

    /// Share of the session already shown, `index / max(1, len) * 100`.
    pub fn progress_percent(&self) -> f64 {
        self.index as f64 / self.len.max(1) as f64 * 100.0
    }

    /// One-based position, e.g. `"3/20"`.
    pub fn position_label(&self) -> String {
        if self.len == 0 {
            return "0/0".to_string();
        }
        format!("{}/{}", self.index + 1, self.len)
    }
}
