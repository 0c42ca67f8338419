//! Timeline playback.
//!
//! While playing, each elapsed tick period advances the current operation
//! by one, wrapping at the end of the timeline. The clock is passed in by
//! the caller so the state machine stays deterministic.

use std::time::{Duration, Instant};

/// Default time between operation steps.
pub const DEFAULT_TICK: Duration = Duration::from_millis(500);

/// Whether the timeline is advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Paused,
    Playing,
}

/// Playback position over a timeline.
#[derive(Debug, Clone)]
pub struct Playback {
    state: PlaybackState,
    index: usize,
    tick: Duration,
    last_step: Option<Instant>,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(DEFAULT_TICK)
    }
}

impl Playback {
    /// Paused at the first operation.
    pub fn new(tick: Duration) -> Self {
        Self {
            state: PlaybackState::Paused,
            index: 0,
            tick,
            last_step: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn tick_period(&self) -> Duration {
        self.tick
    }

    /// Raw index. May be past the end of a shorter timeline after a source
    /// switch; use [`Playback::resolve`] to look up the operation.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Index into a timeline of `len` operations, falling back to the first
    /// operation when the stored index is out of range.
    pub fn resolve(&self, len: usize) -> usize {
        if self.index < len {
            self.index
        } else {
            0
        }
    }

    pub fn play(&mut self, now: Instant) {
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Playing;
            self.last_step = Some(now);
        }
    }

    pub fn pause(&mut self) {
        self.state = PlaybackState::Paused;
        self.last_step = None;
    }

    pub fn toggle(&mut self, now: Instant) {
        match self.state {
            PlaybackState::Paused => self.play(now),
            PlaybackState::Playing => self.pause(),
        }
    }

    /// Pause and return to the first operation.
    pub fn reset(&mut self) {
        self.pause();
        self.index = 0;
    }

    /// Advance one step, wrapping at `len`.
    pub fn step(&mut self, len: usize) {
        if len == 0 {
            self.index = 0;
            return;
        }
        self.index = (self.resolve(len) + 1) % len;
    }

    /// Advance for every whole tick period elapsed since the last step.
    ///
    /// Returns the number of steps taken.
    pub fn advance(&mut self, now: Instant, len: usize) -> usize {
        if !self.is_playing() || self.tick.is_zero() {
            return 0;
        }
        let Some(last) = self.last_step else {
            self.last_step = Some(now);
            return 0;
        };

        let elapsed = now.saturating_duration_since(last).as_nanos();
        let tick = self.tick.as_nanos();
        let steps = elapsed / tick;
        if steps == 0 {
            return 0;
        }

        self.index = if len == 0 {
            0
        } else {
            let offset = (steps % len as u128) as usize;
            (self.resolve(len) + offset) % len
        };
        // Carry the partial period over
        let remainder = Duration::from_nanos((elapsed % tick) as u64);
        self.last_step = Some(now - remainder);
        usize::try_from(steps).unwrap_or(usize::MAX)
    }
}
