// File: src/core/playback.rs
use serde::{Deserialize, Serialize};

/// Slideshow playback states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Not playing; the gallery view shows every card at once.
    Idle,
    /// Slideshow running; one card on screen, advancing once per tick.
    Playing,
}

/// What a single tick did to the slideshow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; the tick was a no-op.
    Ignored,
    /// Cursor moved forward to this index.
    Advanced(usize),
    /// Last card reached (or the sequence emptied); playback stopped.
    Finished,
}

/// Drives the one-card-at-a-time slideshow.
///
/// Owns only the playing flag and the cursor. The host owns the 1s timer and
/// calls `tick` with a freshly recomputed renderable length, never a snapshot
/// taken at play start; the host must also drop and re-arm its pending timer
/// on every toggle, tick and text edit so at most one timer exists at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackController {
    state: PlaybackState,
    cursor: usize,
}

impl PlaybackController {
    pub fn new() -> Self {
        Self {
            state: PlaybackState::Idle,
            cursor: 0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Cursor into the renderable sequence. Frozen while idle.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The single play/stop control. Starting always rewinds to the first
    /// card, whatever the cursor was left at by a manual stop.
    pub fn toggle(&mut self) -> PlaybackState {
        self.state = match self.state {
            PlaybackState::Idle => {
                self.cursor = 0;
                PlaybackState::Playing
            }
            PlaybackState::Playing => PlaybackState::Idle,
        };
        self.state
    }

    /// One timer tick against the current renderable length.
    ///
    /// Stops on the last card instead of stepping past it, so the cursor
    /// never reaches `renderable_len`. An empty sequence stops immediately;
    /// so does a length of 1, where the first card already is the last.
    pub fn tick(&mut self, renderable_len: usize) -> TickOutcome {
        if self.state != PlaybackState::Playing {
            return TickOutcome::Ignored;
        }
        if renderable_len == 0 || self.cursor >= renderable_len - 1 {
            self.state = PlaybackState::Idle;
            return TickOutcome::Finished;
        }
        self.cursor += 1;
        TickOutcome::Advanced(self.cursor)
    }

    /// Index of the card currently on screen, `None` when there is nothing
    /// to show. The modulo guards a cursor left beyond a sequence that
    /// shrank under live edits.
    pub fn current(&self, renderable_len: usize) -> Option<usize> {
        if renderable_len == 0 {
            return None;
        }
        Some(self.cursor % renderable_len)
    }
}
