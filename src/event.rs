//! Session events for the host to mirror into its UI.

use serde::{Deserialize, Serialize};

use crate::time::MediaTime;

/// Something the host should react to - queued during session calls,
/// drained by the host after each one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Playback started (or resumed).
    Started,
    /// Playback paused.
    Paused,
    /// The last frame was reached; the host should pause its media clock.
    EndReached,
    /// The position changed by seek; the host should move its media
    /// clock to the given time.
    Seeked {
        position: usize,
        media_time: MediaTime,
    },
    /// A new recording replaced the loaded one.
    RecordingReplaced,
}

/// FIFO queue of pending session events.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<SessionEvent>,
}

impl EventQueue {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event.
    #[inline]
    pub fn push(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    /// Take all pending events, oldest first.
    #[inline]
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }
}
