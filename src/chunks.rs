//! Sliding window of point-cloud chunks.
//!
//! In divided ("real-time") mode the renderer shows the chunk recorded
//! at the current position plus the few before it. During playback the
//! window behaves as a ring buffer - each newly reached chunk overwrites
//! the oldest slot - so only one layer's data changes per step.

use serde::{Deserialize, Serialize};

use crate::time::MediaTime;

/// Ring buffer of the chunk indices currently on screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkWindow {
    slots: Vec<usize>,
    /// Slot holding the oldest chunk, overwritten next.
    oldest: usize,
    /// Index of the newest chunk reached by the clock.
    position: usize,
}

impl ChunkWindow {
    /// Create a window with the given number of slots (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![0; capacity.max(1)],
            oldest: 0,
            position: 0,
        }
    }

    /// Number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The displayed chunk indices, one per slot.
    #[inline]
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    /// The newest chunk reached by the clock.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Rebuild the window around a chunk position after a seek: the
    /// window holds the position and its predecessors, padding with
    /// chunk 0 near the start. E.g. position 7 with 10 slots yields
    /// [0, 0, 0, 1, 2, 3, 4, 5, 6, 7].
    pub fn refill(&mut self, chunk_position: usize) {
        self.position = chunk_position;
        let mut position = chunk_position;
        for slot in self.slots.iter_mut().rev() {
            *slot = position;
            position = position.saturating_sub(1);
        }
        self.oldest = 0;
    }

    /// Seek the window to a media time against the chunk timestamp
    /// table: the position becomes the first chunk not yet passed.
    pub fn seek(&mut self, time: MediaTime, timestamps: &[MediaTime]) {
        if timestamps.is_empty() {
            self.refill(0);
            return;
        }
        let position = timestamps
            .partition_point(|stamp| *stamp < time)
            .min(timestamps.len() - 1);
        self.refill(position);
    }

    /// Walk the chunk timestamps up to the media time, overwriting the
    /// oldest slot once per newly reached chunk. Stops at the last
    /// chunk; slot indices never leave the table.
    pub fn advance(&mut self, time: MediaTime, timestamps: &[MediaTime]) {
        if timestamps.is_empty() {
            return;
        }
        let last = timestamps.len() - 1;
        self.position = self.position.min(last);
        while self.position < last && timestamps[self.position] < time {
            self.position += 1;
            self.slots[self.oldest] = self.position;
            self.oldest = (self.oldest + 1) % self.slots.len();
        }
    }

    /// Resize the window (united mode collapses it to one slot) and
    /// rebuild it around the current position.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.slots = vec![0; capacity.max(1)];
        self.refill(self.position);
    }
}
