//! Frame index driver.
//!
//! Maps the continuously advancing media clock onto discrete frame
//! positions. During playback the position only ever moves forward; it
//! goes backward exclusively through an explicit seek.

use serde::{Deserialize, Serialize};

use crate::error::PlaybackError;
use crate::time::{MediaTime, TimeRange};

/// Per-frame timestamp table for the camera pose sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    timestamps: Vec<MediaTime>,
}

impl Timeline {
    /// Create a timeline from per-frame timestamps.
    /// The table must be non-empty and strictly increasing.
    pub fn new(timestamps: Vec<MediaTime>) -> Result<Self, PlaybackError> {
        if timestamps.is_empty() {
            return Err(PlaybackError::DataNotReady {
                missing: "camera timestamps".to_string(),
                retry_after_ms: 0,
            });
        }
        for (row, pair) in timestamps.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(PlaybackError::NonMonotonicTimestamps {
                    table: "camera timestamps".to_string(),
                    row: row + 1,
                });
            }
        }
        Ok(Self { timestamps })
    }

    /// Number of frames in the sequence.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.timestamps.len()
    }

    /// Index of the last frame.
    #[inline]
    pub fn last(&self) -> usize {
        self.timestamps.len() - 1
    }

    /// Whether the position is the final frame.
    #[inline]
    pub fn is_last(&self, position: usize) -> bool {
        position >= self.last()
    }

    /// The recorded timestamp of a frame, out-of-range positions clamped.
    #[inline]
    pub fn timestamp(&self, position: usize) -> MediaTime {
        self.timestamps[position.min(self.last())]
    }

    /// The media-time span covered by the sequence.
    #[inline]
    pub fn span(&self) -> TimeRange {
        TimeRange {
            start: self.timestamps[0],
            end: self.timestamps[self.last()],
        }
    }

    /// Advance a position to the given media time.
    ///
    /// Forward linear scan: steps while the current frame's recorded
    /// timestamp is behind the clock. Never decreases, clamps at the
    /// last frame.
    pub fn advance(&self, position: usize, time: MediaTime) -> usize {
        let last = self.last();
        let mut position = position.min(last);
        while position < last && self.timestamps[position] < time {
            position += 1;
        }
        position
    }

    /// Seek to a media time.
    ///
    /// Returns the smallest index whose timestamp is >= the given time,
    /// clamped to the last frame.
    pub fn seek(&self, time: MediaTime) -> usize {
        self.timestamps
            .partition_point(|stamp| *stamp < time)
            .min(self.last())
    }

    /// Jump a number of seconds forward or backward from a position.
    /// The target time is clamped to the recording span.
    pub fn seek_relative(&self, position: usize, delta_seconds: f64) -> usize {
        let current = self.timestamp(position).as_seconds();
        let target = MediaTime::from(current + delta_seconds);
        self.seek(self.span().clamp(target))
    }
}
