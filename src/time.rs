/**
 * Time handling for playback.
 * Media time comes from an external clock (typically a video element)
 * as floating-point seconds; internally it is kept as integer
 * nanoseconds so positions stay totally ordered and hashable.
 */
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PlaybackError;

/// A moment on the media clock
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Serialize, Deserialize, Default)]
pub struct MediaTime(u64); // u64 nanoseconds for Ord compliance

impl MediaTime {
    /// Create media time from nanoseconds
    #[inline]
    pub fn from_nanos(nanoseconds: u64) -> Self {
        Self(nanoseconds)
    }

    /// Create media time from milliseconds
    #[inline]
    pub fn from_millis(milliseconds: f64) -> Result<Self, PlaybackError> {
        Self::from_seconds(milliseconds / 1000.0)
    }

    /// Create media time from seconds
    #[inline]
    pub fn from_seconds(seconds: f64) -> Result<Self, PlaybackError> {
        if seconds < 0.0 || !seconds.is_finite() {
            return Err(PlaybackError::InvalidTime { time: seconds });
        }
        let nanos = (seconds * 1_000_000_000.0) as u64;
        Ok(Self(nanos))
    }

    /// Zero time
    #[inline]
    pub fn zero() -> Self {
        Self(0)
    }

    /// Get time in seconds
    #[inline]
    pub fn as_seconds(&self) -> f64 {
        self.0 as f64 / 1_000_000_000.0
    }

    /// Get time in milliseconds
    #[inline]
    pub fn as_millis(&self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Get time in nanoseconds
    #[inline]
    pub fn as_nanos(&self) -> u64 {
        self.0
    }

    /// Clamp time to a range
    #[inline]
    pub fn clamp(&self, min: MediaTime, max: MediaTime) -> Self {
        if self.0 < min.0 {
            min
        } else if self.0 > max.0 {
            max
        } else {
            *self
        }
    }
}

impl std::ops::Add for MediaTime {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl std::ops::AddAssign for MediaTime {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl std::ops::Sub for MediaTime {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl std::ops::SubAssign for MediaTime {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

// Easier conversions
impl From<u64> for MediaTime {
    fn from(nanos: u64) -> Self {
        Self::from_nanos(nanos)
    }
}

impl From<MediaTime> for u64 {
    fn from(time: MediaTime) -> u64 {
        time.0
    }
}

impl From<f64> for MediaTime {
    fn from(seconds: f64) -> Self {
        Self::from_seconds(seconds.max(0.0)).unwrap_or_else(|_| Self::zero())
    }
}

impl From<MediaTime> for f64 {
    fn from(time: MediaTime) -> f64 {
        time.as_seconds()
    }
}

impl From<Duration> for MediaTime {
    fn from(duration: Duration) -> Self {
        MediaTime::from_nanos(duration.as_nanos() as u64)
    }
}

impl From<MediaTime> for Duration {
    fn from(time: MediaTime) -> Duration {
        Duration::from_nanos(time.0)
    }
}

/// The span of a recording on the media clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: MediaTime,
    pub end: MediaTime,
}

impl TimeRange {
    /// Create a new time range
    #[inline]
    pub fn new(start: MediaTime, end: MediaTime) -> Result<Self, PlaybackError> {
        if start > end {
            return Err(PlaybackError::TimeOutOfRange {
                time: start.as_seconds(),
                start: 0.0,
                end: end.as_seconds(),
            });
        }
        Ok(Self { start, end })
    }

    /// Get the duration of this range
    #[inline]
    pub fn duration(&self) -> MediaTime {
        MediaTime(self.end.0 - self.start.0)
    }

    /// Check if a time is within this range (inclusive)
    #[inline]
    pub fn contains(&self, time: MediaTime) -> bool {
        time >= self.start && time <= self.end
    }

    /// Clamp a time into this range
    #[inline]
    pub fn clamp(&self, time: MediaTime) -> MediaTime {
        time.clamp(self.start, self.end)
    }
}
