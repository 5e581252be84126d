//! Media clock seam.
//!
//! The authoritative clock normally lives in the host (a video element
//! whose frame callbacks drive the session). The trait keeps the session
//! testable and lets headless hosts run without media.

use instant::Instant;

use crate::time::MediaTime;

/// The media-clock capability: current time plus transport control.
pub trait MediaClock {
    /// The clock's current media time.
    fn current_time(&self) -> MediaTime;

    /// Whether the clock is advancing.
    fn is_playing(&self) -> bool;

    /// Start or resume the clock.
    fn play(&mut self);

    /// Stop advancing, keeping the current time.
    fn pause(&mut self);

    /// Move the clock to a time.
    fn seek(&mut self, time: MediaTime);
}

/// A clock the host sets explicitly. Bridges to media elements (the host
/// copies the element's time in) and drives tests.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    time: MediaTime,
    playing: bool,
}

impl ManualClock {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current media time.
    #[inline]
    pub fn set_time(&mut self, time: MediaTime) {
        self.time = time;
    }
}

impl MediaClock for ManualClock {
    #[inline]
    fn current_time(&self) -> MediaTime {
        self.time
    }

    #[inline]
    fn is_playing(&self) -> bool {
        self.playing
    }

    #[inline]
    fn play(&mut self) {
        self.playing = true;
    }

    #[inline]
    fn pause(&mut self) {
        self.playing = false;
    }

    #[inline]
    fn seek(&mut self, time: MediaTime) {
        self.time = time;
    }
}

/// A wall-clock-driven media clock for headless playback: while playing,
/// the media time is the seek base plus the real time elapsed since
/// `play`.
#[derive(Debug, Clone)]
pub struct IntervalClock {
    base: MediaTime,
    started_at: Option<Instant>,
}

impl IntervalClock {
    #[inline]
    pub fn new() -> Self {
        Self {
            base: MediaTime::zero(),
            started_at: None,
        }
    }
}

impl Default for IntervalClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaClock for IntervalClock {
    fn current_time(&self) -> MediaTime {
        match self.started_at {
            Some(started_at) => self.base + MediaTime::from(started_at.elapsed()),
            None => self.base,
        }
    }

    #[inline]
    fn is_playing(&self) -> bool {
        self.started_at.is_some()
    }

    fn play(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        self.base = self.current_time();
        self.started_at = None;
    }

    fn seek(&mut self, time: MediaTime) {
        self.base = time;
        if self.started_at.is_some() {
            self.started_at = Some(Instant::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let mut clock = ManualClock::new();
        assert_eq!(clock.current_time(), MediaTime::zero());
        assert!(!clock.is_playing());

        clock.play();
        clock.set_time(MediaTime::from(1.5));
        assert!(clock.is_playing());
        assert_eq!(clock.current_time().as_seconds(), 1.5);

        clock.pause();
        assert!(!clock.is_playing());
    }

    #[test]
    fn test_interval_clock_paused_holds_time() {
        let mut clock = IntervalClock::new();
        clock.seek(MediaTime::from(2.0));
        assert!(!clock.is_playing());
        assert_eq!(clock.current_time().as_seconds(), 2.0);
        assert_eq!(clock.current_time().as_seconds(), 2.0);
    }

    #[test]
    fn test_interval_clock_advances_while_playing() {
        let mut clock = IntervalClock::new();
        clock.play();
        let first = clock.current_time();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(clock.current_time() > first);
    }
}
