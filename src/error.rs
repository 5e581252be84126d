//! Error types for the playback core

use serde::{Deserialize, Serialize};

/// Comprehensive error type for playback operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlaybackError {
    /// Precomputed tables are not loaded yet; poll again later
    #[error("Data not ready: {missing} (retry in {retry_after_ms} ms)")]
    DataNotReady { missing: String, retry_after_ms: u64 },

    /// Invalid time value
    #[error("Invalid time value: {time}")]
    InvalidTime { time: f64 },

    /// Time out of range
    #[error("Time {time} is out of range [{start}, {end}]")]
    TimeOutOfRange { time: f64, start: f64, end: f64 },

    /// Parallel tables disagree on length
    #[error("Table length mismatch: {table} has {actual} rows, expected {expected}")]
    TableLengthMismatch {
        table: String,
        expected: usize,
        actual: usize,
    },

    /// A loaded table contains NaN or infinity
    #[error("Non-finite value in {table} at row {row}")]
    NonFiniteValue { table: String, row: usize },

    /// A timestamp table is not increasing
    #[error("Timestamps in {table} decrease at row {row}")]
    NonMonotonicTimestamps { table: String, row: usize },

    /// A text table row could not be parsed
    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    /// A color string could not be parsed
    #[error("Invalid color: {value}")]
    InvalidColor { value: String },

    /// Scale boundaries must be strictly increasing
    #[error("Invalid scale boundaries [{from}, {middle}, {to}]")]
    InvalidScaleBoundaries { from: f64, middle: f64, to: f64 },

    /// Unsupported profile look-ahead distance
    #[error("Unknown profile distance: {meters} m")]
    UnknownProfileDistance { meters: u32 },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// IO error
    #[error("IO error: {reason}")]
    IoError { reason: String },

    /// Generic playback error
    #[error("Playback error: {message}")]
    Generic { message: String },
}

impl PlaybackError {
    /// Create a new generic error
    pub fn new(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Attach a poll delay to a `DataNotReady` error; any other error
    /// passes through unchanged.
    pub fn with_retry_after(mut self, milliseconds: u64) -> Self {
        if let Self::DataNotReady { retry_after_ms, .. } = &mut self {
            *retry_after_ms = milliseconds;
        }
        self
    }

    /// Check if this is a recoverable error.
    /// `DataNotReady` in particular means "poll again after the delay".
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::DataNotReady { .. } | Self::TimeOutOfRange { .. } | Self::IoError { .. }
        )
    }

    /// Get error category for logging/metrics
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::DataNotReady { .. } => "loading",
            Self::InvalidTime { .. } | Self::TimeOutOfRange { .. } => "time",
            Self::TableLengthMismatch { .. }
            | Self::NonFiniteValue { .. }
            | Self::NonMonotonicTimestamps { .. }
            | Self::MalformedRow { .. } => "data",
            Self::InvalidColor { .. }
            | Self::InvalidScaleBoundaries { .. }
            | Self::UnknownProfileDistance { .. } => "style",
            Self::SerializationError { .. } => "serialization",
            Self::IoError { .. } => "io",
            Self::Generic { .. } => "generic",
        }
    }
}

impl From<std::io::Error> for PlaybackError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PlaybackError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for PlaybackError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}

impl From<bincode::Error> for PlaybackError {
    fn from(err: bincode::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = PlaybackError::new("test error");
        assert!(matches!(error, PlaybackError::Generic { .. }));
    }

    #[test]
    fn test_error_recoverability() {
        let recoverable = PlaybackError::DataNotReady {
            missing: "pose tables".to_string(),
            retry_after_ms: 3000,
        };
        assert!(recoverable.is_recoverable());

        let non_recoverable = PlaybackError::NonFiniteValue {
            table: "translations".to_string(),
            row: 12,
        };
        assert!(!non_recoverable.is_recoverable());
    }

    #[test]
    fn test_error_categories() {
        let loading = PlaybackError::DataNotReady {
            missing: "profile transforms".to_string(),
            retry_after_ms: 3000,
        };
        assert_eq!(loading.category(), "loading");

        let time = PlaybackError::InvalidTime { time: -1.0 };
        assert_eq!(time.category(), "time");
    }

    #[test]
    fn test_serialization() {
        let error = PlaybackError::new("test");
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: PlaybackError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
