//! A loaded recording: every precomputed table playback reads from.
//!
//! Assembled once by the loaders (or by the host from uploaded data) and
//! replaced wholesale when a new data set arrives - playback never
//! mutates it.

use serde::{Deserialize, Serialize};

use crate::error::PlaybackError;
use crate::pose::PoseTable;
use crate::profile::ProfileTransforms;
use crate::time::MediaTime;
use crate::timeline::Timeline;

/// Immutable data bundle for one recorded ride.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    pub poses: PoseTable,
    pub timeline: Timeline,
    /// Timestamps of the point-cloud chunks, non-decreasing.
    pub chunk_timestamps: Vec<MediaTime>,
    pub profiles: ProfileTransforms,
    /// The profile outline placed at the origin.
    pub profile_outline: Vec<[f64; 3]>,
}

impl Recording {
    /// Assemble a recording, validating that the tables agree.
    pub fn new(
        poses: PoseTable,
        timeline: Timeline,
        chunk_timestamps: Vec<MediaTime>,
        profiles: ProfileTransforms,
        profile_outline: Vec<[f64; 3]>,
    ) -> Result<Self, PlaybackError> {
        if poses.len() != timeline.frame_count() {
            return Err(PlaybackError::TableLengthMismatch {
                table: "camera timestamps".to_string(),
                expected: poses.len(),
                actual: timeline.frame_count(),
            });
        }
        for (row, pair) in chunk_timestamps.windows(2).enumerate() {
            if pair[1] < pair[0] {
                return Err(PlaybackError::NonMonotonicTimestamps {
                    table: "chunk timestamps".to_string(),
                    row: row + 1,
                });
            }
        }
        Ok(Self {
            poses,
            timeline,
            chunk_timestamps,
            profiles,
            profile_outline,
        })
    }

    /// Number of camera frames.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.timeline.frame_count()
    }

    /// Number of point-cloud chunks.
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunk_timestamps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileTransforms;
    use nalgebra::{Matrix3, Vector3};

    fn poses(n: usize) -> PoseTable {
        PoseTable::from_raw(vec![Vector3::zeros(); n], &vec![[0.0, 0.0, 0.0]; n]).unwrap()
    }

    fn timeline(n: usize) -> Timeline {
        Timeline::new(
            (0..n)
                .map(|i| MediaTime::from_seconds(i as f64).unwrap())
                .collect(),
        )
        .unwrap()
    }

    fn profiles() -> ProfileTransforms {
        ProfileTransforms::from_raw(
            &[
                vec![Vector3::zeros()],
                vec![Vector3::zeros()],
                vec![Vector3::zeros()],
                vec![Vector3::zeros()],
            ],
            &[
                vec![Matrix3::identity()],
                vec![Matrix3::identity()],
                vec![Matrix3::identity()],
                vec![Matrix3::identity()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_assembles_consistent_tables() {
        let recording = Recording::new(poses(3), timeline(3), Vec::new(), profiles(), Vec::new())
            .unwrap();
        assert_eq!(recording.frame_count(), 3);
        assert_eq!(recording.chunk_count(), 0);
    }

    #[test]
    fn test_rejects_table_mismatch() {
        let err =
            Recording::new(poses(3), timeline(4), Vec::new(), profiles(), Vec::new()).unwrap_err();
        assert!(matches!(err, PlaybackError::TableLengthMismatch { .. }));
    }

    #[test]
    fn test_rejects_decreasing_chunk_timestamps() {
        let chunks = vec![MediaTime::from(1.0), MediaTime::from(0.5)];
        let err = Recording::new(poses(2), timeline(2), chunks, profiles(), Vec::new())
            .unwrap_err();
        assert!(matches!(err, PlaybackError::NonMonotonicTimestamps { .. }));
    }
}
