//! Assembly of a `Recording` from the pipeline's file set.

use std::fs;
use std::path::Path;

use log::debug;
use nalgebra::{Matrix3, Vector3};

use crate::error::PlaybackError;
use crate::pose::{rotation_from_euler_xzy, PoseTable};
use crate::profile::{ProfileDistance, ProfileTransforms};
use crate::recording::Recording;
use crate::timeline::Timeline;

use super::tables::{
    euler_rows, parse_camera_timestamps, parse_chunk_timestamps, parse_csv_table,
    parse_space_table, points_from_rows, translations_from_rows,
};

/// Raw file contents of one recording, keyed the way the pipeline lays
/// them out on disk. Hosts that receive uploads fill this directly.
#[derive(Debug, Clone, Default)]
pub struct RecordingParts {
    /// Camera translations, csv, columns stored y-z-x.
    pub translations_csv: String,
    /// Camera rotations, csv, Euler angles in x-z-y order, degrees.
    pub rotations_csv: String,
    /// Camera timestamps, csv with header, nanoseconds in column one.
    pub camera_timestamps_csv: String,
    /// Chunk timestamps, two space-separated columns, seconds in column
    /// two.
    pub chunk_timestamps_txt: String,
    /// Profile translations per distance (25, 50, 75, 100 m),
    /// space-separated.
    pub profile_translations: [String; 4],
    /// Profile rotations per distance, space-separated Euler rows.
    pub profile_rotations: [String; 4],
    /// The profile outline placed at the origin, csv.
    pub profile_outline_csv: String,
}

impl RecordingParts {
    /// Read the canonical file set from a recording directory:
    /// `trans.csv`, `rot.csv`, `camera_timestamps.csv`,
    /// `chunk_timestamps.txt`, `profile_shape.csv` and
    /// `profile/profile_{trans,rot}_{25,50,75,100}.csv`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, PlaybackError> {
        let dir = dir.as_ref();
        let read = |name: &str| fs::read_to_string(dir.join(name));

        let mut profile_translations: [String; 4] = Default::default();
        let mut profile_rotations: [String; 4] = Default::default();
        for distance in ProfileDistance::ALL {
            let meters = distance.meters();
            profile_translations[distance.index()] =
                read(&format!("profile/profile_trans_{meters}.csv"))?;
            profile_rotations[distance.index()] =
                read(&format!("profile/profile_rot_{meters}.csv"))?;
        }

        Ok(Self {
            translations_csv: read("trans.csv")?,
            rotations_csv: read("rot.csv")?,
            camera_timestamps_csv: read("camera_timestamps.csv")?,
            chunk_timestamps_txt: read("chunk_timestamps.txt")?,
            profile_translations,
            profile_rotations,
            profile_outline_csv: read("profile_shape.csv")?,
        })
    }

    /// Parse every part and assemble the validated recording.
    pub fn assemble(&self) -> Result<Recording, PlaybackError> {
        let translations = translations_from_rows(&parse_csv_table(&self.translations_csv)?)?;
        let rotations = euler_rows(&parse_csv_table(&self.rotations_csv)?)?;
        let poses = PoseTable::from_raw(translations, &rotations)?;

        let timeline = Timeline::new(parse_camera_timestamps(&self.camera_timestamps_csv)?)?;
        let chunk_timestamps = parse_chunk_timestamps(&self.chunk_timestamps_txt)?;

        let mut profile_translations: [Vec<Vector3<f64>>; 4] = Default::default();
        let mut profile_rotations: [Vec<Matrix3<f64>>; 4] = Default::default();
        for distance in ProfileDistance::ALL {
            let n = distance.index();
            profile_translations[n] =
                translations_from_rows(&parse_space_table(&self.profile_translations[n])?)?;
            // the profile is placed through the inverse rotations
            profile_rotations[n] = euler_rows(&parse_space_table(&self.profile_rotations[n])?)?
                .iter()
                .map(|&angles| rotation_from_euler_xzy(angles).transpose())
                .collect();
        }
        let profiles = ProfileTransforms::from_raw(&profile_translations, &profile_rotations)?;

        let profile_outline = points_from_rows(&parse_csv_table(&self.profile_outline_csv)?)?;

        debug!(
            "assembled recording: {} frames, {} chunks, {} outline points",
            timeline.frame_count(),
            chunk_timestamps.len(),
            profile_outline.len()
        );
        Recording::new(poses, timeline, chunk_timestamps, profiles, profile_outline)
    }
}

/// Load a recording from its directory in one step.
pub fn load_recording_dir(dir: impl AsRef<Path>) -> Result<Recording, PlaybackError> {
    RecordingParts::from_dir(dir)?.assemble()
}
