//! Predicted profile overlay geometry.
//!
//! The profile outline is drawn some distance ahead of the vehicle; one
//! placement-matrix table exists per supported look-ahead distance.

use nalgebra::{Matrix3, Matrix3x4, Vector3, Vector4};
use serde::{Deserialize, Serialize};

use crate::error::PlaybackError;

/// Supported look-ahead distances for the profile overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileDistance {
    M25,
    M50,
    M75,
    M100,
}

impl ProfileDistance {
    pub const ALL: [ProfileDistance; 4] = [Self::M25, Self::M50, Self::M75, Self::M100];

    /// Index into the per-distance tables.
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Self::M25 => 0,
            Self::M50 => 1,
            Self::M75 => 2,
            Self::M100 => 3,
        }
    }

    /// The distance in meters.
    #[inline]
    pub fn meters(&self) -> u32 {
        match self {
            Self::M25 => 25,
            Self::M50 => 50,
            Self::M75 => 75,
            Self::M100 => 100,
        }
    }

    /// Parse a distance in meters.
    pub fn from_meters(meters: u32) -> Result<Self, PlaybackError> {
        match meters {
            25 => Ok(Self::M25),
            50 => Ok(Self::M50),
            75 => Ok(Self::M75),
            100 => Ok(Self::M100),
            _ => Err(PlaybackError::UnknownProfileDistance { meters }),
        }
    }
}

impl Default for ProfileDistance {
    fn default() -> Self {
        ProfileDistance::M25
    }
}

/// Build the placement matrix for one profile position: translate the
/// outline to the predicted point, rotating it around that point. The
/// result is the top three rows of `T(translation) * R`.
pub fn placement_matrix(translation: &Vector3<f64>, rotation: &Matrix3<f64>) -> Matrix3x4<f64> {
    #[rustfmt::skip]
    let matrix = Matrix3x4::new(
        rotation[(0, 0)], rotation[(0, 1)], rotation[(0, 2)], translation.x,
        rotation[(1, 0)], rotation[(1, 1)], rotation[(1, 2)], translation.y,
        rotation[(2, 0)], rotation[(2, 1)], rotation[(2, 2)], translation.z,
    );
    matrix
}

/// Per-frame placement matrices for every supported look-ahead distance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileTransforms {
    tables: [Vec<Matrix3x4<f64>>; 4],
}

impl ProfileTransforms {
    /// Create the transform set. Every distance table must be non-empty
    /// and finite; lengths may differ between distances.
    pub fn new(tables: [Vec<Matrix3x4<f64>>; 4]) -> Result<Self, PlaybackError> {
        for (distance, table) in ProfileDistance::ALL.iter().zip(tables.iter()) {
            if table.is_empty() {
                return Err(PlaybackError::DataNotReady {
                    missing: format!("profile transforms for {} m", distance.meters()),
                    retry_after_ms: 0,
                });
            }
            for (row, matrix) in table.iter().enumerate() {
                if !matrix.iter().all(|v| v.is_finite()) {
                    return Err(PlaybackError::NonFiniteValue {
                        table: format!("profile transforms for {} m", distance.meters()),
                        row,
                    });
                }
            }
        }
        Ok(Self { tables })
    }

    /// Assemble the transform set from per-distance translations and
    /// (inverse) rotation matrices.
    pub fn from_raw(
        translations: &[Vec<Vector3<f64>>; 4],
        rotations: &[Vec<Matrix3<f64>>; 4],
    ) -> Result<Self, PlaybackError> {
        let mut tables: [Vec<Matrix3x4<f64>>; 4] = Default::default();
        for (distance, table) in ProfileDistance::ALL.iter().zip(tables.iter_mut()) {
            let n = distance.index();
            if translations[n].len() != rotations[n].len() {
                return Err(PlaybackError::TableLengthMismatch {
                    table: format!("profile rotations for {} m", distance.meters()),
                    expected: translations[n].len(),
                    actual: rotations[n].len(),
                });
            }
            table.extend(
                translations[n]
                    .iter()
                    .zip(rotations[n].iter())
                    .map(|(translation, rotation)| placement_matrix(translation, rotation)),
            );
        }
        Self::new(tables)
    }

    /// Number of frames covered for a distance.
    #[inline]
    pub fn frame_count(&self, distance: ProfileDistance) -> usize {
        self.tables[distance.index()].len()
    }

    /// Apply the frame's placement to the base outline, yielding the
    /// world-space outline path. Positions beyond the table clamp to its
    /// last row.
    pub fn place_outline(
        &self,
        distance: ProfileDistance,
        position: usize,
        outline: &[[f64; 3]],
    ) -> Vec<[f64; 3]> {
        let table = &self.tables[distance.index()];
        let matrix = &table[position.min(table.len() - 1)];
        outline
            .iter()
            .map(|point| {
                let placed = matrix * Vector4::new(point[0], point[1], point[2], 1.0);
                [placed.x, placed.y, placed.z]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance_mapping() {
        assert_eq!(ProfileDistance::M25.index(), 0);
        assert_eq!(ProfileDistance::M100.index(), 3);
        assert_eq!(ProfileDistance::from_meters(50).unwrap(), ProfileDistance::M50);
        assert!(ProfileDistance::from_meters(42).is_err());
    }

    #[test]
    fn test_placement_translates_then_rotates() {
        let matrix = placement_matrix(&Vector3::new(1.0, 2.0, 3.0), &Matrix3::identity());
        let placed = matrix * Vector4::new(0.5, 0.0, 0.0, 1.0);
        assert_relative_eq!(placed.x, 1.5);
        assert_relative_eq!(placed.y, 2.0);
        assert_relative_eq!(placed.z, 3.0);
    }

    #[test]
    fn test_place_outline_clamps_position() {
        let tables = ProfileTransforms::from_raw(
            &[
                vec![Vector3::zeros(), Vector3::new(0.0, 0.0, 5.0)],
                vec![Vector3::zeros()],
                vec![Vector3::zeros()],
                vec![Vector3::zeros()],
            ],
            &[
                vec![Matrix3::identity(), Matrix3::identity()],
                vec![Matrix3::identity()],
                vec![Matrix3::identity()],
                vec![Matrix3::identity()],
            ],
        )
        .unwrap();

        let outline = [[1.0, 0.0, 0.0]];
        let placed = tables.place_outline(ProfileDistance::M25, 999, &outline);
        assert_relative_eq!(placed[0][2], 5.0);
    }

    #[test]
    fn test_rejects_empty_distance_table() {
        let err = ProfileTransforms::new([Vec::new(), Vec::new(), Vec::new(), Vec::new()])
            .unwrap_err();
        assert!(matches!(err, PlaybackError::DataNotReady { .. }));
    }
}
