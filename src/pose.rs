//! Camera pose tables and per-frame pose resolution.
//!
//! The pose of the virtual camera at a frame is the composition of the
//! recorded vehicle pose for that frame and the offset the user dialed
//! in. The recorded tables are derived once at load time and read-only
//! afterwards; the offset is applied on every resolution without
//! touching them.

use nalgebra::{Matrix3, Matrix4, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::PlaybackError;

/// Bearing of the unrotated camera. The track frame looks along +x,
/// while bearing is measured from north.
const BEARING_BASE: f64 = 90.0;

/// User-controlled camera offset - translation plus Euler trim, all
/// applied additively on top of the recorded pose.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraOffset {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Bearing trim in degrees.
    pub yaw: f64,
    /// Pitch trim in degrees.
    pub pitch: f64,
    /// Roll trim in degrees.
    pub roll: f64,
}

impl CameraOffset {
    #[inline]
    pub fn translation(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// Resolved world-space camera viewpoint for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewpoint {
    pub position: [f64; 3],
    /// Heading in degrees, measured from north.
    pub bearing: f64,
    pub pitch: f64,
    /// Roll in degrees; the renderer applies it by rotating the canvas.
    pub roll: f64,
}

impl Viewpoint {
    /// Whether every component is a finite number.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|v| v.is_finite())
            && self.bearing.is_finite()
            && self.pitch.is_finite()
            && self.roll.is_finite()
    }
}

/// Precomputed per-frame camera pose data: parallel arrays of rotation
/// matrices, their inverses, translations and camera-ready Euler angles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseTable {
    rotations: Vec<Matrix3<f64>>,
    inverse_rotations: Vec<Matrix3<f64>>,
    translations: Vec<Vector3<f64>>,
    /// [yaw, pitch, roll] in degrees per frame.
    eulers: Vec<[f64; 3]>,
}

impl PoseTable {
    /// Create a pose table from already-derived parallel arrays.
    /// All four must be non-empty, equally long and finite.
    pub fn new(
        rotations: Vec<Matrix3<f64>>,
        inverse_rotations: Vec<Matrix3<f64>>,
        translations: Vec<Vector3<f64>>,
        eulers: Vec<[f64; 3]>,
    ) -> Result<Self, PlaybackError> {
        let expected = rotations.len();
        if expected == 0 {
            return Err(PlaybackError::DataNotReady {
                missing: "camera pose tables".to_string(),
                retry_after_ms: 0,
            });
        }
        for (table, actual) in [
            ("inverse rotations", inverse_rotations.len()),
            ("translations", translations.len()),
            ("euler angles", eulers.len()),
        ] {
            if actual != expected {
                return Err(PlaybackError::TableLengthMismatch {
                    table: table.to_string(),
                    expected,
                    actual,
                });
            }
        }

        for row in 0..expected {
            let finite = rotations[row].iter().all(|v| v.is_finite())
                && inverse_rotations[row].iter().all(|v| v.is_finite())
                && translations[row].iter().all(|v| v.is_finite())
                && eulers[row].iter().all(|v| v.is_finite());
            if !finite {
                return Err(PlaybackError::NonFiniteValue {
                    table: "camera poses".to_string(),
                    row,
                });
            }
        }

        Ok(Self {
            rotations,
            inverse_rotations,
            translations,
            eulers,
        })
    }

    /// Derive a pose table from raw recorded data: per-frame translations
    /// and rotations as Euler angles in the recording's x-z-y order.
    pub fn from_raw(
        translations: Vec<Vector3<f64>>,
        euler_rows: &[[f64; 3]],
    ) -> Result<Self, PlaybackError> {
        let mut rotations = Vec::with_capacity(euler_rows.len());
        let mut inverse_rotations = Vec::with_capacity(euler_rows.len());
        let mut eulers = Vec::with_capacity(euler_rows.len());
        for row in euler_rows {
            let rotation = rotation_from_euler_xzy(*row);
            inverse_rotations.push(rotation.transpose());
            eulers.push(camera_euler_degrees(&rotation));
            rotations.push(rotation);
        }
        Self::new(rotations, inverse_rotations, translations, eulers)
    }

    /// Number of frames in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.rotations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rotations.is_empty()
    }

    /// Recorded translation of a frame, out-of-range positions clamped.
    #[inline]
    pub fn translation(&self, position: usize) -> Vector3<f64> {
        self.translations[position.min(self.len() - 1)]
    }

    /// Resolve the camera viewpoint for a frame.
    ///
    /// The offset translation is added in the rotated frame, the sum is
    /// carried back to world space through the inverse rotation, and the
    /// angle trims are summed onto the recorded Euler angles. Positions
    /// beyond the table clamp to the last frame.
    pub fn resolve(&self, position: usize, offset: &CameraOffset) -> Viewpoint {
        let index = position.min(self.len() - 1);

        let sum = offset.translation() + self.rotations[index] * self.translations[index];
        let world = self.inverse_rotations[index] * sum;
        let euler = self.eulers[index];

        Viewpoint {
            position: [world.x, world.y, world.z],
            bearing: BEARING_BASE + euler[0] + offset.yaw,
            pitch: euler[1] + offset.pitch,
            roll: euler[2] + offset.roll,
        }
    }

    /// Serialize the derived tables for caching.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PlaybackError> {
        Ok(bincode::serialize(self)?)
    }

    /// Restore a cached pose table, re-running validation on the result.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PlaybackError> {
        let table: PoseTable = bincode::deserialize(bytes)?;
        Self::new(
            table.rotations,
            table.inverse_rotations,
            table.translations,
            table.eulers,
        )
    }
}

/// Build a rotation matrix from Euler angles in the recording's format:
/// extrinsic x-z-y order, degrees. (Translations are stored y-z-x
/// instead of x-y-z, which is why rotations arrive x-z-y instead of
/// z-y-x.)
pub fn rotation_from_euler_xzy(angles_deg: [f64; 3]) -> Matrix3<f64> {
    let [x, z, y] = angles_deg.map(f64::to_radians);
    let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), x);
    let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), z);
    let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), y);
    (ry * rz * rx).into_inner()
}

/// Convert a rotation matrix to the camera's Euler angles:
/// [yaw, pitch, roll] in degrees, from the extrinsic z-y-x decomposition
/// of the inverse rotation with yaw and roll negated.
pub fn camera_euler_degrees(rotation: &Matrix3<f64>) -> [f64; 3] {
    let inv = rotation.transpose();
    let z_angle = (-inv[(0, 1)]).atan2(inv[(0, 0)]);
    let y_angle = inv[(0, 2)].clamp(-1.0, 1.0).asin();
    let x_angle = (-inv[(1, 2)]).atan2(inv[(2, 2)]);
    [
        -z_angle.to_degrees(),
        y_angle.to_degrees(),
        -x_angle.to_degrees(),
    ]
}

/// Camera intrinsics as calibrated for the recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    pub width: f64,
    pub height: f64,
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
}

/// Build the renderer's projection matrix from camera intrinsics,
/// flattened column-major.
pub fn projection_matrix(intrinsics: &CameraIntrinsics, near: f64, far: f64) -> [f64; 16] {
    let w = intrinsics.width;
    let h = intrinsics.height;
    #[rustfmt::skip]
    let matrix = Matrix4::new(
        2.0 * intrinsics.fx / w, 0.0,                     2.0 * intrinsics.cx / w - 1.0, 0.0,
        0.0,                     2.0 * intrinsics.fy / h, 2.0 * intrinsics.cy / h - 1.0, 0.0,
        0.0,                     0.0,                     -(far + near) / (far - near),  -(2.0 * far * near) / (far - near),
        0.0,                     0.0,                     -1.0,                          0.0,
    );
    let mut flat = [0.0; 16];
    flat.copy_from_slice(matrix.as_slice());
    flat
}
