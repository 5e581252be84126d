//! Session configuration.
//! Defaults mirror the reference recording's tuning; hosts override what
//! their data set needs.

use serde::{Deserialize, Serialize};

use crate::color::ScaleBoundaries;
use crate::profile::ProfileDistance;

/// Configuration for a playback session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of point-cloud chunks kept visible in divided mode.
    pub chunk_window: usize,
    /// Default intensity color-scale boundaries [from, middle, to].
    pub scale_boundaries: ScaleBoundaries,
    /// Default look-ahead distance for the profile overlay.
    pub profile_distance: ProfileDistance,
    /// Delay before re-checking for not-yet-loaded tables, in milliseconds.
    pub data_poll_interval_ms: u64,
    /// View parameters handed to the renderer.
    pub view: ViewDefaults,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            chunk_window: 10,
            scale_boundaries: ScaleBoundaries::default(),
            profile_distance: ProfileDistance::default(),
            data_poll_interval_ms: 3000,
            view: ViewDefaults::default(),
        }
    }
}

/// Renderer-facing view parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewDefaults {
    /// Point size for point-cloud layers.
    pub point_size: u32,
    /// Point-cloud layer opacity.
    pub opacity: f64,
    /// Line width for path layers.
    pub line_width: u32,
    /// Line width for the profile outline.
    pub profile_line_width: u32,
    /// Vertical field of view in degrees.
    pub fovy: f64,
    /// Near clipping plane distance.
    pub near_plane: f64,
    /// Far clipping plane distance.
    pub far_plane: f64,
    /// Base camera position nudge (left/right, up/down, forward/back).
    pub camera_position: [f64; 3],
    /// Base camera bearing trim in degrees.
    pub bearing: f64,
    /// Base camera pitch trim in degrees.
    pub pitch: f64,
    /// Orbit-view zoom level.
    pub zoom: f64,
}

impl Default for ViewDefaults {
    fn default() -> Self {
        Self {
            point_size: 16,
            opacity: 0.7,
            line_width: 60,
            profile_line_width: 40,
            fovy: 37.0,
            near_plane: 0.1,
            far_plane: 300.0,
            camera_position: [0.0, -1.1, 0.45],
            bearing: 91.5,
            pitch: 1.3,
            zoom: 10.0,
        }
    }
}
