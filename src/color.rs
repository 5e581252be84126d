//! Intensity color scales for point-cloud layers.
//!
//! The renderer calls these as pure per-point accessors; nothing here
//! touches layer or session state.

use serde::{Deserialize, Serialize};

use crate::error::PlaybackError;

/// Boundaries of the intensity color scale - [from, middle, to].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleBoundaries {
    pub from: f64,
    pub middle: f64,
    pub to: f64,
}

impl ScaleBoundaries {
    /// Create new boundaries; they must be strictly increasing.
    pub fn new(from: f64, middle: f64, to: f64) -> Result<Self, PlaybackError> {
        if !(from < middle && middle < to) || !from.is_finite() || !to.is_finite() {
            return Err(PlaybackError::InvalidScaleBoundaries { from, middle, to });
        }
        Ok(Self { from, middle, to })
    }
}

impl Default for ScaleBoundaries {
    fn default() -> Self {
        Self {
            from: 0.0,
            middle: 10.0,
            to: 20.0,
        }
    }
}

/// Maps point intensity to an RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorScale {
    /// Blue under the scale, red over it, blue-green-red ramp in between.
    BlueGreenRed,
    /// Yellow under the scale, purple over it, single yellow-purple ramp.
    YellowPurple,
    /// Fixed-breakpoint ramp with no configurable boundaries.
    IntensityRgb,
}

impl ColorScale {
    /// Get the name of this color scale
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::BlueGreenRed => "bgr",
            Self::YellowPurple => "yp",
            Self::IntensityRgb => "rgb",
        }
    }

    /// Map a point intensity to a color on this scale.
    pub fn color_for(&self, intensity: f64, boundaries: &ScaleBoundaries) -> [u8; 3] {
        match self {
            Self::BlueGreenRed => bgr_color(intensity, boundaries),
            Self::YellowPurple => yp_color(intensity, boundaries),
            Self::IntensityRgb => intensity_rgb_color(intensity),
        }
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        ColorScale::BlueGreenRed
    }
}

impl From<&str> for ColorScale {
    fn from(s: &str) -> Self {
        match s {
            "bgr" => Self::BlueGreenRed,
            "yp" => Self::YellowPurple,
            "rgb" => Self::IntensityRgb,
            _ => Self::BlueGreenRed,
        }
    }
}

#[inline]
fn channel(value: f64) -> u8 {
    value.floor().clamp(0.0, 255.0) as u8
}

fn bgr_color(intensity: f64, b: &ScaleBoundaries) -> [u8; 3] {
    if intensity < b.from {
        [0, 0, 255] // under the scale - blue
    } else if intensity > b.to {
        [255, 0, 0] // over the scale - red
    } else if intensity < b.middle {
        let ramp = 255.0 * (intensity - b.from) / (b.middle - b.from);
        [0, channel(ramp), channel(255.0 - ramp)]
    } else {
        let ramp = 255.0 * (intensity - b.middle) / (b.to - b.middle);
        [channel(ramp), channel(255.0 - ramp), 0]
    }
}

fn yp_color(intensity: f64, b: &ScaleBoundaries) -> [u8; 3] {
    if intensity < b.from {
        [255, 255, 0] // under the scale - yellow
    } else if intensity > b.to {
        [255, 0, 255] // over the scale - purple
    } else {
        let ramp = 255.0 * (intensity - b.from) / (b.to - b.from);
        [255, channel(255.0 - ramp), channel(ramp)]
    }
}

fn intensity_rgb_color(intensity: f64) -> [u8; 3] {
    if intensity > 6.0 {
        [
            channel(7.0 * (intensity - 6.0)),
            channel(255.0 - 7.0 * (intensity - 6.0)),
            0,
        ]
    } else {
        [
            0,
            channel(51.0 * intensity),
            channel(255.0 - 51.0 * intensity),
        ]
    }
}

/// Parse a `#RRGGBB` line color as delivered by the host color picker.
pub fn parse_hex_color(value: &str) -> Result<[u8; 3], PlaybackError> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(PlaybackError::InvalidColor {
            value: value.to_string(),
        });
    }
    let parse = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| PlaybackError::InvalidColor {
            value: value.to_string(),
        })
    };
    Ok([parse(0..2)?, parse(2..4)?, parse(4..6)?])
}
