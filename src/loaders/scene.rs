//! Scene definition (JSON) and camera parameter (YAML) files.

use serde::Deserialize;

use crate::color::ColorScale;
use crate::config::ViewDefaults;
use crate::error::PlaybackError;
use crate::layers::{LineStyle, SceneStyles};
use crate::pose::CameraIntrinsics;

/// The host's scene description: view parameters plus one style entry
/// per layer kind, in stack order (point cloud, profile line, profile
/// outline, vectors).
#[derive(Debug, Clone, Deserialize)]
pub struct SceneDefinition {
    pub views: Vec<ViewDefinition>,
    pub layers: Vec<LayerDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewDefinition {
    pub projection_matrix: Vec<f64>,
    #[serde(default)]
    pub controller: bool,
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerDefinition {
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub point_size: Option<u32>,
    #[serde(default)]
    pub point_color: Option<String>,
    #[serde(default)]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub color: Option<[u8; 3]>,
}

impl SceneDefinition {
    /// Merge the definition's layer entries onto the default styles.
    pub fn styles(&self, defaults: &ViewDefaults) -> SceneStyles {
        let mut styles = SceneStyles::from_view(defaults);

        if let Some(def) = self.layers.first() {
            styles.point_cloud.visible = def.visible;
            if let Some(size) = def.point_size {
                styles.point_cloud.point_size = size;
            }
            if let Some(scale) = def.point_color.as_deref() {
                styles.point_cloud.color_scale = ColorScale::from(scale);
            }
            if let Some(opacity) = def.opacity {
                styles.point_cloud.opacity = opacity;
            }
        }
        apply_line(self.layers.get(1), &mut styles.profile_line);
        apply_line(self.layers.get(2), &mut styles.profile);
        apply_line(self.layers.get(3), &mut styles.vectors);

        styles
    }
}

fn apply_line(def: Option<&LayerDefinition>, style: &mut LineStyle) {
    if let Some(def) = def {
        style.visible = def.visible;
        if let Some(width) = def.width {
            style.width = width;
        }
        if let Some(color) = def.color {
            style.color = color;
        }
    }
}

/// Parse a scene definition from JSON.
pub fn parse_scene_definition(json: &str) -> Result<SceneDefinition, PlaybackError> {
    Ok(serde_json::from_str(json)?)
}

/// Calibration file layout: OpenCV-style YAML with dotted scalar keys
/// and a flattened row-major camera matrix.
#[derive(Debug, Deserialize)]
struct CameraParamsFile {
    #[serde(rename = "Camera.width")]
    width: f64,
    #[serde(rename = "Camera.height")]
    height: f64,
    #[serde(rename = "CameraMat")]
    camera_mat: MatrixData,
}

#[derive(Debug, Deserialize)]
struct MatrixData {
    data: Vec<f64>,
}

/// Parse camera intrinsics from a calibration YAML file.
pub fn parse_camera_params(yaml: &str) -> Result<CameraIntrinsics, PlaybackError> {
    let file: CameraParamsFile = serde_yaml::from_str(yaml)?;
    let data = &file.camera_mat.data;
    if data.len() < 9 {
        return Err(PlaybackError::MalformedRow {
            row: 0,
            reason: format!("camera matrix needs 9 values, got {}", data.len()),
        });
    }
    Ok(CameraIntrinsics {
        width: file.width,
        height: file.height,
        fx: data[0],
        fy: data[4],
        cx: data[2],
        cy: data[5],
    })
}
