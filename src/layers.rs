//! Renderable layer descriptors.
//!
//! The renderer owns the bulk data (chunk point arrays, guide polylines,
//! vector paths); descriptors reference it by source and carry the style
//! to draw it with. The stack is rebuilt in full on every relevant state
//! change - layer counts are small enough that diffing buys nothing.

use serde::{Deserialize, Serialize};

use crate::chunks::ChunkWindow;
use crate::color::{ColorScale, ScaleBoundaries};
use crate::config::ViewDefaults;
use crate::profile::ProfileDistance;

/// Where a point-cloud layer takes its points from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointCloudSource {
    /// One chunk of the divided ("real-time") point cloud.
    Chunk(usize),
    /// The whole postprocessed point cloud.
    United,
}

/// Style of the point-cloud layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointCloudStyle {
    pub visible: bool,
    pub point_size: u32,
    pub color_scale: ColorScale,
    pub opacity: f64,
}

/// Style of a path layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub visible: bool,
    pub width: u32,
    pub color: [u8; 3],
}

/// Current styles for every layer kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneStyles {
    pub point_cloud: PointCloudStyle,
    pub profile_line: LineStyle,
    pub profile: LineStyle,
    pub vectors: LineStyle,
    pub boundaries: ScaleBoundaries,
}

impl SceneStyles {
    /// Initial styles derived from the view defaults.
    pub fn from_view(view: &ViewDefaults) -> Self {
        Self {
            point_cloud: PointCloudStyle {
                visible: true,
                point_size: view.point_size,
                color_scale: ColorScale::default(),
                opacity: view.opacity,
            },
            profile_line: LineStyle {
                visible: true,
                width: view.line_width,
                color: [232, 175, 16],
            },
            profile: LineStyle {
                visible: true,
                width: view.profile_line_width,
                color: [225, 80, 255],
            },
            vectors: LineStyle {
                visible: true,
                width: view.line_width,
                color: [250, 101, 15],
            },
            boundaries: ScaleBoundaries::default(),
        }
    }
}

impl Default for SceneStyles {
    fn default() -> Self {
        Self::from_view(&ViewDefaults::default())
    }
}

/// One renderable layer, opaque to the playback core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayerDescriptor {
    /// A point-cloud layer fed from one source.
    PointCloud {
        id: String,
        source: PointCloudSource,
        style: PointCloudStyle,
        boundaries: ScaleBoundaries,
    },
    /// The guide line through the predicted profile positions for the
    /// selected distance.
    ProfileLine {
        id: String,
        distance: ProfileDistance,
        style: LineStyle,
    },
    /// The profile outline placed at the current frame, drawn on top of
    /// the other layers.
    ProfileOutline {
        id: String,
        path: Vec<[f64; 3]>,
        style: LineStyle,
        draw_on_top: bool,
    },
    /// The vector overlay (polylines).
    VectorPaths { id: String, style: LineStyle },
}

impl LayerDescriptor {
    /// Stable identifier the renderer keys its layers by.
    pub fn id(&self) -> &str {
        match self {
            Self::PointCloud { id, .. }
            | Self::ProfileLine { id, .. }
            | Self::ProfileOutline { id, .. }
            | Self::VectorPaths { id, .. } => id,
        }
    }
}

/// Rebuild the full layer stack for the current session state.
pub fn build_stack(
    window: &ChunkWindow,
    united: bool,
    outline_path: Vec<[f64; 3]>,
    distance: ProfileDistance,
    styles: &SceneStyles,
) -> Vec<LayerDescriptor> {
    let cloud_count = if united { 1 } else { window.capacity() };
    let mut stack = Vec::with_capacity(cloud_count + 3);

    for n in 0..cloud_count {
        let source = if united {
            PointCloudSource::United
        } else {
            PointCloudSource::Chunk(window.slots()[n])
        };
        stack.push(LayerDescriptor::PointCloud {
            id: format!("point-cloud-layer{n}"),
            source,
            style: styles.point_cloud,
            boundaries: styles.boundaries,
        });
    }

    stack.push(LayerDescriptor::ProfileLine {
        id: "profile-line-layer".to_string(),
        distance,
        style: styles.profile_line,
    });
    stack.push(LayerDescriptor::ProfileOutline {
        id: "profile-layer".to_string(),
        path: outline_path,
        style: styles.profile,
        draw_on_top: true,
    });
    stack.push(LayerDescriptor::VectorPaths {
        id: "vector-layer".to_string(),
        style: styles.vectors,
    });

    stack
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divided_stack_shape() {
        let mut window = ChunkWindow::new(10);
        window.refill(7);
        let stack = build_stack(
            &window,
            false,
            Vec::new(),
            ProfileDistance::M25,
            &SceneStyles::default(),
        );

        assert_eq!(stack.len(), 13);
        assert_eq!(stack[0].id(), "point-cloud-layer0");
        assert_eq!(stack[9].id(), "point-cloud-layer9");
        assert!(matches!(
            stack[9],
            LayerDescriptor::PointCloud {
                source: PointCloudSource::Chunk(7),
                ..
            }
        ));
        assert_eq!(stack[12].id(), "vector-layer");
    }

    #[test]
    fn test_united_stack_has_single_cloud() {
        let window = ChunkWindow::new(10);
        let stack = build_stack(
            &window,
            true,
            Vec::new(),
            ProfileDistance::M50,
            &SceneStyles::default(),
        );
        assert_eq!(stack.len(), 4);
        assert!(matches!(
            stack[0],
            LayerDescriptor::PointCloud {
                source: PointCloudSource::United,
                ..
            }
        ));
    }

    #[test]
    fn test_outline_drawn_on_top() {
        let window = ChunkWindow::new(1);
        let stack = build_stack(
            &window,
            false,
            vec![[0.0, 0.0, 0.0]],
            ProfileDistance::M25,
            &SceneStyles::default(),
        );
        let outline = stack
            .iter()
            .find(|layer| layer.id() == "profile-layer")
            .unwrap();
        assert!(matches!(
            outline,
            LayerDescriptor::ProfileOutline {
                draw_on_top: true,
                ..
            }
        ));
    }
}
