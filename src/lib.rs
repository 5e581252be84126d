//! Railview Playback Core
//!
//! A playback engine for replaying a precomputed sequence of camera poses and
//! point-cloud frames in lockstep with an external media clock. The crate owns
//! the frame-index bookkeeping, pose resolution and layer assembly; rendering,
//! the media element and the host UI stay on the other side of the data it
//! hands out.

pub mod chunks;
pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod event;
pub mod layers;
pub mod loaders;
pub mod pose;
pub mod profile;
pub mod recording;
pub mod session;
pub mod time;
pub mod timeline;

// Re-export common types for convenience
pub use chunks::ChunkWindow;
pub use clock::{IntervalClock, ManualClock, MediaClock};
pub use color::{ColorScale, ScaleBoundaries};
pub use config::{SessionConfig, ViewDefaults};
pub use error::PlaybackError;
pub use event::SessionEvent;
pub use layers::{LayerDescriptor, LineStyle, PointCloudSource, PointCloudStyle, SceneStyles};
pub use pose::{CameraIntrinsics, CameraOffset, PoseTable, Viewpoint};
pub use profile::{ProfileDistance, ProfileTransforms};
pub use recording::Recording;
pub use session::{PlaybackSession, PlaybackState, TickUpdate};
pub use time::{MediaTime, TimeRange};
pub use timeline::Timeline;

/// Playback core result type
pub type Result<T> = core::result::Result<T, PlaybackError>;
