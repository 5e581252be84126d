//! Playback session: transport state plus everything one tick needs.
//!
//! One synchronous update per clock callback, no parallelism. The host
//! owns the actual media element; the session tells it what to show and
//! (through events) what to do with the clock.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::chunks::ChunkWindow;
use crate::color::{ColorScale, ScaleBoundaries};
use crate::config::SessionConfig;
use crate::event::{EventQueue, SessionEvent};
use crate::layers::{self, LayerDescriptor, SceneStyles};
use crate::pose::{CameraOffset, Viewpoint};
use crate::profile::ProfileDistance;
use crate::recording::Recording;
use crate::time::MediaTime;

/// Playback state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Fresh session, nothing played yet
    Stopped,
    /// Session is playing
    Playing,
    /// Session is paused
    Paused,
    /// Session has reached the last frame
    Ended,
}

impl PlaybackState {
    /// Get the name of this playback state
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Ended => "ended",
        }
    }

    /// Check if the session is actively playing
    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Check if playback can be (re)started
    #[inline]
    pub fn can_resume(&self) -> bool {
        matches!(self, Self::Paused | Self::Stopped | Self::Ended)
    }

    /// Check if playback can be paused
    #[inline]
    pub fn can_pause(&self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// Everything one tick hands back to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickUpdate {
    /// Current frame index.
    pub position: usize,
    /// Resolved camera viewpoint for the frame.
    pub viewpoint: Viewpoint,
    /// Full rebuilt layer stack.
    pub layers: Vec<LayerDescriptor>,
    /// The last frame was reached.
    pub ended: bool,
}

/// A playback session over one loaded recording.
#[derive(Debug)]
pub struct PlaybackSession {
    recording: Recording,
    config: SessionConfig,
    state: PlaybackState,
    position: usize,
    chunks: ChunkWindow,
    offset: CameraOffset,
    styles: SceneStyles,
    distance: ProfileDistance,
    /// Whether the united (postprocessed) point cloud is displayed
    /// instead of the divided one.
    united: bool,
    events: EventQueue,
}

impl PlaybackSession {
    /// Create a session at frame 0 with styles from the config.
    pub fn new(recording: Recording, config: SessionConfig) -> Self {
        let styles = SceneStyles::from_view(&config.view);
        let chunks = ChunkWindow::new(config.chunk_window);
        Self {
            distance: config.profile_distance,
            recording,
            config,
            state: PlaybackState::Stopped,
            position: 0,
            chunks,
            offset: CameraOffset::default(),
            styles,
            united: false,
            events: EventQueue::new(),
        }
    }

    /// One animation step, tied to the host's clock callback.
    ///
    /// Advances the frame index (forward only), walks the chunk window,
    /// resolves the camera pose and rebuilds the layer stack.
    pub fn tick(&mut self, time: MediaTime) -> TickUpdate {
        self.position = self.recording.timeline.advance(self.position, time);

        let ended = self.recording.timeline.is_last(self.position);
        if ended && self.state.is_playing() {
            self.state = PlaybackState::Ended;
            self.events.push(SessionEvent::EndReached);
        }

        if !self.united {
            self.chunks.advance(time, &self.recording.chunk_timestamps);
        }

        TickUpdate {
            position: self.position,
            viewpoint: self.viewpoint(),
            layers: self.layer_stack(),
            ended,
        }
    }

    /// Resolve the camera viewpoint at the current position.
    #[inline]
    pub fn viewpoint(&self) -> Viewpoint {
        self.recording.poses.resolve(self.position, &self.offset)
    }

    /// Rebuild the full layer stack for the current state. No diffing -
    /// every relevant change rebuilds all layers.
    pub fn layer_stack(&self) -> Vec<LayerDescriptor> {
        let outline = self.recording.profiles.place_outline(
            self.distance,
            self.position,
            &self.recording.profile_outline,
        );
        layers::build_stack(&self.chunks, self.united, outline, self.distance, &self.styles)
    }

    /// Start or resume playback. From the last frame, playback restarts
    /// at the beginning (the queued seek event tells the host to move
    /// its clock).
    pub fn play(&mut self) {
        if self.recording.timeline.is_last(self.position) {
            self.position = 0;
            self.chunks.refill(0);
            self.events.push(SessionEvent::Seeked {
                position: 0,
                media_time: self.recording.timeline.timestamp(0),
            });
        }
        debug!("playback started at frame {}", self.position);
        self.state = PlaybackState::Playing;
        self.events.push(SessionEvent::Started);
    }

    /// Pause playback, keeping the position.
    pub fn pause(&mut self) {
        if self.state.can_pause() {
            debug!("playback paused at frame {}", self.position);
            self.state = PlaybackState::Paused;
            self.events.push(SessionEvent::Paused);
        }
    }

    /// Start or pause depending on the current state. Returns whether
    /// the session is playing afterwards.
    pub fn toggle(&mut self) -> bool {
        if self.state.is_playing() {
            self.pause();
        } else {
            self.play();
        }
        self.state.is_playing()
    }

    /// Jump to a frame. Out-of-range positions clamp to the last frame.
    /// Returns the media time the host should seek its clock to.
    pub fn jump_to(&mut self, position: usize) -> MediaTime {
        let last = self.recording.timeline.last();
        if position > last {
            warn!("frame {} is beyond the last frame {}, clamping", position, last);
        }
        self.position = position.min(last);
        let media_time = self.recording.timeline.timestamp(self.position);
        self.chunks
            .seek(media_time, &self.recording.chunk_timestamps);
        if self.state == PlaybackState::Ended && self.position < last {
            self.state = PlaybackState::Paused;
        }
        self.events.push(SessionEvent::Seeked {
            position: self.position,
            media_time,
        });
        media_time
    }

    /// Jump a number of seconds forward or backward, clamped to the
    /// recording span. Returns the media time to seek the clock to.
    pub fn jump_by_seconds(&mut self, delta: f64) -> MediaTime {
        let target = self.recording.timeline.seek_relative(self.position, delta);
        self.jump_to(target)
    }

    /// Replace the user camera offset applied at pose resolution.
    #[inline]
    pub fn set_camera_offset(&mut self, offset: CameraOffset) {
        self.offset = offset;
    }

    #[inline]
    pub fn camera_offset(&self) -> CameraOffset {
        self.offset
    }

    /// Change the profile look-ahead distance.
    #[inline]
    pub fn set_profile_distance(&mut self, distance: ProfileDistance) {
        self.distance = distance;
    }

    #[inline]
    pub fn profile_distance(&self) -> ProfileDistance {
        self.distance
    }

    /// Switch between the united (postprocessed) and divided
    /// ("real-time") point cloud.
    pub fn set_united(&mut self, united: bool) {
        if self.united == united {
            return;
        }
        self.united = united;
        if united {
            self.chunks.set_capacity(1);
        } else {
            self.chunks.set_capacity(self.config.chunk_window);
            self.chunks.seek(
                self.recording.timeline.timestamp(self.position),
                &self.recording.chunk_timestamps,
            );
        }
    }

    #[inline]
    pub fn united(&self) -> bool {
        self.united
    }

    /// Change point-cloud visibility, point size, color scale and opacity.
    pub fn update_point_cloud_style(
        &mut self,
        visible: bool,
        point_size: u32,
        color_scale: ColorScale,
        opacity: f64,
    ) {
        self.styles.point_cloud.visible = visible;
        self.styles.point_cloud.point_size = point_size;
        self.styles.point_cloud.color_scale = color_scale;
        self.styles.point_cloud.opacity = opacity;
    }

    /// Change the style of the line through profile positions.
    pub fn update_profile_line_style(&mut self, visible: bool, width: u32, color: [u8; 3]) {
        self.styles.profile_line.visible = visible;
        self.styles.profile_line.width = width;
        self.styles.profile_line.color = color;
    }

    /// Change the style of the profile outline.
    pub fn update_profile_style(&mut self, visible: bool, width: u32, color: [u8; 3]) {
        self.styles.profile.visible = visible;
        self.styles.profile.width = width;
        self.styles.profile.color = color;
    }

    /// Change the style of the vector overlay.
    pub fn update_vector_style(&mut self, visible: bool, width: u32, color: [u8; 3]) {
        self.styles.vectors.visible = visible;
        self.styles.vectors.width = width;
        self.styles.vectors.color = color;
    }

    /// Replace the intensity color-scale boundaries.
    #[inline]
    pub fn set_scale_boundaries(&mut self, boundaries: ScaleBoundaries) {
        self.styles.boundaries = boundaries;
    }

    /// Replace all styles at once, e.g. from a parsed scene definition.
    #[inline]
    pub fn set_styles(&mut self, styles: SceneStyles) {
        self.styles = styles;
    }

    /// Replace the loaded recording and reset the transport.
    pub fn load_recording(&mut self, recording: Recording) {
        debug!(
            "recording replaced: {} frames, {} chunks",
            recording.frame_count(),
            recording.chunk_count()
        );
        self.recording = recording;
        self.position = 0;
        self.state = PlaybackState::Stopped;
        self.chunks = ChunkWindow::new(if self.united {
            1
        } else {
            self.config.chunk_window
        });
        self.events.push(SessionEvent::RecordingReplaced);
    }

    /// Current frame index.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Current transport state.
    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// The loaded recording.
    #[inline]
    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    /// Current styles.
    #[inline]
    pub fn styles(&self) -> &SceneStyles {
        &self.styles
    }

    /// Playback progress through the recording span, 0 to 1.
    pub fn progress(&self) -> f64 {
        let span = self.recording.timeline.span();
        let duration = span.duration().as_seconds();
        if duration == 0.0 {
            return 0.0;
        }
        let elapsed = (self.recording.timeline.timestamp(self.position) - span.start).as_seconds();
        (elapsed / duration).clamp(0.0, 1.0)
    }

    /// Take all pending events, oldest first.
    #[inline]
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain()
    }
}
