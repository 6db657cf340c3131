use crate::anchors::MarkerStyle;
use crate::constants::{PLANE_OVERLAY_COLOR, PLANE_STATUS_LOG_INTERVAL_FRAMES};
use crate::engine::SessionConfig;

/// Construction-time options for [`crate::MarkerPlacer`].
///
/// - `session`: handed to the runtime once via `TrackingSession::configure`
/// - `marker`: sphere radius and color for placed markers
/// - `overlay_color`: RGBA of vertical plane overlays
/// - `status_log_interval`: frames between plane status log summaries
/// - `prune_lost_overlays`: drop overlays of surfaces missing from a tick
#[derive(Clone, Debug)]
pub struct PlacerConfig {
    pub session: SessionConfig,
    pub marker: MarkerStyle,
    pub overlay_color: [f32; 4],
    pub status_log_interval: u64,
    pub prune_lost_overlays: bool,
}

impl Default for PlacerConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            marker: MarkerStyle::default(),
            overlay_color: PLANE_OVERLAY_COLOR,
            status_log_interval: PLANE_STATUS_LOG_INTERVAL_FRAMES,
            prune_lost_overlays: false,
        }
    }
}
