//! Per-frame camera status line.

use crate::constants::{
    COORDS_INITIALIZING, STATUS_NOT_TRACKING, STATUS_PAUSED, STATUS_STOPPED, STATUS_TRACKING,
};
use crate::engine::{FrameSnapshot, TrackingState};
use glam::Vec3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackingStatus {
    pub coordinates: String,
    pub status: &'static str,
}

#[inline]
pub fn format_coordinates(pos: Vec3) -> String {
    format!("X: {:.2}, Y: {:.2}, Z: {:.2}", pos.x, pos.y, pos.z)
}

/// Status for the given frame; `None` means no session is running.
pub fn tracking_status(frame: Option<&FrameSnapshot>) -> TrackingStatus {
    let Some(frame) = frame else {
        return TrackingStatus {
            coordinates: COORDS_INITIALIZING.to_owned(),
            status: STATUS_NOT_TRACKING,
        };
    };
    let status = match frame.camera_tracking {
        TrackingState::Tracking => {
            return TrackingStatus {
                coordinates: format_coordinates(frame.camera_pose.position),
                status: STATUS_TRACKING,
            }
        }
        TrackingState::Paused => STATUS_PAUSED,
        TrackingState::Stopped => STATUS_STOPPED,
    };
    TrackingStatus {
        coordinates: COORDS_INITIALIZING.to_owned(),
        status,
    }
}

/// Computes the status and hands it to `display` as `(coordinates, status)`.
pub fn report_status<F>(frame: Option<&FrameSnapshot>, display: &mut F)
where
    F: FnMut(&str, &str),
{
    let s = tracking_status(frame);
    display(&s.coordinates, s.status);
}
