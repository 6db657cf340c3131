//! Surface bookkeeping: which detected planes are usable right now.
//!
//! `is_placement_eligible` is the only place the placement rule is written
//! down. Tap placement, drag retargeting and the visualizer all go through it
//! (or through `is_actively_tracked`, its classification-free half).

use crate::constants::PLANE_STATUS_LOG_INTERVAL_FRAMES;
use crate::engine::{
    FrameSnapshot, HitResult, HitTarget, PlaneId, PlaneSnapshot, PlaneType, TrackingState,
};
use fnv::FnvHashMap;

/// Tracked by the engine right now and not merged into another surface.
#[inline]
pub fn is_actively_tracked(plane: &PlaneSnapshot) -> bool {
    plane.tracking_state == TrackingState::Tracking && plane.subsumed_by.is_none()
}

/// Actively tracked and facing a way markers can sit on.
#[inline]
pub fn is_placement_eligible(plane: &PlaneSnapshot) -> bool {
    is_actively_tracked(plane)
        && matches!(plane.plane_type, PlaneType::HorizontalUp | PlaneType::Vertical)
}

/// First hit along the ray that lands inside an eligible surface's polygon.
pub fn first_eligible_hit(hits: &[HitResult]) -> Option<&HitResult> {
    hits.iter().find(|hit| match &hit.target {
        HitTarget::Plane(plane) => hit.in_polygon && is_placement_eligible(plane),
        HitTarget::Node(_) => false,
    })
}

/// Result of folding one frame's surface updates into the tracker.
#[derive(Clone, Debug, Default)]
pub struct PlaneUpdate {
    pub horizontal: Vec<PlaneSnapshot>,
    pub vertical: Vec<PlaneSnapshot>,
    pub other: Vec<PlaneSnapshot>,
    /// Reported this frame but no longer tracked or now subsumed.
    pub dropped: Vec<PlaneId>,
}

impl PlaneUpdate {
    pub fn retained_len(&self) -> usize {
        self.horizontal.len() + self.vertical.len() + self.other.len()
    }
}

pub struct PlaneTracker {
    planes: FnvHashMap<PlaneId, PlaneSnapshot>,
    frames_seen: u64,
    log_interval: u64,
}

impl Default for PlaneTracker {
    fn default() -> Self {
        Self::new(PLANE_STATUS_LOG_INTERVAL_FRAMES)
    }
}

impl PlaneTracker {
    pub fn new(log_interval: u64) -> Self {
        Self {
            planes: FnvHashMap::default(),
            frames_seen: 0,
            log_interval: log_interval.max(1),
        }
    }

    pub fn update(&mut self, frame: &FrameSnapshot) -> PlaneUpdate {
        self.frames_seen += 1;
        let mut update = PlaneUpdate::default();

        for plane in &frame.updated_planes {
            if !is_actively_tracked(plane) {
                if self.planes.remove(&plane.id).is_some() {
                    log::debug!(
                        "[planes] dropping {:?} (state={:?}, subsumed={})",
                        plane.id,
                        plane.tracking_state,
                        plane.subsumed_by.is_some()
                    );
                }
                update.dropped.push(plane.id);
                continue;
            }
            self.planes.insert(plane.id, plane.clone());
            match plane.plane_type {
                PlaneType::HorizontalUp => update.horizontal.push(plane.clone()),
                PlaneType::Vertical => update.vertical.push(plane.clone()),
                PlaneType::Other => update.other.push(plane.clone()),
            }
        }

        if self.frames_seen % self.log_interval == 0 {
            self.log_status(frame, &update);
        }
        update
    }

    fn log_status(&self, frame: &FrameSnapshot, update: &PlaneUpdate) {
        log::debug!("===== PLANE STATUS =====");
        log::debug!("Total planes: {}", frame.updated_planes.len());
        for plane in &update.vertical {
            log::debug!(
                "  VERTICAL plane {:?}: polygonPoints={}",
                plane.id,
                plane.polygon_points
            );
        }
        log::debug!(
            "Horizontal: {}, Vertical: {}",
            update.horizontal.len(),
            update.vertical.len()
        );
    }

    pub fn get(&self, id: PlaneId) -> Option<&PlaneSnapshot> {
        self.planes.get(&id)
    }

    pub fn is_tracked(&self, id: PlaneId) -> bool {
        self.planes.contains_key(&id)
    }

    pub fn count(&self, plane_type: PlaneType) -> usize {
        self.planes
            .values()
            .filter(|p| p.plane_type == plane_type)
            .count()
    }

    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    pub fn clear(&mut self) {
        self.planes.clear();
    }
}
