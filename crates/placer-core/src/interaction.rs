//! Touch state machine: tap to place, press-and-drag to move.
//!
//! Touches never read tracking state on their own; they use the frame the
//! per-frame tick last fetched, so a touch and the overlays drawn for that
//! frame agree on which surfaces exist.

use crate::anchors::{AnchorStore, MarkerId};
use crate::engine::{FrameSnapshot, HitResult, HitTarget, SceneGraph, TrackingSession};
use crate::error::PlacementError;
use crate::tracker::first_eligible_hit;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchAction {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single-pointer touch in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchEvent {
    pub action: TouchAction,
    pub x: f32,
    pub y: f32,
}

impl TouchEvent {
    pub fn new(action: TouchAction, x: f32, y: f32) -> Self {
        Self { action, x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(MarkerId),
}

#[derive(Clone, Debug, PartialEq)]
pub enum TouchOutcome {
    Placed(MarkerId),
    DragStarted(MarkerId),
    Retargeted(MarkerId),
    /// Drag finished; `distance` is the refreshed label distance, absent when
    /// the camera was not tracking at release.
    Released {
        marker: MarkerId,
        distance: Option<f32>,
    },
    /// A transient condition swallowed the touch.
    Skipped(PlacementError),
    /// Nothing to do for this event in the current state.
    Ignored,
}

#[derive(Default)]
pub struct InteractionController {
    state: InteractionState,
}

impl InteractionController {
    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn selected(&self) -> Option<MarkerId> {
        match self.state {
            InteractionState::Dragging(id) => Some(id),
            InteractionState::Idle => None,
        }
    }

    /// Drops any selection without touching the store.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
    }

    pub fn handle<S: TrackingSession, G: SceneGraph>(
        &mut self,
        event: &TouchEvent,
        frame: Option<&FrameSnapshot>,
        session: &mut S,
        scene: &mut G,
        store: &mut AnchorStore,
    ) -> Result<TouchOutcome, PlacementError> {
        match (event.action, self.state) {
            (TouchAction::Down, state) => {
                if let InteractionState::Dragging(id) = state {
                    log::debug!("[touch] press while dragging {:?}; dropping selection", id);
                    self.state = InteractionState::Idle;
                }
                self.press(event, frame, session, scene, store)
            }
            (TouchAction::Move, InteractionState::Dragging(id)) => {
                self.drag(id, event, frame, session, scene, store)
            }
            (TouchAction::Up | TouchAction::Cancel, InteractionState::Dragging(id)) => {
                self.state = InteractionState::Idle;
                let distance = frame
                    .filter(|f| f.is_tracking())
                    .and_then(|f| store.refresh_label(scene, id, f.camera_pose.position));
                log::info!("[touch] released {:?}", id);
                Ok(TouchOutcome::Released {
                    marker: id,
                    distance,
                })
            }
            (_, InteractionState::Idle) => Ok(TouchOutcome::Ignored),
        }
    }

    fn press<S: TrackingSession, G: SceneGraph>(
        &mut self,
        event: &TouchEvent,
        frame: Option<&FrameSnapshot>,
        session: &mut S,
        scene: &mut G,
        store: &mut AnchorStore,
    ) -> Result<TouchOutcome, PlacementError> {
        let frame = match tracking_frame(frame) {
            Ok(f) => f,
            Err(reason) => return Ok(TouchOutcome::Skipped(reason)),
        };
        let hits = session.hit_test(frame, event.x, event.y);
        log_hits(&hits);

        let touched = hits.iter().find_map(|hit| match hit.target {
            HitTarget::Node(node) => store.find_by_scene_node(scene, node),
            HitTarget::Plane(_) => None,
        });
        if let Some(id) = touched {
            self.state = InteractionState::Dragging(id);
            log::info!("[touch] begin drag on {:?}", id);
            return Ok(TouchOutcome::DragStarted(id));
        }

        match first_eligible_hit(&hits) {
            Some(hit) => {
                if let HitTarget::Plane(plane) = &hit.target {
                    log::debug!("[touch] placing on {:?} {:?}", plane.plane_type, plane.id);
                }
                let id = store.place(session, scene, &hit.hit_pose, frame.camera_pose.position)?;
                Ok(TouchOutcome::Placed(id))
            }
            None => {
                log::debug!("[touch] no valid plane hit");
                Ok(TouchOutcome::Skipped(PlacementError::NoEligibleSurface))
            }
        }
    }

    fn drag<S: TrackingSession, G: SceneGraph>(
        &mut self,
        id: MarkerId,
        event: &TouchEvent,
        frame: Option<&FrameSnapshot>,
        session: &mut S,
        scene: &mut G,
        store: &mut AnchorStore,
    ) -> Result<TouchOutcome, PlacementError> {
        let frame = match tracking_frame(frame) {
            Ok(f) => f,
            Err(reason) => return Ok(TouchOutcome::Skipped(reason)),
        };
        let hits = session.hit_test(frame, event.x, event.y);
        let Some(hit) = first_eligible_hit(&hits) else {
            return Ok(TouchOutcome::Skipped(PlacementError::NoEligibleSurface));
        };
        store.retarget(session, scene, id, &hit.hit_pose)?;
        Ok(TouchOutcome::Retargeted(id))
    }
}

fn tracking_frame(frame: Option<&FrameSnapshot>) -> Result<&FrameSnapshot, PlacementError> {
    let frame = frame.ok_or(PlacementError::EngineUnavailable)?;
    if !frame.is_tracking() {
        return Err(PlacementError::NotTracking);
    }
    Ok(frame)
}

fn log_hits(hits: &[HitResult]) {
    log::debug!("[touch] {} hit result(s)", hits.len());
    for hit in hits {
        match &hit.target {
            HitTarget::Plane(plane) => log::debug!(
                "  plane {:?}: type={:?}, tracking={:?}, subsumed={}, inPolygon={}",
                plane.id,
                plane.plane_type,
                plane.tracking_state,
                plane.subsumed_by.is_some(),
                hit.in_polygon
            ),
            HitTarget::Node(node) => log::debug!("  node {:?}", node),
        }
    }
}
