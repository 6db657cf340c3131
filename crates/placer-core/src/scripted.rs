//! A `TrackingSession` driven by a script instead of sensors.
//!
//! Frames are queued up front and handed out one per `update`. Once the queue
//! runs dry the last frame keeps repeating with a bumped index and no surface
//! updates; before any frame was queued it reports no session. Hit tests are
//! answered from a table keyed by whole-pixel screen position, resolving plane
//! hits against the latest reported surface state. Anchor create/detach calls
//! are counted so callers can check for leaks.

use crate::engine::{
    AnchorId, FrameSnapshot, HitResult, HitResults, HitTarget, NodeId, PlaneId, PlaneSnapshot,
    Pose, SessionConfig, TrackingSession,
};
use crate::error::EngineError;
use fnv::FnvHashMap;
use std::collections::VecDeque;

#[derive(Clone, Debug, PartialEq)]
pub enum ScriptedHit {
    Plane {
        plane: PlaneId,
        pose: Pose,
        in_polygon: bool,
    },
    Node {
        node: NodeId,
        pose: Pose,
    },
}

impl ScriptedHit {
    pub fn plane(plane: PlaneId, pose: Pose) -> Self {
        ScriptedHit::Plane {
            plane,
            pose,
            in_polygon: true,
        }
    }

    pub fn node(node: NodeId, pose: Pose) -> Self {
        ScriptedHit::Node { node, pose }
    }
}

pub struct ScriptedSession {
    config: Option<SessionConfig>,
    running: bool,
    queued: VecDeque<FrameSnapshot>,
    current: Option<FrameSnapshot>,
    planes: FnvHashMap<PlaneId, PlaneSnapshot>,
    hits: FnvHashMap<(i32, i32), Vec<ScriptedHit>>,
    anchors: FnvHashMap<AnchorId, Pose>,
    next_anchor: u64,
    anchors_created: usize,
    anchors_detached: usize,
    failing_creations: usize,
}

impl Default for ScriptedSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedSession {
    pub fn new() -> Self {
        Self {
            config: None,
            running: true,
            queued: VecDeque::new(),
            current: None,
            planes: FnvHashMap::default(),
            hits: FnvHashMap::default(),
            anchors: FnvHashMap::default(),
            next_anchor: 1,
            anchors_created: 0,
            anchors_detached: 0,
            failing_creations: 0,
        }
    }

    pub fn push_frame(&mut self, frame: FrameSnapshot) {
        self.queued.push_back(frame);
    }

    pub fn set_hits(&mut self, x: f32, y: f32, hits: Vec<ScriptedHit>) {
        self.hits.insert(pixel(x, y), hits);
    }

    pub fn clear_hits(&mut self) {
        self.hits.clear();
    }

    /// Makes the next `count` anchor creations fail with `ResourceExhausted`.
    pub fn fail_anchor_creations(&mut self, count: usize) {
        self.failing_creations = count;
    }

    /// Simulates the session going away; `update` returns `None` until resumed.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn config(&self) -> Option<&SessionConfig> {
        self.config.as_ref()
    }

    pub fn anchors_created(&self) -> usize {
        self.anchors_created
    }

    pub fn anchors_detached(&self) -> usize {
        self.anchors_detached
    }

    pub fn live_anchors(&self) -> usize {
        self.anchors.len()
    }

    pub fn anchor_pose(&self, anchor: AnchorId) -> Option<&Pose> {
        self.anchors.get(&anchor)
    }

    pub fn is_anchor_live(&self, anchor: AnchorId) -> bool {
        self.anchors.contains_key(&anchor)
    }
}

impl TrackingSession for ScriptedSession {
    fn configure(&mut self, config: &SessionConfig) {
        log::debug!("[session] configured: {:?}", config);
        self.config = Some(config.clone());
    }

    fn update(&mut self) -> Option<FrameSnapshot> {
        if !self.running {
            return None;
        }
        let next = match self.queued.pop_front() {
            Some(frame) => frame,
            None => {
                let mut repeat = self.current.clone()?;
                repeat.frame_index += 1;
                repeat.updated_planes.clear();
                repeat
            }
        };
        for plane in &next.updated_planes {
            self.planes.insert(plane.id, plane.clone());
        }
        self.current = Some(next.clone());
        Some(next)
    }

    fn hit_test(&self, _frame: &FrameSnapshot, x: f32, y: f32) -> HitResults {
        let Some(script) = self.hits.get(&pixel(x, y)) else {
            return HitResults::new();
        };
        script
            .iter()
            .filter_map(|hit| match hit {
                ScriptedHit::Plane {
                    plane,
                    pose,
                    in_polygon,
                } => self.planes.get(plane).map(|snapshot| HitResult {
                    target: HitTarget::Plane(snapshot.clone()),
                    hit_pose: *pose,
                    in_polygon: *in_polygon,
                }),
                ScriptedHit::Node { node, pose } => Some(HitResult {
                    target: HitTarget::Node(*node),
                    hit_pose: *pose,
                    in_polygon: false,
                }),
            })
            .collect()
    }

    fn create_anchor(&mut self, pose: &Pose) -> Result<AnchorId, EngineError> {
        if !self.running {
            return Err(EngineError::SessionLost);
        }
        if !pose.position.is_finite() || !pose.orientation.is_finite() {
            return Err(EngineError::InvalidPose);
        }
        if self.failing_creations > 0 {
            self.failing_creations -= 1;
            return Err(EngineError::ResourceExhausted);
        }
        let id = AnchorId(self.next_anchor);
        self.next_anchor += 1;
        self.anchors.insert(id, *pose);
        self.anchors_created += 1;
        Ok(id)
    }

    fn detach_anchor(&mut self, anchor: AnchorId) {
        if self.anchors.remove(&anchor).is_some() {
            self.anchors_detached += 1;
        } else {
            log::warn!("[session] detach of unknown anchor {:?}", anchor);
        }
    }
}

#[inline]
fn pixel(x: f32, y: f32) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}
