//! Seam between the placement core and the external AR runtime.
//!
//! The runtime owns SLAM, plane detection, hit testing and rendering. The core
//! only sees immutable per-frame snapshots plus the handful of calls below.
//! Identifiers are plain copyable handles; the runtime decides their meaning.

use crate::error::EngineError;
use glam::{Quat, Vec3};
use smallvec::SmallVec;

/// Position plus orientation in world space. Never mutated by the core.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    #[inline]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrackingState {
    Tracking,
    Paused,
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaneType {
    HorizontalUp,
    Vertical,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaneId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u32);

/// State of one detected surface as of the current frame.
///
/// `subsumed_by` is a back-reference to the surface this one was merged into;
/// the snapshot never owns the other surface.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneSnapshot {
    pub id: PlaneId,
    pub plane_type: PlaneType,
    pub tracking_state: TrackingState,
    pub center_pose: Pose,
    pub extent_x: f32,
    pub extent_z: f32,
    pub polygon_points: usize,
    pub subsumed_by: Option<PlaneId>,
}

/// Everything the core reads from the runtime for one rendered frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub frame_index: u64,
    pub camera_pose: Pose,
    pub camera_tracking: TrackingState,
    pub updated_planes: Vec<PlaneSnapshot>,
}

impl FrameSnapshot {
    #[inline]
    pub fn is_tracking(&self) -> bool {
        self.camera_tracking == TrackingState::Tracking
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum HitTarget {
    Plane(PlaneSnapshot),
    Node(NodeId),
}

/// One intersection along the touch ray. Results are ordered nearest first.
#[derive(Clone, Debug, PartialEq)]
pub struct HitResult {
    pub target: HitTarget,
    pub hit_pose: Pose,
    pub in_polygon: bool,
}

pub type HitResults = SmallVec<[HitResult; 4]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaneFindingMode {
    Disabled,
    Horizontal,
    Vertical,
    HorizontalAndVertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthMode {
    Disabled,
    Automatic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightEstimationMode {
    Disabled,
    AmbientIntensity,
}

/// Session options applied once before the first frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub plane_finding: PlaneFindingMode,
    pub depth: DepthMode,
    pub light_estimation: LightEstimationMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            plane_finding: PlaneFindingMode::HorizontalAndVertical,
            depth: DepthMode::Automatic,
            light_estimation: LightEstimationMode::Disabled,
        }
    }
}

/// Tracking half of the runtime: frames, hit tests and anchors.
pub trait TrackingSession {
    fn configure(&mut self, config: &SessionConfig);

    /// Advances the session and returns the new frame, or `None` when no
    /// session is running.
    fn update(&mut self) -> Option<FrameSnapshot>;

    fn hit_test(&self, frame: &FrameSnapshot, x: f32, y: f32) -> HitResults;

    fn create_anchor(&mut self, pose: &Pose) -> Result<AnchorId, EngineError>;

    fn detach_anchor(&mut self, anchor: AnchorId);
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeShape {
    /// Transform-only node whose pose follows an anchor.
    Anchor,
    Sphere { radius: f32 },
    PlaneOverlay,
    Label { text: String },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeTransform {
    pub position: Vec3,
    /// Per-axis rotation in radians (X, Y, Z).
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// Rendering half of the runtime: a retained scene graph.
///
/// `parent == None` attaches to the scene root. Removing a node removes its
/// whole subtree.
pub trait SceneGraph {
    fn create_material(&mut self, color: [f32; 4], metallic: f32, roughness: f32) -> MaterialId;

    fn create_node(&mut self, shape: NodeShape, material: Option<MaterialId>) -> NodeId;

    fn create_anchor_node(&mut self, anchor: AnchorId, pose: &Pose) -> NodeId;

    fn rebind_anchor(&mut self, node: NodeId, anchor: AnchorId, pose: &Pose);

    fn add_child(&mut self, parent: Option<NodeId>, child: NodeId);

    fn remove_node(&mut self, node: NodeId);

    fn set_transform(&mut self, node: NodeId, transform: NodeTransform);

    fn parent_of(&self, node: NodeId) -> Option<NodeId>;

    fn world_position(&self, node: NodeId) -> Option<Vec3>;
}

impl PlaneSnapshot {
    /// A freshly tracked, unmerged surface centered at `center`.
    pub fn new(id: PlaneId, plane_type: PlaneType, center: Pose, extent_x: f32, extent_z: f32) -> Self {
        Self {
            id,
            plane_type,
            tracking_state: TrackingState::Tracking,
            center_pose: center,
            extent_x,
            extent_z,
            polygon_points: 4,
            subsumed_by: None,
        }
    }

    pub fn with_state(mut self, state: TrackingState) -> Self {
        self.tracking_state = state;
        self
    }

    pub fn with_subsumed_by(mut self, parent: PlaneId) -> Self {
        self.subsumed_by = Some(parent);
        self
    }
}

impl FrameSnapshot {
    pub fn new(frame_index: u64, camera_pose: Pose, camera_tracking: TrackingState) -> Self {
        Self {
            frame_index,
            camera_pose,
            camera_tracking,
            updated_planes: Vec::new(),
        }
    }

    pub fn with_planes(mut self, planes: Vec<PlaneSnapshot>) -> Self {
        self.updated_planes = planes;
        self
    }
}
