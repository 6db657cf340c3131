//! Placed markers and the anchors that hold them in the world.
//!
//! Each marker owns one anchor, one anchor-bound node, one sphere under that
//! node and one label under the sphere. Anchors cannot move, so moving a
//! marker is create-new then detach-old; if the create fails the marker keeps
//! its old anchor untouched.

use crate::constants::{
    LABEL_OFFSET_Y, LABEL_PREFIX, MARKER_COLOR, MARKER_METALLIC, MARKER_RADIUS, MARKER_ROUGHNESS,
};
use crate::engine::{
    AnchorId, MaterialId, NodeId, NodeShape, NodeTransform, Pose, SceneGraph, TrackingSession,
};
use crate::error::PlacementError;
use crate::geometry::{distance_3d, facing_rotation, yaw_to_face};
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u32);

#[derive(Clone, Debug)]
pub struct Marker {
    id: MarkerId,
    anchor: AnchorId,
    anchor_pose: Pose,
    anchor_node: NodeId,
    shape: NodeId,
    label: NodeId,
    label_text: String,
    yaw_degrees: f32,
}

impl Marker {
    pub fn id(&self) -> MarkerId {
        self.id
    }
    pub fn anchor(&self) -> AnchorId {
        self.anchor
    }
    pub fn anchor_pose(&self) -> &Pose {
        &self.anchor_pose
    }
    pub fn anchor_node(&self) -> NodeId {
        self.anchor_node
    }
    pub fn shape(&self) -> NodeId {
        self.shape
    }
    pub fn label(&self) -> NodeId {
        self.label
    }
    pub fn label_text(&self) -> &str {
        &self.label_text
    }
    /// Heading chosen at placement so the marker faced the camera.
    pub fn yaw_degrees(&self) -> f32 {
        self.yaw_degrees
    }
}

#[derive(Clone, Debug)]
pub struct MarkerStyle {
    pub radius: f32,
    pub color: [f32; 4],
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: MARKER_RADIUS,
            color: MARKER_COLOR,
        }
    }
}

#[inline]
pub fn label_text_for(distance: f32) -> String {
    format!("{LABEL_PREFIX}{distance:.2}")
}

/// Insertion-ordered set of placed markers.
#[derive(Default)]
pub struct AnchorStore {
    markers: Vec<Marker>,
    next_id: u32,
    material: Option<MaterialId>,
    style: MarkerStyle,
}

impl AnchorStore {
    pub fn new(style: MarkerStyle) -> Self {
        Self {
            style,
            ..Default::default()
        }
    }

    /// Anchors a new marker at `pose`, facing `camera_pos`, with its label
    /// showing the current camera distance.
    pub fn place<S: TrackingSession, G: SceneGraph>(
        &mut self,
        session: &mut S,
        scene: &mut G,
        pose: &Pose,
        camera_pos: Vec3,
    ) -> Result<MarkerId, PlacementError> {
        let anchor = session.create_anchor(pose)?;

        let anchor_node = scene.create_anchor_node(anchor, pose);
        scene.add_child(None, anchor_node);

        let style = &self.style;
        let material = *self.material.get_or_insert_with(|| {
            scene.create_material(style.color, MARKER_METALLIC, MARKER_ROUGHNESS)
        });
        let shape = scene.create_node(
            NodeShape::Sphere {
                radius: self.style.radius,
            },
            Some(material),
        );
        let yaw_degrees = yaw_to_face(camera_pos, pose.position);
        scene.set_transform(
            shape,
            NodeTransform {
                rotation: facing_rotation(yaw_degrees),
                ..Default::default()
            },
        );
        scene.add_child(Some(anchor_node), shape);

        let world = scene.world_position(shape).unwrap_or(pose.position);
        let label_text = label_text_for(distance_3d(camera_pos, world));
        let label = attach_label(scene, shape, &label_text);

        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.markers.push(Marker {
            id,
            anchor,
            anchor_pose: *pose,
            anchor_node,
            shape,
            label,
            label_text,
            yaw_degrees,
        });
        log::info!(
            "[marker] placed {:?} at ({:.2}, {:.2}, {:.2})",
            id,
            pose.position.x,
            pose.position.y,
            pose.position.z
        );
        Ok(id)
    }

    /// Maps a touched node (sphere, label, or anything below them) back to the
    /// marker whose sphere is its nearest matching ancestor.
    pub fn find_by_scene_node<G: SceneGraph>(&self, scene: &G, node: NodeId) -> Option<MarkerId> {
        let mut current = Some(node);
        while let Some(n) = current {
            if let Some(marker) = self.markers.iter().find(|m| m.shape == n) {
                return Some(marker.id);
            }
            current = scene.parent_of(n);
        }
        None
    }

    /// Moves a marker by anchoring it afresh at `new_pose`.
    ///
    /// The old anchor is detached only after the new one exists, exactly once.
    pub fn retarget<S: TrackingSession, G: SceneGraph>(
        &mut self,
        session: &mut S,
        scene: &mut G,
        id: MarkerId,
        new_pose: &Pose,
    ) -> Result<AnchorId, PlacementError> {
        let marker = self
            .markers
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(PlacementError::UnknownMarker(id.0))?;

        let new_anchor = match session.create_anchor(new_pose) {
            Ok(anchor) => anchor,
            Err(e) => {
                log::warn!("[marker] retarget of {:?} failed, keeping old anchor: {}", id, e);
                return Err(e.into());
            }
        };
        scene.rebind_anchor(marker.anchor_node, new_anchor, new_pose);
        let old_anchor = std::mem::replace(&mut marker.anchor, new_anchor);
        session.detach_anchor(old_anchor);
        marker.anchor_pose = *new_pose;

        log::debug!(
            "[marker] {:?} re-anchored {:?} -> {:?}",
            id,
            old_anchor,
            new_anchor
        );
        Ok(new_anchor)
    }

    /// Rebuilds the distance label from the sphere's current world position.
    /// Returns the new distance, or `None` for an unknown marker.
    pub fn refresh_label<G: SceneGraph>(
        &mut self,
        scene: &mut G,
        id: MarkerId,
        camera_pos: Vec3,
    ) -> Option<f32> {
        let marker = self.markers.iter_mut().find(|m| m.id == id)?;
        let world = scene
            .world_position(marker.shape)
            .unwrap_or(marker.anchor_pose.position);
        let distance = distance_3d(camera_pos, world);

        // Label content is baked when the node is created, so swap the node.
        scene.remove_node(marker.label);
        marker.label_text = label_text_for(distance);
        marker.label = attach_label(scene, marker.shape, &marker.label_text);
        Some(distance)
    }

    pub fn remove<S: TrackingSession, G: SceneGraph>(
        &mut self,
        session: &mut S,
        scene: &mut G,
        id: MarkerId,
    ) -> bool {
        let Some(index) = self.markers.iter().position(|m| m.id == id) else {
            return false;
        };
        let marker = self.markers.remove(index);
        destroy(session, scene, &marker);
        log::info!("[marker] removed {:?}", id);
        true
    }

    pub fn clear<S: TrackingSession, G: SceneGraph>(&mut self, session: &mut S, scene: &mut G) {
        for marker in self.markers.drain(..) {
            destroy(session, scene, &marker);
        }
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

fn attach_label<G: SceneGraph>(scene: &mut G, shape: NodeId, text: &str) -> NodeId {
    let label = scene.create_node(
        NodeShape::Label {
            text: text.to_owned(),
        },
        None,
    );
    scene.set_transform(
        label,
        NodeTransform {
            position: Vec3::new(0.0, LABEL_OFFSET_Y, 0.0),
            ..Default::default()
        },
    );
    scene.add_child(Some(shape), label);
    label
}

fn destroy<S: TrackingSession, G: SceneGraph>(session: &mut S, scene: &mut G, marker: &Marker) {
    scene.remove_node(marker.anchor_node);
    session.detach_anchor(marker.anchor);
}
