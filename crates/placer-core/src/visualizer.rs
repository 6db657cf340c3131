//! Translucent overlays for tracked vertical surfaces.
//!
//! Horizontal surfaces are never drawn; they are only placement targets.
//! The visualizer owns overlay nodes, never surfaces: it keys overlays by
//! `PlaneId` and forgets a surface as soon as the engine reports it lost or
//! merged.

use crate::constants::{
    PLANE_OVERLAY_COLOR, PLANE_OVERLAY_METALLIC, PLANE_OVERLAY_ROUGHNESS, PLANE_OVERLAY_THICKNESS,
};
use crate::engine::{
    MaterialId, NodeId, NodeShape, NodeTransform, PlaneId, PlaneSnapshot, SceneGraph,
};
use crate::geometry::quaternion_to_euler;
use crate::tracker::PlaneUpdate;
use fnv::{FnvHashMap, FnvHashSet};
use glam::Vec3;

pub struct PlaneVisualizer {
    overlays: FnvHashMap<PlaneId, NodeId>,
    material: Option<MaterialId>,
    color: [f32; 4],
    prune_lost: bool,
}

impl Default for PlaneVisualizer {
    fn default() -> Self {
        Self::new(PLANE_OVERLAY_COLOR, false)
    }
}

impl PlaneVisualizer {
    /// `prune_lost` also removes overlays whose surface was not reported in a
    /// tick. Without it those overlays stay where they were last seen.
    pub fn new(color: [f32; 4], prune_lost: bool) -> Self {
        Self {
            overlays: FnvHashMap::default(),
            material: None,
            color,
            prune_lost,
        }
    }

    pub fn update<G: SceneGraph>(&mut self, scene: &mut G, update: &PlaneUpdate) {
        for id in &update.dropped {
            if let Some(node) = self.overlays.remove(id) {
                scene.remove_node(node);
                log::debug!("[overlay] removed overlay for {:?}", id);
            }
        }

        if self.prune_lost {
            let seen: FnvHashSet<PlaneId> = update.vertical.iter().map(|p| p.id).collect();
            self.overlays.retain(|id, node| {
                let keep = seen.contains(id);
                if !keep {
                    scene.remove_node(*node);
                }
                keep
            });
        }

        for plane in &update.vertical {
            match self.overlays.get(&plane.id).copied() {
                Some(node) => scene.set_transform(node, overlay_transform(plane)),
                None => {
                    let node = self.create_overlay(scene, plane);
                    self.overlays.insert(plane.id, node);
                }
            }
        }
    }

    fn create_overlay<G: SceneGraph>(&mut self, scene: &mut G, plane: &PlaneSnapshot) -> NodeId {
        let color = self.color;
        let material = *self.material.get_or_insert_with(|| {
            scene.create_material(color, PLANE_OVERLAY_METALLIC, PLANE_OVERLAY_ROUGHNESS)
        });
        let node = scene.create_node(NodeShape::PlaneOverlay, Some(material));
        scene.set_transform(node, overlay_transform(plane));
        scene.add_child(None, node);
        log::debug!("[overlay] created vertical plane overlay for {:?}", plane.id);
        node
    }

    pub fn overlay_for(&self, id: PlaneId) -> Option<NodeId> {
        self.overlays.get(&id).copied()
    }

    pub fn has_overlay(&self, id: PlaneId) -> bool {
        self.overlays.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn clear<G: SceneGraph>(&mut self, scene: &mut G) {
        for (_, node) in self.overlays.drain() {
            scene.remove_node(node);
        }
    }
}

fn overlay_transform(plane: &PlaneSnapshot) -> NodeTransform {
    let pose = &plane.center_pose;
    NodeTransform {
        position: pose.position,
        rotation: quaternion_to_euler(pose.orientation).to_vec3(),
        scale: Vec3::new(plane.extent_x, PLANE_OVERLAY_THICKNESS, plane.extent_z),
    }
}
