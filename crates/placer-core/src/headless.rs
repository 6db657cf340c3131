//! In-memory scene graph.
//!
//! Nodes live in an index-keyed arena; removed slots are tombstoned and never
//! reused, so a stale `NodeId` simply resolves to nothing. World transforms
//! compose parent-first with `Affine3A`, anchor-bound nodes taking their
//! anchor's pose as local transform.

use crate::engine::{AnchorId, MaterialId, NodeId, NodeShape, NodeTransform, Pose, SceneGraph};
use glam::{Affine3A, EulerRot, Quat, Vec3};

#[derive(Clone, Debug)]
pub struct Material {
    pub color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub shape: NodeShape,
    pub material: Option<MaterialId>,
    pub transform: NodeTransform,
    pub anchor: Option<(AnchorId, Pose)>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

#[derive(Default)]
pub struct HeadlessScene {
    nodes: Vec<Option<SceneNode>>,
    materials: Vec<Material>,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0 as usize).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0 as usize)
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Nodes not yet removed.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Text of a label node.
    pub fn label_text(&self, id: NodeId) -> Option<&str> {
        match &self.node(id)?.shape {
            NodeShape::Label { text } => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn world_transform(&self, id: NodeId) -> Option<Affine3A> {
        let node = self.node(id)?;
        let local = match &node.anchor {
            Some((_, pose)) => Affine3A::from_rotation_translation(pose.orientation, pose.position),
            None => {
                let t = &node.transform;
                let rotation = Quat::from_euler(EulerRot::XYZ, t.rotation.x, t.rotation.y, t.rotation.z);
                Affine3A::from_scale_rotation_translation(t.scale, rotation, t.position)
            }
        };
        match node.parent {
            Some(parent) => Some(self.world_transform(parent)? * local),
            None => Some(local),
        }
    }

    fn detach_from_parent(&mut self, child: NodeId) {
        let parent = self.node(child).and_then(|n| n.parent);
        if let Some(p) = parent.and_then(|p| self.node_mut(p)) {
            p.children.retain(|c| *c != child);
        }
    }
}

impl SceneGraph for HeadlessScene {
    fn create_material(&mut self, color: [f32; 4], metallic: f32, roughness: f32) -> MaterialId {
        self.materials.push(Material {
            color,
            metallic,
            roughness,
        });
        MaterialId(self.materials.len() as u32 - 1)
    }

    fn create_node(&mut self, shape: NodeShape, material: Option<MaterialId>) -> NodeId {
        self.nodes.push(Some(SceneNode {
            shape,
            material,
            transform: NodeTransform::default(),
            anchor: None,
            parent: None,
            children: Vec::new(),
        }));
        NodeId(self.nodes.len() as u32 - 1)
    }

    fn create_anchor_node(&mut self, anchor: AnchorId, pose: &Pose) -> NodeId {
        let id = self.create_node(NodeShape::Anchor, None);
        if let Some(node) = self.node_mut(id) {
            node.anchor = Some((anchor, *pose));
        }
        id
    }

    fn rebind_anchor(&mut self, node: NodeId, anchor: AnchorId, pose: &Pose) {
        if let Some(n) = self.node_mut(node) {
            n.anchor = Some((anchor, *pose));
        }
    }

    fn add_child(&mut self, parent: Option<NodeId>, child: NodeId) {
        if self.node(child).is_none() {
            return;
        }
        if let Some(p) = parent {
            if self.node(p).is_none() {
                return;
            }
        }
        self.detach_from_parent(child);
        if let Some(pn) = parent.and_then(|p| self.node_mut(p)) {
            pn.children.push(child);
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = parent;
        }
    }

    fn remove_node(&mut self, node: NodeId) {
        self.detach_from_parent(node);
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(removed) = self.nodes.get_mut(id.0 as usize).and_then(Option::take) {
                stack.extend(removed.children);
            }
        }
    }

    fn set_transform(&mut self, node: NodeId, transform: NodeTransform) {
        if let Some(n) = self.node_mut(node) {
            n.transform = transform;
        }
    }

    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }

    fn world_position(&self, node: NodeId) -> Option<Vec3> {
        self.world_transform(node).map(|t| Vec3::from(t.translation))
    }
}
