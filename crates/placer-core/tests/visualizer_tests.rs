// Tests for vertical plane overlays.

mod common;

use common::*;
use glam::{Quat, Vec3};
use placer_core::*;
use std::f32::consts::FRAC_PI_2;

fn tick(tracker: &mut PlaneTracker, vis: &mut PlaneVisualizer, scene: &mut HeadlessScene, planes: Vec<PlaneSnapshot>) {
    let update = tracker.update(&frame(0, Vec3::ZERO, planes));
    vis.update(scene, &update);
}

#[test]
fn creates_overlay_only_for_vertical_surfaces() {
    let (mut tracker, mut vis, mut scene) = (PlaneTracker::default(), PlaneVisualizer::default(), HeadlessScene::new());
    tick(&mut tracker, &mut vis, &mut scene, vec![floor(), wall(), clutter()]);

    assert_eq!(vis.len(), 1);
    assert!(vis.has_overlay(WALL));
    assert!(!vis.has_overlay(FLOOR));
    assert!(!vis.has_overlay(CLUTTER));

    let node = scene.node(vis.overlay_for(WALL).unwrap()).unwrap();
    assert_eq!(node.shape, NodeShape::PlaneOverlay);
    assert!(node.transform.position.abs_diff_eq(Vec3::new(0.0, 1.0, -2.0), 1e-6));
    assert!(node.transform.scale.abs_diff_eq(Vec3::new(2.0, PLANE_OVERLAY_THICKNESS, 1.5), 1e-6));
    let material = scene.material(node.material.unwrap()).unwrap();
    assert_eq!(material.color, PLANE_OVERLAY_COLOR);
}

#[test]
fn existing_overlay_is_updated_in_place() {
    let (mut tracker, mut vis, mut scene) = (PlaneTracker::default(), PlaneVisualizer::default(), HeadlessScene::new());
    tick(&mut tracker, &mut vis, &mut scene, vec![wall()]);
    let first = vis.overlay_for(WALL).unwrap();

    let mut grown = wall();
    grown.extent_x = 3.5;
    grown.center_pose = Pose {
        position: Vec3::new(0.2, 1.0, -2.0),
        orientation: Quat::from_rotation_x(FRAC_PI_2),
    };
    tick(&mut tracker, &mut vis, &mut scene, vec![grown]);

    assert_eq!(vis.overlay_for(WALL), Some(first));
    assert_eq!(vis.len(), 1);
    assert_eq!(scene.material_count(), 1);
    let t = scene.node(first).unwrap().transform;
    assert!((t.scale.x - 3.5).abs() < 1e-6);
    assert!((t.position.x - 0.2).abs() < 1e-6);
    assert!((t.rotation.x - FRAC_PI_2).abs() < 1e-5);
}

#[test]
fn subsumed_surface_overlay_is_gone_next_frame() {
    let (mut tracker, mut vis, mut scene) = (PlaneTracker::default(), PlaneVisualizer::default(), HeadlessScene::new());
    tick(&mut tracker, &mut vis, &mut scene, vec![wall()]);
    let node = vis.overlay_for(WALL).unwrap();

    tick(&mut tracker, &mut vis, &mut scene, vec![wall().with_subsumed_by(PlaneId(10))]);
    assert!(!vis.has_overlay(WALL));
    assert!(scene.node(node).is_none());
}

#[test]
fn unreported_overlays_stay_unless_pruning() {
    let (mut tracker, mut vis, mut scene) = (PlaneTracker::default(), PlaneVisualizer::default(), HeadlessScene::new());
    tick(&mut tracker, &mut vis, &mut scene, vec![wall()]);
    tick(&mut tracker, &mut vis, &mut scene, vec![]);
    assert!(vis.has_overlay(WALL));

    let (mut tracker, mut vis, mut scene) = (PlaneTracker::default(), PlaneVisualizer::new(PLANE_OVERLAY_COLOR, true), HeadlessScene::new());
    tick(&mut tracker, &mut vis, &mut scene, vec![wall()]);
    let node = vis.overlay_for(WALL).unwrap();
    tick(&mut tracker, &mut vis, &mut scene, vec![]);
    assert!(vis.is_empty());
    assert!(scene.node(node).is_none());
}

#[test]
fn clear_removes_every_overlay_node() {
    let (mut tracker, mut vis, mut scene) = (PlaneTracker::default(), PlaneVisualizer::default(), HeadlessScene::new());
    let mut second = wall();
    second.id = PlaneId(20);
    tick(&mut tracker, &mut vis, &mut scene, vec![wall(), second]);
    assert_eq!(scene.node_count(), 2);

    vis.clear(&mut scene);
    assert!(vis.is_empty());
    assert_eq!(scene.node_count(), 0);
}
