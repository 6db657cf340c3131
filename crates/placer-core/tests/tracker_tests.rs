// Tests for surface eligibility and per-frame plane bookkeeping.

mod common;

use common::*;
use glam::Vec3;
use placer_core::*;

fn plane_hit(plane: PlaneSnapshot, in_polygon: bool) -> HitResult {
    HitResult {
        target: HitTarget::Plane(plane),
        hit_pose: at(1.0, 0.0, 1.0),
        in_polygon,
    }
}

#[test]
fn eligibility_requires_tracking_unmerged_and_supported_type() {
    assert!(is_placement_eligible(&floor()));
    assert!(is_placement_eligible(&wall()));
    assert!(!is_placement_eligible(&clutter()));
    assert!(!is_placement_eligible(&floor().with_state(TrackingState::Paused)));
    assert!(!is_placement_eligible(&wall().with_state(TrackingState::Stopped)));
    assert!(!is_placement_eligible(&wall().with_subsumed_by(PlaneId(99))));
}

#[test]
fn first_eligible_hit_skips_nodes_other_planes_and_outside_polygon() {
    let hits = vec![
        HitResult {
            target: HitTarget::Node(NodeId(4)),
            hit_pose: Pose::IDENTITY,
            in_polygon: false,
        },
        plane_hit(clutter(), true),
        plane_hit(floor(), false),
        plane_hit(wall(), true),
        plane_hit(floor(), true),
    ];
    let hit = first_eligible_hit(&hits).expect("wall hit");
    assert_eq!(hit.target, HitTarget::Plane(wall()));
}

#[test]
fn first_eligible_hit_is_none_without_candidates() {
    assert!(first_eligible_hit(&[]).is_none());
    assert!(first_eligible_hit(&[plane_hit(clutter(), true)]).is_none());
}

#[test]
fn update_classifies_retained_surfaces() {
    let mut tracker = PlaneTracker::default();
    let update = tracker.update(&frame(0, Vec3::ZERO, vec![floor(), wall(), clutter()]));
    assert_eq!(update.horizontal.len(), 1);
    assert_eq!(update.vertical.len(), 1);
    assert_eq!(update.other.len(), 1);
    assert!(update.dropped.is_empty());
    assert_eq!(update.retained_len(), 3);
    assert_eq!(tracker.count(PlaneType::Vertical), 1);
    assert_eq!(tracker.len(), 3);
}

#[test]
fn subsumed_surface_is_dropped_even_while_tracking() {
    let mut tracker = PlaneTracker::default();
    tracker.update(&frame(0, Vec3::ZERO, vec![floor(), wall()]));
    assert!(tracker.is_tracked(WALL));

    let merged = wall().with_subsumed_by(FLOOR);
    assert_eq!(merged.tracking_state, TrackingState::Tracking);
    let update = tracker.update(&frame(1, Vec3::ZERO, vec![merged]));
    assert_eq!(update.dropped, vec![WALL]);
    assert!(update.vertical.is_empty());
    assert!(!tracker.is_tracked(WALL));
    assert!(tracker.is_tracked(FLOOR));
}

#[test]
fn unreported_surfaces_keep_their_last_state() {
    let mut tracker = PlaneTracker::default();
    tracker.update(&frame(0, Vec3::ZERO, vec![floor(), wall()]));
    tracker.update(&frame(1, Vec3::ZERO, vec![]));
    assert_eq!(tracker.len(), 2);

    tracker.update(&frame(2, Vec3::ZERO, vec![floor().with_state(TrackingState::Stopped)]));
    assert!(!tracker.is_tracked(FLOOR));
    assert_eq!(tracker.get(WALL).map(|p| p.extent_x), Some(2.0));
}
