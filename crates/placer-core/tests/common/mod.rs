// Shared fixtures for the placer-core integration tests.

#![allow(dead_code)]

use glam::Vec3;
use placer_core::*;

pub const FLOOR: PlaneId = PlaneId(1);
pub const WALL: PlaneId = PlaneId(2);
pub const CLUTTER: PlaneId = PlaneId(3);

pub fn at(x: f32, y: f32, z: f32) -> Pose {
    Pose::from_position(Vec3::new(x, y, z))
}

pub fn floor() -> PlaneSnapshot {
    PlaneSnapshot::new(FLOOR, PlaneType::HorizontalUp, at(0.0, 0.0, 0.0), 4.0, 4.0)
}

pub fn wall() -> PlaneSnapshot {
    PlaneSnapshot::new(WALL, PlaneType::Vertical, at(0.0, 1.0, -2.0), 2.0, 1.5)
}

pub fn clutter() -> PlaneSnapshot {
    PlaneSnapshot::new(CLUTTER, PlaneType::Other, at(0.5, 0.3, 0.5), 0.4, 0.4)
}

pub fn frame(index: u64, camera: Vec3, planes: Vec<PlaneSnapshot>) -> FrameSnapshot {
    FrameSnapshot::new(index, Pose::from_position(camera), TrackingState::Tracking)
        .with_planes(planes)
}

/// Placer over a scripted session whose first frame (camera at origin, floor,
/// wall and clutter all tracked) has already been ticked.
pub fn ready_placer() -> MarkerPlacer<ScriptedSession, HeadlessScene> {
    let mut session = ScriptedSession::new();
    session.push_frame(frame(0, Vec3::ZERO, vec![floor(), wall(), clutter()]));
    let mut placer = MarkerPlacer::new(session, HeadlessScene::new(), PlacerConfig::default());
    placer.on_frame(&mut |_: &str, _: &str| {});
    placer
}

pub fn down(x: f32, y: f32) -> TouchEvent {
    TouchEvent::new(TouchAction::Down, x, y)
}

pub fn moved(x: f32, y: f32) -> TouchEvent {
    TouchEvent::new(TouchAction::Move, x, y)
}

pub fn up(x: f32, y: f32) -> TouchEvent {
    TouchEvent::new(TouchAction::Up, x, y)
}
