use anyhow::{bail, Context};
use glam::{Quat, Vec3};
use rand::prelude::*;

use placer_core::{
    FrameSnapshot, HeadlessScene, MarkerPlacer, PlacerConfig, PlaneId, PlaneSnapshot, PlaneType,
    Pose, ScriptedHit, ScriptedSession, TouchAction, TouchEvent, TouchOutcome, TrackingState,
};

// ---------------- Scripted session layout ----------------

const TOTAL_FRAMES: u64 = 240;
const INIT_FRAMES: u64 = 30; // camera still initializing
const SEED: u64 = 0x5EED_1234;
const CAMERA_JITTER: f32 = 0.004; // meters of hand shake per frame

const FLOOR: PlaneId = PlaneId(1);
const WALL: PlaneId = PlaneId(2);
const WALL_MERGED: PlaneId = PlaneId(3);

const TAP_FLOOR: (f32, f32) = (540.0, 1500.0);
const TAP_EMPTY: (f32, f32) = (540.0, 200.0);
const TAP_WALL: (f32, f32) = (540.0, 700.0);

const TAP_FRAME: u64 = 60;
const DRAG_START_FRAME: u64 = 90;
const DRAG_MISS_FRAME: u64 = 100;
const DRAG_WALL_FRAME: u64 = 110;
const RELEASE_FRAME: u64 = 120;
const MERGE_FRAME: u64 = 150;

fn floor_plane() -> PlaneSnapshot {
    PlaneSnapshot::new(
        FLOOR,
        PlaneType::HorizontalUp,
        Pose::from_position(Vec3::new(0.0, -1.2, -1.5)),
        3.0,
        3.0,
    )
}

fn wall_plane(id: PlaneId, extent_x: f32) -> PlaneSnapshot {
    PlaneSnapshot::new(
        id,
        PlaneType::Vertical,
        Pose {
            position: Vec3::new(0.0, 0.0, -3.0),
            orientation: Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
        },
        extent_x,
        2.5,
    )
}

fn build_session(rng: &mut StdRng) -> ScriptedSession {
    let mut session = ScriptedSession::new();
    let mut camera = Vec3::ZERO;
    for i in 0..TOTAL_FRAMES {
        camera += Vec3::new(
            rng.gen_range(-CAMERA_JITTER..CAMERA_JITTER),
            rng.gen_range(-CAMERA_JITTER..CAMERA_JITTER),
            rng.gen_range(-CAMERA_JITTER..CAMERA_JITTER),
        );
        let state = if i < INIT_FRAMES {
            TrackingState::Paused
        } else {
            TrackingState::Tracking
        };
        let mut planes = Vec::new();
        if i >= INIT_FRAMES {
            planes.push(floor_plane());
            // The wall grows as more of it is seen, then a second detection
            // of the same wall gets merged into it.
            let grown = 1.0 + (i - INIT_FRAMES) as f32 * 0.01;
            planes.push(wall_plane(WALL, grown.min(3.0)));
            if (INIT_FRAMES + 20..MERGE_FRAME).contains(&i) {
                planes.push(wall_plane(WALL_MERGED, 0.8));
            } else if i == MERGE_FRAME {
                planes.push(wall_plane(WALL_MERGED, 0.8).with_subsumed_by(WALL));
            }
        }
        session.push_frame(
            FrameSnapshot::new(i, Pose::from_position(camera), state).with_planes(planes),
        );
    }

    session.set_hits(
        TAP_FLOOR.0,
        TAP_FLOOR.1,
        vec![ScriptedHit::plane(
            FLOOR,
            Pose::from_position(Vec3::new(0.4, -1.2, -1.2)),
        )],
    );
    session.set_hits(
        TAP_WALL.0,
        TAP_WALL.1,
        vec![ScriptedHit::plane(
            WALL,
            Pose::from_position(Vec3::new(0.2, 0.1, -3.0)),
        )],
    );
    session
}

fn touches_for_frame(frame: u64) -> Vec<TouchEvent> {
    match frame {
        TAP_FRAME => vec![
            TouchEvent::new(TouchAction::Down, TAP_FLOOR.0, TAP_FLOOR.1),
            TouchEvent::new(TouchAction::Up, TAP_FLOOR.0, TAP_FLOOR.1),
        ],
        DRAG_START_FRAME => vec![TouchEvent::new(TouchAction::Down, TAP_FLOOR.0, TAP_FLOOR.1)],
        DRAG_MISS_FRAME => vec![TouchEvent::new(TouchAction::Move, TAP_EMPTY.0, TAP_EMPTY.1)],
        DRAG_WALL_FRAME => vec![TouchEvent::new(TouchAction::Move, TAP_WALL.0, TAP_WALL.1)],
        RELEASE_FRAME => vec![TouchEvent::new(TouchAction::Up, TAP_WALL.0, TAP_WALL.1)],
        _ => Vec::new(),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut rng = StdRng::seed_from_u64(SEED);
    let session = build_session(&mut rng);
    let mut placer = MarkerPlacer::new(session, HeadlessScene::new(), PlacerConfig::default());

    let mut last_status = String::new();
    let mut display = |coords: &str, status: &str| {
        if status != last_status {
            log::info!("[status] {} | {}", status, coords);
            last_status = status.to_owned();
        }
    };

    for frame in 0..TOTAL_FRAMES {
        placer.on_frame(&mut display);

        for touch in touches_for_frame(frame) {
            match placer.on_touch(&touch).context("touch handling")? {
                TouchOutcome::Placed(id) => {
                    // Touching the marker again should grab it.
                    let shape = placer
                        .store()
                        .get(id)
                        .map(|m| m.shape())
                        .context("placed marker missing from store")?;
                    placer.session_mut().set_hits(
                        TAP_FLOOR.0,
                        TAP_FLOOR.1,
                        vec![ScriptedHit::node(shape, Pose::IDENTITY)],
                    );
                }
                TouchOutcome::Released { marker, distance } => {
                    if let Some(m) = placer.store().get(marker) {
                        log::info!(
                            "[drag] {:?} settled, label {} (distance {:?})",
                            marker,
                            m.label_text(),
                            distance
                        );
                    }
                }
                outcome => log::debug!("[touch] {:?} -> {:?}", touch.action, outcome),
            }
        }

        if frame == MERGE_FRAME + 1 && placer.visualizer().has_overlay(WALL_MERGED) {
            bail!("merged wall overlay survived past the merge frame");
        }
    }

    let session = placer.session();
    log::info!(
        "done: {} marker(s), {} overlay(s), anchors created={} detached={} live={}",
        placer.store().len(),
        placer.visualizer().len(),
        session.anchors_created(),
        session.anchors_detached(),
        session.live_anchors()
    );
    Ok(())
}
