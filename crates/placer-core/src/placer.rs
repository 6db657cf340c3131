//! Frame and touch entry points wired to the core components.
//!
//! `on_frame` pulls one snapshot from the runtime and keeps it; `on_touch`
//! reads that same snapshot, so the tick and any touches until the next tick
//! share one view of tracking state.

use crate::anchors::AnchorStore;
use crate::config::PlacerConfig;
use crate::engine::{FrameSnapshot, SceneGraph, TrackingSession};
use crate::error::PlacementError;
use crate::interaction::{InteractionController, InteractionState, TouchEvent, TouchOutcome};
use crate::status::report_status;
use crate::tracker::PlaneTracker;
use crate::visualizer::PlaneVisualizer;

pub struct MarkerPlacer<S: TrackingSession, G: SceneGraph> {
    session: S,
    scene: G,
    tracker: PlaneTracker,
    visualizer: PlaneVisualizer,
    store: AnchorStore,
    controller: InteractionController,
    frame: Option<FrameSnapshot>,
}

impl<S: TrackingSession, G: SceneGraph> MarkerPlacer<S, G> {
    pub fn new(mut session: S, scene: G, config: PlacerConfig) -> Self {
        session.configure(&config.session);
        Self {
            session,
            scene,
            tracker: PlaneTracker::new(config.status_log_interval),
            visualizer: PlaneVisualizer::new(config.overlay_color, config.prune_lost_overlays),
            store: AnchorStore::new(config.marker),
            controller: InteractionController::default(),
            frame: None,
        }
    }

    /// Per-frame tick: refresh surfaces and overlays, then report status.
    /// `display` receives `(coordinates, status)` exactly once.
    pub fn on_frame<F>(&mut self, display: &mut F)
    where
        F: FnMut(&str, &str),
    {
        self.frame = self.session.update();
        if let Some(frame) = &self.frame {
            let update = self.tracker.update(frame);
            self.visualizer.update(&mut self.scene, &update);
        }
        report_status(self.frame.as_ref(), display);
    }

    pub fn on_touch(&mut self, event: &TouchEvent) -> Result<TouchOutcome, PlacementError> {
        let result = self.controller.handle(
            event,
            self.frame.as_ref(),
            &mut self.session,
            &mut self.scene,
            &mut self.store,
        );
        if let Err(e) = &result {
            log::warn!("[touch] {:?} failed: {}", event.action, e);
        }
        result
    }

    /// Removes every marker and overlay and forgets tracked surfaces.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.store.clear(&mut self.session, &mut self.scene);
        self.visualizer.clear(&mut self.scene);
        self.tracker.clear();
    }

    pub fn current_frame(&self) -> Option<&FrameSnapshot> {
        self.frame.as_ref()
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.controller.state()
    }

    pub fn store(&self) -> &AnchorStore {
        &self.store
    }

    pub fn tracker(&self) -> &PlaneTracker {
        &self.tracker
    }

    pub fn visualizer(&self) -> &PlaneVisualizer {
        &self.visualizer
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    pub fn scene(&self) -> &G {
        &self.scene
    }
}
