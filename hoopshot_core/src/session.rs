// hoopshot_core/src/session.rs

//! The interaction state machine: search for a wall, place the hoop, then play.

use crate::config::SessionConfig;
use crate::decoration;
use crate::error::SessionError;
use crate::launcher::{BallObject, ProjectileLauncher};
use crate::messages::AnchorEvent;
use crate::placement::{self, CameraFrame, Placement, ScreenPoint};
use crate::registry::AnchorRegistry;
use crate::scene::SceneGraph;
use crate::types::{AnchorId, DetectionConfig, NodeId, NodeIdAllocator};
use nalgebra::Isometry3;

/// The two phases of a session. The only transition is `Searching -> PlayMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionState {
    /// Looking for a wall; taps try to place the hoop.
    #[default]
    Searching,
    /// The hoop is up; taps throw balls.
    PlayMode,
}

/// The one placed hoop. Its pose never changes after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct HoopObject {
    pub node: NodeId,
    pub anchor: AnchorId,
    pose: Isometry3<f64>,
}

impl HoopObject {
    pub fn pose(&self) -> &Isometry3<f64> {
        &self.pose
    }
}

/// What a single tap did.
#[derive(Debug, Clone, PartialEq)]
pub enum TapOutcome {
    HoopPlaced(HoopObject),
    BallLaunched(BallObject),
    /// Searching, and nothing placeable was under the tap.
    Missed,
    /// No camera frame was available.
    NoFrame,
    /// The session refused to act on the tap.
    Rejected(SessionError),
}

/// One AR session: the tracked planes, the phase, and the hoop.
///
/// Every handler runs to completion on the caller's thread and reports its
/// effects through the `SceneGraph` it is given. Dropping the session drops
/// all of its state; nothing is persisted.
#[derive(Debug)]
pub struct ArSession {
    config: SessionConfig,
    state: InteractionState,
    detection: DetectionConfig,
    registry: AnchorRegistry,
    launcher: ProjectileLauncher,
    hoop: Option<HoopObject>,
    node_ids: NodeIdAllocator,
    balls_launched: usize,
}

impl ArSession {
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let detection = config.searching_detection();
        Ok(Self {
            registry: AnchorRegistry::new(detection.planes, config.overlay_opacity),
            launcher: ProjectileLauncher::new(config.launch_power, config.ball_radius),
            state: InteractionState::Searching,
            detection,
            hoop: None,
            node_ids: NodeIdAllocator::default(),
            balls_launched: 0,
            config,
        })
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// What the sensor pipeline should currently detect.
    pub fn detection(&self) -> DetectionConfig {
        self.detection
    }

    pub fn registry(&self) -> &AnchorRegistry {
        &self.registry
    }

    pub fn hoop(&self) -> Option<&HoopObject> {
        self.hoop.as_ref()
    }

    pub fn balls_launched(&self) -> usize {
        self.balls_launched
    }

    /// Feeds one sensor event into the registry. Anchors that are not planes
    /// are ignored.
    pub fn apply_anchor_event(&mut self, event: AnchorEvent, scene: &mut dyn SceneGraph) {
        match event {
            AnchorEvent::Added(raw) => {
                if let Some(plane) = raw.as_plane() {
                    self.registry
                        .on_anchor_added(plane.clone(), &mut self.node_ids, scene);
                }
            }
            AnchorEvent::Updated(raw) => {
                if let Some(plane) = raw.as_plane() {
                    self.registry.on_anchor_updated(plane.clone(), scene);
                }
            }
            AnchorEvent::Removed(id) => {
                self.registry.on_anchor_removed(id, scene);
            }
        }
    }

    /// The single entry point for a recognised tap.
    pub fn handle_tap(
        &mut self,
        point: &ScreenPoint,
        frame: Option<&CameraFrame>,
        scene: &mut dyn SceneGraph,
    ) -> TapOutcome {
        match self.state {
            InteractionState::Searching => {
                let Some(frame) = frame else {
                    return TapOutcome::NoFrame;
                };
                let Some(placement) = placement::resolve(point, frame, &self.registry) else {
                    return TapOutcome::Missed;
                };
                match self.place_hoop(&placement, scene) {
                    Ok(hoop) => TapOutcome::HoopPlaced(hoop),
                    Err(err) => TapOutcome::Rejected(err),
                }
            }
            InteractionState::PlayMode => self.launch_ball(frame, scene),
        }
    }

    /// Puts the hoop at `placement` and enters play mode.
    ///
    /// There is only ever one hoop: a second call fails with
    /// `SessionError::HoopAlreadyPlaced` and leaves the scene untouched.
    pub fn place_hoop(
        &mut self,
        placement: &Placement,
        scene: &mut dyn SceneGraph,
    ) -> Result<HoopObject, SessionError> {
        if let Some(existing) = &self.hoop {
            return Err(SessionError::HoopAlreadyPlaced {
                anchor: existing.anchor,
            });
        }

        let node = self.node_ids.allocate();
        let (spec, shape) = decoration::hoop(placement, &self.config.hoop_asset);
        let hoop = HoopObject {
            node,
            anchor: placement.anchor,
            pose: spec.pose,
        };
        scene.add_node(node, spec);
        scene.attach_static_collider(node, shape);
        self.hoop = Some(hoop.clone());

        self.on_enter_play_mode(scene);
        Ok(hoop)
    }

    /// Side effects of entering play mode: narrow or stop plane detection as
    /// configured and hide the hoop wall's overlay.
    fn on_enter_play_mode(&mut self, scene: &mut dyn SceneGraph) {
        self.state = InteractionState::PlayMode;
        self.detection = self.config.play_detection();
        self.registry.set_accepting(self.detection.planes);

        if self.config.hide_overlay_on_play {
            if let Some(anchor) = self.hoop.as_ref().map(|hoop| hoop.anchor) {
                self.registry.hide_overlay(anchor, scene);
            }
        }
    }

    fn launch_ball(&mut self, frame: Option<&CameraFrame>, scene: &mut dyn SceneGraph) -> TapOutcome {
        if frame.is_none() {
            return TapOutcome::NoFrame;
        }
        let node = self.node_ids.allocate();
        match self.launcher.launch(frame, node, scene) {
            Some(ball) => {
                self.balls_launched += 1;
                TapOutcome::BallLaunched(ball)
            }
            None => TapOutcome::NoFrame,
        }
    }
}
