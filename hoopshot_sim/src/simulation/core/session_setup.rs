// hoopshot_sim/src/simulation/core/session_setup.rs

use crate::prelude::*;
use crate::simulation::core::events::{AnchorEventMessage, TapEvent};
use crate::simulation::core::prng::SimulationRng;
use crate::simulation::core::scene_graph::{BevySceneGraph, SceneNodes};
use crate::simulation::plugins::camera::rig::CameraFrameQuery;

/// The one `ArSession` of the app.
#[derive(Resource)]
pub struct ArSessionResource(pub ArSession);

pub struct SessionSetupPlugin;

impl Plugin for SessionSetupPlugin {
    fn build(&self, app: &mut App) {
        // This plugin's job is to read the config and add resources and systems.
        let config = app
            .world()
            .get_resource::<ScenarioConfig>()
            .expect("ScenarioConfig not found!");

        // A bad `[session]` table is fatal, like a missing scenario file.
        let session = match ArSession::new(config.session.clone()) {
            Ok(session) => session,
            Err(e) => panic!("Invalid [session] configuration: {}", e),
        };
        info!(
            "[SESSION] Searching for planes: {:?}, play-mode policy {:?}.",
            session.detection().planes,
            config.session.play_mode_detection
        );
        let rng = SimulationRng::from_seed(config.simulation.seed);

        // --- 1. Add the Deterministic PRNG Resource ---
        app.insert_resource(rng);

        // --- INITIALIZE RESOURCES & EVENTS ---
        app.insert_resource(ArSessionResource(session))
            .init_resource::<SceneNodes>()
            .add_event::<AnchorEventMessage>()
            .add_event::<TapEvent>();

        // Configure the per-frame schedule graph.
        app.configure_sets(
            Update,
            (ArSet::Sensors, ArSet::Input, ArSet::Session)
                .chain()
                .run_if(in_state(AppState::Running)),
        );

        app.add_systems(
            Update,
            (apply_anchor_events, handle_taps)
                .chain()
                .in_set(ArSet::Session),
        )
        .add_systems(Update, exit_after_duration);
    }
}

/// Feeds every anchor event of this frame to the session, in arrival order.
fn apply_anchor_events(
    mut events: EventReader<AnchorEventMessage>,
    mut session: ResMut<ArSessionResource>,
    mut scene: BevySceneGraph,
) {
    for AnchorEventMessage(event) in events.read() {
        debug!("[SESSION] {:?} {:?}", event_kind(event), event.anchor_id());
        session.0.apply_anchor_event(event.clone(), &mut scene);
    }
}

fn event_kind(event: &AnchorEvent) -> &'static str {
    match event {
        AnchorEvent::Added(_) => "Added",
        AnchorEvent::Updated(_) => "Updated",
        AnchorEvent::Removed(_) => "Removed",
    }
}

/// Routes taps through the session. Runs after the anchor events so a tap sees
/// the planes known at the end of this frame.
fn handle_taps(
    mut taps: EventReader<TapEvent>,
    mut session: ResMut<ArSessionResource>,
    camera: CameraFrameQuery,
    mut scene: BevySceneGraph,
) {
    for TapEvent(point) in taps.read() {
        let frame = camera.frame();
        match session.0.handle_tap(point, frame.as_ref(), &mut scene) {
            TapOutcome::HoopPlaced(hoop) => {
                info!(
                    "[SESSION] Hoop placed on anchor {:?} at {:?}. Entering play mode.",
                    hoop.anchor,
                    hoop.pose().translation.vector.as_slice()
                );
                info!(
                    "[SESSION] Plane detection is now {:?}.",
                    session.0.detection().planes
                );
            }
            TapOutcome::BallLaunched(ball) => {
                debug!(
                    "[SESSION] Ball {} launched with impulse {:?}.",
                    session.0.balls_launched(),
                    ball.impulse.as_slice()
                );
            }
            TapOutcome::Missed => {
                debug!("[SESSION] Tap at ({:.0}, {:.0}) found no wall.", point.x, point.y);
            }
            TapOutcome::NoFrame => {
                warn!("[SESSION] Tap ignored, no camera frame available yet.");
            }
            TapOutcome::Rejected(err) => {
                error!("[SESSION] Tap rejected: {}", err);
            }
        }
    }
}

fn exit_after_duration(
    time: Res<Time>,
    config: Res<ScenarioConfig>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(duration) = config.simulation.duration_seconds else {
        return;
    };
    if time.elapsed_secs() >= duration {
        info!("[SESSION] Reached duration of {:.1}s, exiting.", duration);
        exit.write(AppExit::Success);
    }
}
