// hoopshot_sim/src/simulation/plugins/sensors/plane_detection.rs

//! A stand-in for the device's world tracker. Each `[[planes]]` entry is a real
//! surface that gets "discovered" at `appear_at`, refined while its extent
//! grows, and lost at `remove_at`.

use bevy::prelude::*;
use nalgebra::{Isometry3, Vector2};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::time::Duration;

// --- Simulation Crate Imports ---
use crate::prelude::*;
use crate::simulation::core::{
    events::AnchorEventMessage, prng::SimulationRng, session_setup::ArSessionResource,
};

/// Smallest extent the tracker ever reports, in meters.
const MIN_EXTENT: f64 = 0.01;

// =========================================================================
// == Components & Plugin ==
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum PlanePhase {
    Undetected,
    Tracked { since: f32 },
    Lost,
}

/// One scripted surface and its tracking state.
#[derive(Component)]
pub struct SimulatedPlane {
    script: ScriptedPlane,
    growth_time: f32,
    phase: PlanePhase,
    refine_timer: Timer,
    // Store the noise distribution for efficiency
    noise_dist: Normal<f64>,
}

/// A non-plane anchor (a feature point). The session must ignore it.
#[derive(Component)]
pub struct SimulatedFeaturePoint {
    appear_at: f32,
    transform: Isometry3<f64>,
    emitted: bool,
}

pub struct PlaneDetectionPlugin;

impl Plugin for PlaneDetectionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Running), spawn_simulated_anchors)
            .add_systems(
                Update,
                (plane_sensor_system, feature_point_sensor_system).in_set(ArSet::Sensors),
            );
    }
}

impl SimulatedPlane {
    pub fn new(script: ScriptedPlane, sensor: &SensorConfig) -> Self {
        let rate = sensor.update_rate.max(1e-3);
        Self {
            script,
            growth_time: sensor.growth_time.max(0.0),
            phase: PlanePhase::Undetected,
            refine_timer: Timer::new(Duration::from_secs_f32(1.0 / rate), TimerMode::Repeating),
            noise_dist: Normal::new(0.0, sensor.extent_noise_stddev.max(0.0) as f64)
                .expect("extent_noise_stddev must be a finite number"),
        }
    }

    pub fn name(&self) -> &str {
        &self.script.name
    }

    pub fn is_tracked(&self) -> bool {
        matches!(self.phase, PlanePhase::Tracked { .. })
    }

    /// Extent the tracker believes in at `now`, before noise.
    fn settled_extent(&self, since: f32, now: f32) -> (Vector2<f64>, bool) {
        let progress = if self.growth_time <= 0.0 {
            1.0
        } else {
            ((now - since) / self.growth_time).clamp(0.0, 1.0) as f64
        };
        let extent = self.script.initial_extent.lerp(&self.script.final_extent, progress);
        (extent, progress >= 1.0)
    }

    fn anchor(&self, id: AnchorId, extent: Vector2<f64>) -> PlaneAnchor {
        PlaneAnchor::new(
            id,
            self.script.alignment,
            self.script.pose.to_isometry(),
            extent.map(|v| v.max(MIN_EXTENT)),
        )
    }

    /// Advances the tracker by `dt` to time `now` and returns the event it
    /// reports, if any. New planes are only detected when `accepting` lets
    /// their alignment through.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        id: AnchorId,
        now: f32,
        dt: Duration,
        accepting: PlaneDetection,
        rng: &mut R,
    ) -> Option<AnchorEvent> {
        if let Some(remove_at) = self.script.remove_at {
            if now >= remove_at && self.phase != PlanePhase::Lost {
                let was_tracked = self.is_tracked();
                self.phase = PlanePhase::Lost;
                return was_tracked.then_some(AnchorEvent::Removed(id));
            }
        }

        match self.phase {
            PlanePhase::Lost => None,
            PlanePhase::Undetected => {
                if now < self.script.appear_at || !accepting.accepts(self.script.alignment) {
                    return None;
                }
                self.phase = PlanePhase::Tracked { since: now };
                self.refine_timer.reset();
                let anchor = self.anchor(id, self.script.initial_extent);
                Some(AnchorEvent::Added(RawAnchor::Plane(anchor)))
            }
            PlanePhase::Tracked { since } => {
                self.refine_timer.tick(dt);
                if !self.refine_timer.just_finished() {
                    return None;
                }
                let (mut extent, settled) = self.settled_extent(since, now);
                if !settled {
                    extent.x += self.noise_dist.sample(rng);
                    extent.y += self.noise_dist.sample(rng);
                }
                Some(AnchorEvent::Updated(RawAnchor::Plane(self.anchor(id, extent))))
            }
        }
    }
}

// =========================================================================
// == Spawning System ==
// =========================================================================

fn spawn_simulated_anchors(mut commands: Commands, config: Res<ScenarioConfig>) {
    info!(
        "[SENSOR] Simulating {} planes and {} feature points (occlusion {}).",
        config.planes.len(),
        config.feature_points.len(),
        if config.session.occlusion { "on" } else { "off" }
    );

    for plane in &config.planes {
        debug!(
            "  -> '{}' ({:?}) appears at {:.1}s",
            plane.name, plane.alignment, plane.appear_at
        );
        commands.spawn((
            Name::new(format!("SimulatedPlane {}", plane.name)),
            SimulatedPlane::new(plane.clone(), &config.sensor),
        ));
    }

    for point in &config.feature_points {
        commands.spawn((
            Name::new(format!("SimulatedFeaturePoint {}", point.name)),
            SimulatedFeaturePoint {
                appear_at: point.appear_at,
                transform: Isometry3::translation(
                    point.translation.x,
                    point.translation.y,
                    point.translation.z,
                ),
                emitted: false,
            },
        ));
    }
}

// =========================================================================
// == Runtime Systems ==
// =========================================================================

/// Runs every frame and publishes plane anchor events for the session.
fn plane_sensor_system(
    mut anchor_writer: EventWriter<AnchorEventMessage>,
    time: Res<Time>,
    mut rng: ResMut<SimulationRng>,
    session: Res<ArSessionResource>,
    mut query: Query<(Entity, &mut SimulatedPlane)>,
) {
    let accepting = session.0.detection().planes;
    let now = time.elapsed_secs();
    let dt = time.delta();

    for (entity, mut plane) in &mut query {
        let id = AnchorId::from_entity(entity);
        let Some(event) = plane.tick(id, now, dt, accepting, &mut rng.0) else {
            continue;
        };
        match &event {
            AnchorEvent::Added(_) => info!("[SENSOR] Detected plane '{}'.", plane.name()),
            AnchorEvent::Removed(_) => info!("[SENSOR] Lost plane '{}'.", plane.name()),
            AnchorEvent::Updated(_) => {}
        }
        anchor_writer.write(AnchorEventMessage(event));
    }
}

fn feature_point_sensor_system(
    mut anchor_writer: EventWriter<AnchorEventMessage>,
    time: Res<Time>,
    mut query: Query<(Entity, &mut SimulatedFeaturePoint)>,
) {
    let now = time.elapsed_secs();
    for (entity, mut point) in &mut query {
        if point.emitted || now < point.appear_at {
            continue;
        }
        point.emitted = true;
        anchor_writer.write(AnchorEventMessage(AnchorEvent::Added(RawAnchor::Point {
            id: AnchorId::from_entity(entity),
            transform: point.transform,
        })));
    }
}
