// hoopshot_sim/src/simulation/plugins/world/spawner.rs

use crate::prelude::*;
use bevy::asset::LoadState;
use nalgebra::{Translation3, Vector3};

/// How far the room geometry sits behind its scripted plane, so overlays on
/// the plane itself stay visible.
const BACKDROP_OFFSET: f64 = 0.02;
const BACKDROP_THICKNESS: f32 = 0.02;

// --- Resources to track loading state ---

// Resource to hold the handle for the hoop scene GLB
#[derive(Resource)]
struct HoopSceneHandle(Handle<Scene>);

pub struct WorldSpawnerPlugin;

impl Plugin for WorldSpawnerPlugin {
    fn build(&self, app: &mut App) {
        app
            // --- STAGE 1: ASSET LOADING ---
            .add_systems(OnEnter(AppState::AssetLoading), start_hoop_asset_loading)
            // Waits for the hoop before the session may place it.
            .add_systems(
                Update,
                check_for_hoop_load_completion.run_if(in_state(AppState::AssetLoading)),
            )
            // --- STAGE 2: RUNNING ---
            .add_systems(
                OnEnter(AppState::Running),
                (spawn_lighting, spawn_room_backdrop),
            );
    }
}

fn start_hoop_asset_loading(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<ScenarioConfig>,
) {
    let path = config.session.hoop_asset.clone();
    info!("[ASSETS] Starting to load hoop model: {}", path);
    let handle = asset_server.load(GltfAssetLabel::Scene(0).from_asset(path));
    commands.insert_resource(HoopSceneHandle(handle));
}

/// A hoop that cannot load is fatal: the session would have nothing to place.
fn check_for_hoop_load_completion(
    mut next_state: ResMut<NextState<AppState>>,
    asset_server: Res<AssetServer>,
    hoop_handle: Res<HoopSceneHandle>,
    config: Res<ScenarioConfig>,
) {
    match asset_server.get_load_state(&hoop_handle.0) {
        Some(LoadState::Loaded) => {
            info!("[ASSETS] Hoop model loaded. Starting the session.");
            next_state.set(AppState::Running);
        }
        Some(LoadState::Failed(err)) => {
            error!("[ASSETS] Could not load '{}': {}", config.session.hoop_asset, err);
            panic!("Failed to load hoop asset '{}'", config.session.hoop_asset);
        }
        _ => {}
    }
}

fn spawn_lighting(mut commands: Commands) {
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            shadows_enabled: true,
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_xyz(2.0, 6.0, 3.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        brightness: 300.0,
        ..default()
    });
}

/// Draws the surfaces the simulated tracker will discover, standing in for the
/// camera image of a real room. Visual only: physics comes from the overlays.
fn spawn_room_backdrop(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<ScenarioConfig>,
) {
    let wall_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.53, 0.5),
        perceptual_roughness: 0.95,
        ..default()
    });
    let floor_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.27, 0.2),
        perceptual_roughness: 0.9,
        ..default()
    });

    for plane in &config.planes {
        let pose = plane.pose.to_isometry();
        // Push the slab back along the plane normal (local +Y).
        let behind = pose.rotation * (-Vector3::y() * BACKDROP_OFFSET);
        let pose = Translation3::from(behind) * pose;

        let material = match plane.alignment {
            PlaneAlignment::Vertical => wall_material.clone(),
            PlaneAlignment::Horizontal => floor_material.clone(),
        };
        commands.spawn((
            Name::new(format!("Backdrop {}", plane.name)),
            Mesh3d(meshes.add(Cuboid::new(
                plane.final_extent.x as f32,
                BACKDROP_THICKNESS,
                plane.final_extent.y as f32,
            ))),
            MeshMaterial3d(material),
            nalgebra_isometry_to_bevy_transform(&pose),
        ));
    }
}
