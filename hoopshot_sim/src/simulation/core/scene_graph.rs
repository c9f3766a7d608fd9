// hoopshot_sim/src/simulation/core/scene_graph.rs

//! The Bevy side of the `SceneGraph` seam. Every call the session makes ends
//! up here as entity commands, mesh/material assets, and avian components.

use std::collections::HashMap;

use avian3d::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use hoopshot_core::decoration::OVERLAY_THICKNESS;
use hoopshot_core::prelude::{ColliderShape, NodeId, NodeKind, NodeSpec, SceneGraph};
use nalgebra::{Isometry3, Vector2, Vector3};

use super::transforms::{nalgebra_isometry_to_bevy_transform, nalgebra_vector_to_bevy_vec3};

/// What the adapter remembers about one live node.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub entity: Entity,
    /// `None` for nodes that draw a glTF scene instead of one material.
    pub material: Option<Handle<StandardMaterial>>,
    /// The collider last attached, so a resize can rebuild it.
    pub collider: Option<ColliderShape>,
}

/// Lookup from core node ids to Bevy entities.
#[derive(Resource, Default, Debug)]
pub struct SceneNodes {
    nodes: HashMap<NodeId, SceneNode>,
}

impl SceneNodes {
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn entity(&self, id: NodeId) -> Option<Entity> {
        self.nodes.get(&id).map(|node| node.entity)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// `SceneGraph` over Bevy. Take it as a system parameter and hand
/// `&mut scene` to the session.
#[derive(SystemParam)]
pub struct BevySceneGraph<'w, 's> {
    commands: Commands<'w, 's>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    asset_server: Res<'w, AssetServer>,
    nodes: ResMut<'w, SceneNodes>,
}

const BALL_COLOR: Color = Color::srgb(0.93, 0.45, 0.13);

fn overlay_mesh(width: f64, depth: f64) -> Cuboid {
    Cuboid::new(width as f32, OVERLAY_THICKNESS as f32, depth as f32)
}

fn to_avian_collider(shape: &ColliderShape) -> Option<Collider> {
    match shape {
        ColliderShape::Cuboid { size } => Some(Collider::cuboid(
            size.x as f32,
            size.y as f32,
            size.z as f32,
        )),
        ColliderShape::Sphere { radius } => Some(Collider::sphere(*radius as f32)),
        // Built from the render meshes once the glTF scene has spawned.
        ColliderShape::ConcaveMesh => None,
    }
}

impl BevySceneGraph<'_, '_> {
    fn node(&self, id: NodeId, op: &str) -> Option<SceneNode> {
        let node = self.nodes.nodes.get(&id).cloned();
        if node.is_none() {
            warn!("[SCENE] {} on unknown node {:?}, ignoring.", op, id);
        }
        node
    }

    fn attach_collider(&mut self, id: NodeId, shape: ColliderShape, body: RigidBody) {
        let Some(node) = self.node(id, "attach_collider") else {
            return;
        };
        let mut entity = self.commands.entity(node.entity);
        entity.insert(body);
        match to_avian_collider(&shape) {
            Some(collider) => {
                entity.insert(collider);
            }
            None => {
                entity.insert(ColliderConstructorHierarchy::new(
                    ColliderConstructor::TrimeshFromMesh,
                ));
            }
        }
        if let Some(entry) = self.nodes.nodes.get_mut(&id) {
            entry.collider = Some(shape);
        }
    }
}

impl SceneGraph for BevySceneGraph<'_, '_> {
    fn add_node(&mut self, id: NodeId, spec: NodeSpec) {
        let transform = nalgebra_isometry_to_bevy_transform(&spec.pose);
        let (entity, material) = match &spec.kind {
            NodeKind::PlaneOverlay {
                width,
                height,
                opacity,
            } => {
                let material = self.materials.add(StandardMaterial {
                    base_color: Color::srgba(1.0, 1.0, 1.0, *opacity),
                    alpha_mode: AlphaMode::Blend,
                    unlit: true,
                    double_sided: true,
                    cull_mode: None,
                    ..default()
                });
                let entity = self
                    .commands
                    .spawn((
                        Name::new(format!("PlaneOverlay {}", id.0)),
                        Mesh3d(self.meshes.add(overlay_mesh(*width, *height))),
                        MeshMaterial3d(material.clone()),
                        transform,
                    ))
                    .id();
                (entity, Some(material))
            }
            NodeKind::Hoop { asset } => {
                // Already loaded during `AssetLoading`, this only clones the handle.
                let scene = self
                    .asset_server
                    .load(GltfAssetLabel::Scene(0).from_asset(asset.clone()));
                let entity = self
                    .commands
                    .spawn((
                        Name::new("Hoop"),
                        SceneRoot(scene),
                        transform,
                    ))
                    .id();
                (entity, None)
            }
            NodeKind::Ball { radius } => {
                let material = self.materials.add(StandardMaterial {
                    base_color: BALL_COLOR,
                    perceptual_roughness: 0.8,
                    ..default()
                });
                let entity = self
                    .commands
                    .spawn((
                        Name::new(format!("Ball {}", id.0)),
                        Mesh3d(self.meshes.add(Sphere::new(*radius as f32))),
                        MeshMaterial3d(material.clone()),
                        transform,
                    ))
                    .id();
                (entity, Some(material))
            }
        };

        debug!("[SCENE] Added {:?} as {:?}.", id, entity);
        self.nodes.nodes.insert(
            id,
            SceneNode {
                entity,
                material,
                collider: None,
            },
        );
    }

    fn remove_node(&mut self, id: NodeId) {
        let Some(node) = self.nodes.nodes.remove(&id) else {
            warn!("[SCENE] remove_node on unknown node {:?}, ignoring.", id);
            return;
        };
        // Recursive: takes the glTF children and their colliders along. The
        // material is freed with its last handle.
        self.commands.entity(node.entity).despawn();
        debug!("[SCENE] Removed {:?}.", id);
    }

    fn set_opacity(&mut self, id: NodeId, opacity: f32) {
        let Some(node) = self.node(id, "set_opacity") else {
            return;
        };
        let Some(handle) = node.material else {
            warn!("[SCENE] {:?} has no material to fade.", id);
            return;
        };
        if let Some(material) = self.materials.get_mut(&handle) {
            material.base_color.set_alpha(opacity);
        }
    }

    fn set_transform(&mut self, id: NodeId, pose: Isometry3<f64>) {
        let Some(node) = self.node(id, "set_transform") else {
            return;
        };
        self.commands
            .entity(node.entity)
            .insert(nalgebra_isometry_to_bevy_transform(&pose));
    }

    fn set_extent(&mut self, id: NodeId, extent: Vector2<f64>) {
        let Some(node) = self.node(id, "set_extent") else {
            return;
        };
        let mut entity = self.commands.entity(node.entity);
        entity.insert(Mesh3d(self.meshes.add(overlay_mesh(extent.x, extent.y))));

        if let Some(ColliderShape::Cuboid { size }) = node.collider {
            let resized = ColliderShape::Cuboid {
                size: Vector3::new(extent.x, size.y, extent.y),
            };
            if let Some(collider) = to_avian_collider(&resized) {
                entity.insert(collider);
            }
            if let Some(entry) = self.nodes.nodes.get_mut(&id) {
                entry.collider = Some(resized);
            }
        }
    }

    fn attach_static_collider(&mut self, id: NodeId, shape: ColliderShape) {
        self.attach_collider(id, shape, RigidBody::Static);
    }

    fn attach_dynamic_collider(&mut self, id: NodeId, shape: ColliderShape) {
        self.attach_collider(id, shape, RigidBody::Dynamic);
    }

    fn apply_impulse(&mut self, id: NodeId, impulse: Vector3<f64>) {
        let Some(node) = self.node(id, "apply_impulse") else {
            return;
        };
        // Non-persistent: avian clears it after the next step.
        self.commands
            .entity(node.entity)
            .insert(ExternalImpulse::new(nalgebra_vector_to_bevy_vec3(&impulse)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use nalgebra::Isometry3;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            TransformPlugin,
            AssetPlugin::default(),
            bevy::scene::ScenePlugin,
            PhysicsPlugins::default(),
        ))
        .init_asset::<Mesh>()
        .init_asset::<StandardMaterial>()
        .init_resource::<SceneNodes>();
        app
    }

    fn overlay_spec(width: f64, height: f64) -> NodeSpec {
        NodeSpec {
            kind: NodeKind::PlaneOverlay {
                width,
                height,
                opacity: 0.25,
            },
            pose: Isometry3::translation(0.0, 1.0, -2.0),
        }
    }

    #[test]
    fn overlay_lifecycle_maps_to_one_entity() {
        let mut app = test_app();
        let world = app.world_mut();

        world
            .run_system_once(|mut scene: BevySceneGraph| {
                scene.add_node(NodeId(1), overlay_spec(1.0, 2.0));
                scene.attach_static_collider(
                    NodeId(1),
                    ColliderShape::Cuboid {
                        size: Vector3::new(1.0, OVERLAY_THICKNESS, 2.0),
                    },
                );
                scene.set_opacity(NodeId(1), 0.0);
            })
            .unwrap();

        let node = world.resource::<SceneNodes>().get(NodeId(1)).cloned().unwrap();
        assert!(world.get::<RigidBody>(node.entity).is_some());
        assert!(world.get::<Collider>(node.entity).is_some());
        let transform = world.get::<Transform>(node.entity).unwrap();
        assert!((transform.translation.z + 2.0).abs() < 1e-6);

        let material = node.material.clone().unwrap();
        let alpha = world
            .resource::<Assets<StandardMaterial>>()
            .get(&material)
            .unwrap()
            .base_color
            .alpha();
        assert_eq!(alpha, 0.0);

        world
            .run_system_once(|mut scene: BevySceneGraph| {
                scene.set_extent(NodeId(1), Vector2::new(3.0, 4.0));
            })
            .unwrap();
        let resized = world.resource::<SceneNodes>().get(NodeId(1)).cloned().unwrap();
        assert_eq!(
            resized.collider,
            Some(ColliderShape::Cuboid {
                size: Vector3::new(3.0, OVERLAY_THICKNESS, 4.0)
            })
        );

        world
            .run_system_once(|mut scene: BevySceneGraph| {
                scene.remove_node(NodeId(1));
            })
            .unwrap();
        assert!(world.resource::<SceneNodes>().is_empty());
        assert!(world.get_entity(node.entity).is_err());
    }

    #[test]
    fn ball_gets_a_dynamic_body_and_an_impulse() {
        let mut app = test_app();
        let world = app.world_mut();

        world
            .run_system_once(|mut scene: BevySceneGraph| {
                scene.add_node(
                    NodeId(7),
                    NodeSpec {
                        kind: NodeKind::Ball { radius: 0.25 },
                        pose: Isometry3::identity(),
                    },
                );
                scene.attach_dynamic_collider(NodeId(7), ColliderShape::Sphere { radius: 0.25 });
                scene.apply_impulse(NodeId(7), Vector3::new(0.0, 0.0, -5.0));
            })
            .unwrap();

        let entity = world.resource::<SceneNodes>().entity(NodeId(7)).unwrap();
        assert_eq!(world.get::<RigidBody>(entity), Some(&RigidBody::Dynamic));
        let impulse = world.get::<ExternalImpulse>(entity).unwrap();
        assert!((impulse.impulse().z + 5.0).abs() < 1e-6);
    }

    #[test]
    fn calls_on_unknown_nodes_are_ignored() {
        let mut app = test_app();
        let world = app.world_mut();

        world
            .run_system_once(|mut scene: BevySceneGraph| {
                scene.set_opacity(NodeId(99), 0.5);
                scene.remove_node(NodeId(99));
                scene.apply_impulse(NodeId(99), Vector3::x());
            })
            .unwrap();
        assert!(world.resource::<SceneNodes>().is_empty());
    }
}
