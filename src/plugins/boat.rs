use bevy::prelude::*;

use crate::components::boat::{Boat, BoatKinematics, BowAnchor, Flag, PlayerBoat, Rudder, WakeAnchor};
use crate::plugins::core::SimSet;
use crate::resources::boat_config::BoatPhysicsConfig;
use crate::systems::boat::{animate_boat_parts, boat_controller, buffer_boat_input, BoatIntents};

pub struct BoatPlugin;

impl Plugin for BoatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BoatPhysicsConfig>()
            .init_resource::<BoatIntents>()
            .add_systems(Startup, spawn_boat)
            .add_systems(
                Update,
                (
                    buffer_boat_input.in_set(SimSet::Input),
                    (boat_controller, animate_boat_parts)
                        .chain()
                        .in_set(SimSet::Boat),
                ),
            );
    }
}

/// Assembles the player boat from primitive meshes. The bow points along +Z
/// in boat-local space; particle anchors sit at the bow tip and on both hull
/// sides near the stern.
fn spawn_boat(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let hull_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.28, 0.14),
        perceptual_roughness: 0.8,
        ..default()
    });
    let deck_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.62, 0.44, 0.24),
        perceptual_roughness: 0.9,
        ..default()
    });
    let canvas_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.92, 0.90, 0.82),
        perceptual_roughness: 0.6,
        cull_mode: None,
        ..default()
    });
    let flag_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.82, 0.12, 0.12),
        cull_mode: None,
        ..default()
    });

    commands
        .spawn((
            Boat,
            PlayerBoat,
            BoatKinematics::default(),
            Transform::from_xyz(0.0, 1.0, 0.0),
            Visibility::default(),
        ))
        .with_children(|parent| {
            // Hull and deck.
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(4.0, 1.5, 10.0))),
                MeshMaterial3d(hull_material.clone()),
                Transform::from_xyz(0.0, 0.0, 0.0),
            ));
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(3.2, 0.4, 8.0))),
                MeshMaterial3d(deck_material.clone()),
                Transform::from_xyz(0.0, 0.95, 0.0),
            ));
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(2.4, 1.2, 3.0))),
                MeshMaterial3d(deck_material),
                Transform::from_xyz(0.0, 1.7, -1.8),
            ));

            // Mast, sail, and the speed-swayed flag at the mast top.
            parent.spawn((
                Mesh3d(meshes.add(Cylinder::new(0.12, 6.0))),
                MeshMaterial3d(hull_material.clone()),
                Transform::from_xyz(0.0, 3.95, 1.0),
            ));
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(0.05, 4.0, 3.0))),
                MeshMaterial3d(canvas_material),
                Transform::from_xyz(0.0, 4.2, 2.4),
            ));
            parent
                .spawn((
                    Flag,
                    Transform::from_xyz(0.0, 6.9, 1.0),
                    Visibility::default(),
                ))
                .with_children(|flag| {
                    flag.spawn((
                        Mesh3d(meshes.add(Cuboid::new(0.04, 0.5, 1.0))),
                        MeshMaterial3d(flag_material),
                        Transform::from_xyz(0.0, 0.0, -0.5),
                    ));
                });

            // Rudder at the stern, pivoting at its leading edge.
            parent
                .spawn((
                    Rudder,
                    Transform::from_xyz(0.0, -0.9, -5.3),
                    Visibility::default(),
                ))
                .with_children(|rudder| {
                    rudder.spawn((
                        Mesh3d(meshes.add(Cuboid::new(0.15, 1.2, 0.9))),
                        MeshMaterial3d(hull_material),
                        Transform::from_xyz(0.0, 0.0, -0.45),
                    ));
                });

            // Invisible particle anchors.
            parent.spawn((BowAnchor, Transform::from_xyz(0.0, 0.2, 5.2)));
            parent.spawn((WakeAnchor, Transform::from_xyz(2.0, 0.1, -3.0)));
            parent.spawn((WakeAnchor, Transform::from_xyz(-2.0, 0.1, -3.0)));
        });
}
