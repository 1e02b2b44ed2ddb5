use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::components::camera::{CameraRig, DevOrbit, MainCamera};
use crate::plugins::input::get_default_input_map;

/// Upper bound on a simulation step (seconds). Long frames (window drag,
/// debugger pause) advance the world by at most this much so the boat and
/// particles never teleport.
pub const MAX_TICK_DT: f32 = 0.1;

/// Per-frame simulation order. Everything reads the same wave clock, so the
/// chain guarantees the boat sits on the surface drawn this frame and the
/// camera frames the boat's final position.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimSet {
    Weather,
    Input,
    Boat,
    Surface,
    Camera,
    Effects,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb(0.53, 0.78, 0.92)))
            .insert_resource(AmbientLight {
                color: Color::WHITE,
                brightness: 300.0,
            })
            .configure_sets(
                Update,
                (
                    SimSet::Weather,
                    SimSet::Input,
                    SimSet::Boat,
                    SimSet::Surface,
                    SimSet::Camera,
                    SimSet::Effects,
                )
                    .chain(),
            )
            .add_systems(Startup, (spawn_camera, spawn_sun));
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        MainCamera,
        Camera3d::default(),
        Transform::from_xyz(0.0, 8.0, -25.0).looking_at(Vec3::ZERO, Vec3::Y),
        CameraRig::default(),
        DevOrbit::default(),
        InputManagerBundle::with_map(get_default_input_map()),
    ));
}

fn spawn_sun(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 9_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(60.0, 120.0, 40.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
