use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use regatta::features::ocean::OceanPlugin;
use regatta::plugins::boat::BoatPlugin;
use regatta::plugins::camera_rig::CameraRigPlugin;
use regatta::plugins::core::CorePlugin;
use regatta::plugins::debug_ui::DebugUiPlugin;
use regatta::plugins::effects::EffectsPlugin;
use regatta::plugins::input::InputPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Regatta".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .add_plugins(CorePlugin)
        .add_plugins(InputPlugin)
        .add_plugins(OceanPlugin)
        .add_plugins(BoatPlugin)
        .add_plugins(CameraRigPlugin)
        .add_plugins(EffectsPlugin)
        .add_plugins(DebugUiPlugin)
        .run();
}
