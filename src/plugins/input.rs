use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

/// Every player-facing control in the demo. Boat controls are buffered each
/// frame into `systems::boat::BoatIntents`; camera controls are read by the
/// rig systems directly.
#[derive(Actionlike, PartialEq, Eq, Hash, Clone, Copy, Debug, Reflect)]
pub enum PlayerAction {
    Thrust,
    Reverse,
    TurnLeft,
    TurnRight,
    CycleCamera,
    ToggleDevCamera,
    #[actionlike(Axis)]
    CameraZoom,
}

pub fn get_default_input_map() -> InputMap<PlayerAction> {
    InputMap::default()
        .with(PlayerAction::Thrust, KeyCode::KeyW)
        .with(PlayerAction::Thrust, KeyCode::ArrowUp)
        .with(PlayerAction::Reverse, KeyCode::KeyS)
        .with(PlayerAction::Reverse, KeyCode::ArrowDown)
        .with(PlayerAction::TurnLeft, KeyCode::KeyA)
        .with(PlayerAction::TurnLeft, KeyCode::ArrowLeft)
        .with(PlayerAction::TurnRight, KeyCode::KeyD)
        .with(PlayerAction::TurnRight, KeyCode::ArrowRight)
        .with(PlayerAction::CycleCamera, KeyCode::KeyC)
        .with(PlayerAction::ToggleDevCamera, KeyCode::Backquote)
        .with_axis(PlayerAction::CameraZoom, MouseScrollAxis::Y)
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<PlayerAction>::default());
    }
}
