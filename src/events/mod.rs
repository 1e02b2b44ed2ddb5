use bevy::prelude::*;

use crate::components::camera::CameraMode;

/// Emitted when the weather draws a new storm intensity target.
#[derive(Event, Debug)]
pub struct WeatherShiftEvent {
    /// The new target in [0, 0.8]; intensity ramps toward it over time.
    pub target: f32,
}

/// Emitted when the player cycles the camera mode.
#[derive(Event, Debug)]
pub struct CameraModeChangedEvent {
    pub mode: CameraMode,
}
