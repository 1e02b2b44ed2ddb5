use bevy::prelude::*;

/// Marker component for the single main camera.
#[derive(Component, Debug, Default)]
pub struct MainCamera;

/// Camera framing mode, cycled by a single control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraMode {
    /// Behind and above the boat, looking at a point ahead of it.
    #[default]
    Follow,
    /// At the helm, orientation driven by boat heading plus mouse look.
    FirstPerson,
    /// Far above the boat, looking straight down.
    Overhead,
}

impl CameraMode {
    /// The next mode in the Follow -> FirstPerson -> Overhead cycle.
    pub fn next(self) -> Self {
        match self {
            CameraMode::Follow => CameraMode::FirstPerson,
            CameraMode::FirstPerson => CameraMode::Overhead,
            CameraMode::Overhead => CameraMode::Follow,
        }
    }

    /// Base camera offset for this mode, in boat-local space.
    pub fn offset(self) -> Vec3 {
        match self {
            CameraMode::Follow => Vec3::new(0.0, 8.0, -25.0),
            CameraMode::FirstPerson => Vec3::new(0.0, 2.4, -1.0),
            CameraMode::Overhead => Vec3::new(0.0, 25.0, 0.0),
        }
    }
}

/// Per-camera rig state: the current mode plus accumulated mouse look.
///
/// Look yaw/pitch only apply in `FirstPerson` and are reset on mode change.
#[derive(Component, Debug, Default)]
pub struct CameraRig {
    pub mode: CameraMode,
    pub look_yaw: f32,
    pub look_pitch: f32,
}

/// Free orbit camera for development. While active it owns the camera
/// exclusively; the rig keeps its state but is not applied.
#[derive(Component, Debug)]
pub struct DevOrbit {
    pub active: bool,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    /// Orbit center, frozen at the boat position when the mode is enabled.
    pub target: Vec3,
}

impl Default for DevOrbit {
    fn default() -> Self {
        Self {
            active: false,
            yaw: 0.0,
            pitch: 0.6,
            distance: 120.0,
            target: Vec3::ZERO,
        }
    }
}
