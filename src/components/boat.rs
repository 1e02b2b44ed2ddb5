use bevy::prelude::*;

/// Marker component that identifies an entity as a boat root.
#[derive(Component, Debug, Default)]
pub struct Boat;

/// Marker component that identifies an entity as the player's boat.
#[derive(Component, Debug, Default)]
pub struct PlayerBoat;

/// Kinematic state for a wave-coupled boat.
///
/// There is no rigid-body physics here: the boat is a point that integrates
/// control intents, follows the sampled wave height underneath its hull, and
/// tilts toward the sampled surface normal. Heading is applied immediately;
/// pitch and roll lag behind their targets (see `systems::boat::step_boat`).
#[derive(Component, Debug, Default, Clone)]
pub struct BoatKinematics {
    /// Heading in radians; 0 points along +Z, increasing counter-clockwise.
    pub heading: f32,
    /// Signed forward speed (m/s). Negative values mean reverse.
    pub forward_speed: f32,
    /// Turn rate in rad/s, clamped to the configured maximum.
    pub angular_rate: f32,
    /// Smoothed pitch (radians) from the wave surface under the hull.
    pub pitch: f32,
    /// Smoothed roll (radians), including turning-induced lean.
    pub roll: f32,
}

/// Marker for the mast-top flag, swayed each frame with boat speed.
#[derive(Component, Debug, Default)]
pub struct Flag;

/// Marker for the stern rudder, which mirrors the current turn input.
#[derive(Component, Debug, Default)]
pub struct Rudder;

/// Anchor transform at the bow where splash particles spawn.
#[derive(Component, Debug, Default)]
pub struct BowAnchor;

/// Anchor transform on the hull sides where wake particles spawn.
#[derive(Component, Debug, Default)]
pub struct WakeAnchor;
