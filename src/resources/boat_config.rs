use bevy::prelude::*;

/// Boat handling configuration.
///
/// The boat is kinematic, not simulated: speeds and rates integrate control
/// intents directly and every physically meaningful scalar is clamped, so no
/// feedback loop (e.g. slope assist into speed) can diverge.
#[derive(Resource, Debug)]
pub struct BoatPhysicsConfig {
    /// Forward speed cap (m/s). The reverse cap is half of this.
    pub max_speed: f32,
    /// Throttle acceleration (m/s^2), reduced on uphill slopes.
    pub acceleration: f32,
    /// Coast-down deceleration (m/s^2) when no throttle is held.
    pub deceleration: f32,
    /// Turn input authority (rad/s^2).
    pub rotation_speed: f32,
    /// Angular rate clamp (rad/s).
    pub max_angular_rate: f32,
    /// Speed retention per 60 Hz reference tick. Below 1.0; applied
    /// frame-rate-independently and strengthened slightly in steep water.
    pub drag: f32,
    /// Strength of the downhill/uphill slope assist.
    pub gravity_strength: f32,
    /// Hull height above the sampled water surface.
    pub draft_offset: f32,
    /// Base pitch/roll response to the surface normal (radians per unit
    /// slope). Shrinks at speed so the boat stabilizes when planing.
    pub tilt: f32,
    /// Exponential smoothing rate (1/s) for height coupling.
    pub height_smoothing: f32,
    /// Exponential smoothing rate (1/s) for pitch and roll.
    pub tilt_smoothing: f32,
    /// Bow/stern sample distance for footprint height averaging.
    pub footprint_half_length: f32,
    /// Port/starboard sample distance for footprint height averaging.
    pub footprint_half_beam: f32,
    /// Weight of the center sample; the four outriggers share the rest.
    pub footprint_center_weight: f32,
}

impl Default for BoatPhysicsConfig {
    fn default() -> Self {
        Self {
            max_speed: 10.0,
            acceleration: 2.0,
            deceleration: 1.0,
            rotation_speed: 1.0,
            max_angular_rate: 1.5,
            drag: 0.995,
            gravity_strength: 6.0,
            draft_offset: 0.6,
            tilt: 0.35,
            height_smoothing: 6.0,
            tilt_smoothing: 4.0,
            footprint_half_length: 6.0,
            footprint_half_beam: 2.5,
            footprint_center_weight: 0.5,
        }
    }
}
