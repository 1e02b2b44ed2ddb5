pub mod palette;
pub mod surface;
pub mod wave_field;

use bevy::prelude::*;

use crate::events::WeatherShiftEvent;
use crate::plugins::core::SimSet;
use palette::SeaPalette;
use wave_field::WaveField;

/// Owns the procedural ocean: the wave field resource, its weather tick and
/// the per-frame surface mesh rebuild.
pub struct OceanPlugin;

impl Plugin for OceanPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WeatherShiftEvent>()
            .init_resource::<SeaPalette>()
            .insert_resource(WaveField::generate(rand::random()))
            .add_systems(Startup, surface::spawn_surface)
            .add_systems(
                Update,
                (
                    wave_field::tick_weather.in_set(SimSet::Weather),
                    surface::rebuild_surface.in_set(SimSet::Surface),
                ),
            );
    }
}
