use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::components::boat::{BoatKinematics, PlayerBoat};
use crate::components::camera::{CameraRig, DevOrbit, MainCamera};
use crate::components::particles::ParticlePool;
use crate::features::ocean::wave_field::{WaveField, MAX_STORM_INTENSITY};

pub struct DebugUiPlugin;

impl Plugin for DebugUiPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<FrameTimeDiagnosticsPlugin>() {
            app.add_plugins(FrameTimeDiagnosticsPlugin::default());
        }

        app.add_systems(Update, debug_panel);
    }
}

fn debug_panel(
    mut contexts: EguiContexts,
    diagnostics: Res<DiagnosticsStore>,
    wave: Option<ResMut<WaveField>>,
    boats: Query<(&Transform, &BoatKinematics), With<PlayerBoat>>,
    cameras: Query<(&CameraRig, &DevOrbit), With<MainCamera>>,
    pools: Query<&ParticlePool>,
) {
    egui::Window::new("Debug Panel").show(contexts.ctx_mut(), |ui| {
        if let Some(fps) = diagnostics
            .get(&FrameTimeDiagnosticsPlugin::FPS)
            .and_then(|diag| diag.smoothed())
        {
            ui.label(format!("FPS: {:.1}", fps));
        }

        if let Ok((transform, kin)) = boats.get_single() {
            ui.separator();
            ui.heading("Boat");
            ui.label(format!(
                "Position: ({:.1}, {:.1}, {:.1})",
                transform.translation.x, transform.translation.y, transform.translation.z
            ));
            ui.label(format!("Heading: {:.0} deg", kin.heading.to_degrees()));
            ui.label(format!("Speed: {:.2} m/s", kin.forward_speed));
            ui.label(format!("Turn rate: {:.2} rad/s", kin.angular_rate));
        }

        if let Ok((rig, orbit)) = cameras.get_single() {
            ui.separator();
            ui.heading("Camera");
            ui.label(format!("Mode: {:?}", rig.mode));
            ui.label(format!("Dev orbit: {}", orbit.active));
        }

        if let Some(mut wave) = wave {
            ui.separator();
            ui.heading("Weather");
            ui.label(format!(
                "Storm intensity: {:.2}",
                wave.weather.storm_intensity
            ));
            ui.add(
                egui::Slider::new(
                    &mut wave.weather.target_storm_intensity,
                    0.0..=MAX_STORM_INTENSITY,
                )
                .text("target"),
            );
            ui.label(format!(
                "Waves: {} main, {} chop",
                wave.main_waves.len(),
                wave.chop_waves.len()
            ));
        }

        let live: usize = pools.iter().map(|pool| pool.visible_count()).sum();
        ui.separator();
        ui.label(format!("Live particles: {}", live));
    });
}
