use bevy::prelude::*;
use rand::Rng;

use crate::components::boat::{BoatKinematics, BowAnchor, PlayerBoat, WakeAnchor};
use crate::components::particles::{EmitterKind, ParticlePool};
use crate::features::ocean::wave_field::WaveField;
use crate::plugins::core::MAX_TICK_DT;

/// Spawns splash and wake particles from the boat's emitter anchors.
///
/// Each emitter only fires above its speed threshold, with a per-frame
/// Bernoulli draw so the average spawn rate stays dt-independent. Particles
/// are flung outward from the hull center through the anchor, plus an upward
/// kick, both scaled by boat speed.
pub fn emit_particles(
    time: Res<Time>,
    mut pools: Query<&mut ParticlePool>,
    boats: Query<(&Transform, &BoatKinematics), With<PlayerBoat>>,
    bow_anchors: Query<&GlobalTransform, With<BowAnchor>>,
    wake_anchors: Query<&GlobalTransform, With<WakeAnchor>>,
) {
    let dt = time.delta_secs().min(MAX_TICK_DT);
    let Ok((boat_transform, kin)) = boats.get_single() else {
        return;
    };
    let speed = kin.forward_speed.abs();
    let mut rng = rand::thread_rng();

    for mut pool in &mut pools {
        let config = pool.kind.config();
        if speed < config.speed_threshold {
            continue;
        }
        let spawn_probability = f64::from((config.rate * dt).min(1.0));

        let anchors: Vec<Vec3> = match pool.kind {
            EmitterKind::BowSplash => bow_anchors.iter().map(|t| t.translation()).collect(),
            EmitterKind::SideWake => wake_anchors.iter().map(|t| t.translation()).collect(),
        };

        for anchor in anchors {
            if !rng.gen_bool(spawn_probability) {
                continue;
            }
            // Outward through the anchor, flattened to the horizontal plane.
            let mut outward = anchor - boat_transform.translation;
            outward.y = 0.0;
            let outward = outward.normalize_or_zero();

            let velocity = outward * speed * rng.gen_range(0.2..0.45)
                + Vec3::Y * speed * rng.gen_range(0.25..0.5)
                + Vec3::new(
                    rng.gen_range(-0.4..0.4),
                    rng.gen_range(0.0..0.25),
                    rng.gen_range(-0.4..0.4),
                );
            let max_age = rng.gen_range(config.age_range.0..config.age_range.1);
            pool.try_spawn(anchor, velocity, max_age);
        }
    }
}

/// Advances every pool's particles under gravity and kills those that fall
/// back under the wave surface.
pub fn integrate_particles(
    time: Res<Time>,
    wave: Option<Res<WaveField>>,
    mut pools: Query<&mut ParticlePool>,
) {
    let Some(wave) = wave else {
        return;
    };
    let dt = time.delta_secs().min(MAX_TICK_DT);
    let t = time.elapsed_secs();
    for mut pool in &mut pools {
        pool.integrate(dt, |x, z| wave.height_at(x, z, t));
    }
}

/// Mirrors each pool slot into its renderable entity: position, shrink with
/// age, fade-out alpha and visibility.
pub fn sync_particle_slots(
    pools: Query<&ParticlePool>,
    mut slots: Query<(
        &mut Transform,
        &mut Visibility,
        &MeshMaterial3d<StandardMaterial>,
    )>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for pool in &pools {
        let base_scale = pool.kind.config().base_scale;
        for (particle, entity) in pool.particles.iter().zip(pool.slots.iter()) {
            let Ok((mut transform, mut visibility, material_handle)) = slots.get_mut(*entity)
            else {
                continue;
            };
            if !particle.visible {
                *visibility = Visibility::Hidden;
                continue;
            }
            *visibility = Visibility::Visible;
            transform.translation = particle.position;
            let life = (particle.age / particle.max_age).clamp(0.0, 1.0);
            transform.scale = Vec3::splat(((1.0 - life) * base_scale).max(0.05));
            if let Some(material) = materials.get_mut(&material_handle.0) {
                material.base_color.set_alpha(0.8 * (1.0 - life));
            }
        }
    }
}
