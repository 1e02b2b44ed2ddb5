use bevy::prelude::*;

use crate::components::particles::{EmitterKind, ParticlePool};
use crate::plugins::core::SimSet;
use crate::systems::effects::{emit_particles, integrate_particles, sync_particle_slots};

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_particle_pools).add_systems(
            Update,
            (emit_particles, integrate_particles, sync_particle_slots)
                .chain()
                .in_set(SimSet::Effects),
        );
    }
}

/// Spawns one pool entity per emitter kind plus its fixed set of renderable
/// slot entities, all pre-hidden. Slots live in world space (the pool root
/// stays at the origin) so particles detach cleanly from the moving boat.
fn setup_particle_pools(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let droplet = meshes.add(Sphere::new(0.18));

    for kind in [EmitterKind::BowSplash, EmitterKind::SideWake] {
        let mut pool = ParticlePool::new(kind);
        let root = commands
            .spawn((Transform::default(), Visibility::default()))
            .id();
        for _ in 0..kind.config().pool_size {
            // Each slot owns its material so age-based alpha fades are
            // independent.
            let material = materials.add(StandardMaterial {
                base_color: Color::srgba(0.95, 0.98, 1.0, 0.8),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            });
            let slot = commands
                .spawn((
                    Mesh3d(droplet.clone()),
                    MeshMaterial3d(material),
                    Transform::default(),
                    Visibility::Hidden,
                ))
                .id();
            commands.entity(root).add_child(slot);
            pool.slots.push(slot);
        }
        commands.entity(root).insert(pool);
    }
}
