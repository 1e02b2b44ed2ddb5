use bevy::prelude::*;

/// Downward acceleration applied to airborne particles (m/s^2).
pub const PARTICLE_GRAVITY: f32 = 9.8;

/// The two cosmetic particle emitters driven by boat speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmitterKind {
    /// Spray thrown up at the bow at higher speeds.
    BowSplash,
    /// Foam trailing off the hull sides.
    SideWake,
}

/// Per-emitter tuning. Pool sizes are fixed; spawn attempts that find no
/// free slot are silently skipped.
#[derive(Clone, Copy, Debug)]
pub struct EmitterConfig {
    /// Minimum |forward_speed| before this emitter produces anything.
    pub speed_threshold: f32,
    /// Average spawns per second while above the threshold.
    pub rate: f32,
    pub pool_size: usize,
    pub base_scale: f32,
    /// Uniform range for a freshly spawned particle's max_age (seconds).
    pub age_range: (f32, f32),
}

impl EmitterKind {
    pub const fn config(self) -> EmitterConfig {
        match self {
            EmitterKind::BowSplash => EmitterConfig {
                speed_threshold: 3.0,
                rate: 30.0,
                pool_size: 64,
                base_scale: 1.0,
                age_range: (0.5, 1.2),
            },
            EmitterKind::SideWake => EmitterConfig {
                speed_threshold: 1.5,
                rate: 20.0,
                pool_size: 48,
                base_scale: 1.4,
                age_range: (0.8, 1.8),
            },
        }
    }
}

/// One slot in a particle pool. Invisible slots are free for reuse.
#[derive(Clone, Copy, Debug, Default)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub age: f32,
    pub max_age: f32,
    pub visible: bool,
}

/// Fixed-size particle pool. The pool never grows: a spawn recycles the
/// first invisible slot or is skipped if every slot is live.
///
/// The simulation state lives in `particles`; `slots` holds the renderable
/// entity mirroring each slot, kept in sync by `systems::effects`.
#[derive(Component, Debug)]
pub struct ParticlePool {
    pub kind: EmitterKind,
    pub particles: Vec<Particle>,
    pub slots: Vec<Entity>,
}

impl ParticlePool {
    pub fn new(kind: EmitterKind) -> Self {
        Self {
            kind,
            particles: vec![Particle::default(); kind.config().pool_size],
            slots: Vec::new(),
        }
    }

    /// Recycles the first free slot, or returns false when the pool is
    /// exhausted.
    pub fn try_spawn(&mut self, position: Vec3, velocity: Vec3, max_age: f32) -> bool {
        let Some(slot) = self.particles.iter_mut().find(|p| !p.visible) else {
            return false;
        };
        *slot = Particle {
            position,
            velocity,
            age: 0.0,
            max_age,
            visible: true,
        };
        true
    }

    /// Advances every live particle: gravity, integration, aging. A particle
    /// dies when it outlives `max_age` or sinks below the water surface
    /// reported by `surface` at its (x, z).
    pub fn integrate<F: Fn(f32, f32) -> f32>(&mut self, dt: f32, surface: F) {
        for particle in &mut self.particles {
            if !particle.visible {
                continue;
            }
            particle.velocity.y -= PARTICLE_GRAVITY * dt;
            let step = particle.velocity * dt;
            particle.position += step;
            particle.age += dt;
            if particle.age >= particle.max_age
                || particle.position.y < surface(particle.position.x, particle.position.z)
            {
                particle.visible = false;
            }
        }
    }

    pub fn visible_count(&self) -> usize {
        self.particles.iter().filter(|p| p.visible).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_surface(_x: f32, _z: f32) -> f32 {
        f32::NEG_INFINITY
    }

    #[test]
    fn pool_never_grows_past_capacity() {
        let mut pool = ParticlePool::new(EmitterKind::BowSplash);
        let size = pool.particles.len();
        for _ in 0..size {
            assert!(pool.try_spawn(Vec3::ZERO, Vec3::Y, 1.0));
        }
        assert_eq!(pool.visible_count(), size);
        // Exhausted pool skips the spawn instead of growing.
        assert!(!pool.try_spawn(Vec3::ZERO, Vec3::Y, 1.0));
        assert_eq!(pool.particles.len(), size);
    }

    #[test]
    fn expired_particles_become_invisible() {
        let mut pool = ParticlePool::new(EmitterKind::SideWake);
        assert!(pool.try_spawn(Vec3::new(0.0, 5.0, 0.0), Vec3::Y * 20.0, 0.5));
        pool.integrate(0.6, no_surface);
        assert_eq!(pool.visible_count(), 0);
    }

    #[test]
    fn particles_die_below_the_surface() {
        let mut pool = ParticlePool::new(EmitterKind::BowSplash);
        assert!(pool.try_spawn(Vec3::new(0.0, 0.1, 0.0), Vec3::new(0.0, -5.0, 0.0), 10.0));
        pool.integrate(0.1, |_, _| 0.0);
        assert_eq!(pool.visible_count(), 0);
    }

    #[test]
    fn gravity_pulls_velocity_down() {
        let mut pool = ParticlePool::new(EmitterKind::BowSplash);
        assert!(pool.try_spawn(Vec3::new(0.0, 10.0, 0.0), Vec3::new(1.0, 2.0, 0.0), 10.0));
        pool.integrate(0.1, no_surface);
        let particle = pool.particles.iter().find(|p| p.visible).copied();
        let particle = particle.expect("particle should still be alive");
        assert!(particle.velocity.y < 2.0);
        assert!(particle.position.x > 0.0);
    }

    #[test]
    fn dead_slots_are_recycled() {
        let mut pool = ParticlePool::new(EmitterKind::SideWake);
        assert!(pool.try_spawn(Vec3::Y, Vec3::Y * 10.0, 0.2));
        pool.integrate(0.3, no_surface);
        assert_eq!(pool.visible_count(), 0);
        assert!(pool.try_spawn(Vec3::Y, Vec3::Y * 10.0, 1.0));
        assert_eq!(pool.visible_count(), 1);
    }
}
