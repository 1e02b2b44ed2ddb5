use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::events::WeatherShiftEvent;
use crate::plugins::core::MAX_TICK_DT;

/// Upper bound for storm intensity. Wave amplitudes scale with
/// `1 + intensity * 2`, so 0.8 means waves up to 2.6x their calm size.
pub const MAX_STORM_INTENSITY: f32 = 0.8;

/// Seconds of simulated time between new storm targets.
const WEATHER_INTERVAL: f32 = 30.0;

/// Per-tick chance that one main wave takes a random-walk step.
const DRIFT_CHANCE: f64 = 0.005;

/// Sample spacing for the central-difference surface normal.
const NORMAL_DELTA: f32 = 0.2;

/// Combined magnitude of the position and time noise terms in `height_at`.
const NOISE_BOUND: f32 = 0.2;

// Generation ranges. These double as clamp bounds for runtime drift so a
// perturbed wave can never leave its designed envelope.
const MAIN_FREQUENCY: (f32, f32) = (0.06, 0.14);
const MAIN_SPEED: (f32, f32) = (0.4, 1.0);
const MAIN_AMPLITUDE: (f32, f32) = (0.5, 1.0);
const CHOP_FREQUENCY: (f32, f32) = (0.20, 0.45);
const CHOP_SPEED: (f32, f32) = (1.0, 2.0);
const CHOP_AMPLITUDE: (f32, f32) = (0.08, 0.25);

const MAIN_WAVE_COUNT: usize = 3;
const CHOP_WAVE_COUNT: usize = 4;

/// One sinusoidal wave component. `direction` is always unit length.
#[derive(Clone, Copy, Debug)]
pub struct WaveComponent {
    pub direction: Vec2,
    pub frequency: f32,
    pub speed: f32,
    pub amplitude: f32,
    pub phase: f32,
}

impl WaveComponent {
    fn random(
        rng: &mut StdRng,
        frequency: (f32, f32),
        speed: (f32, f32),
        amplitude: (f32, f32),
    ) -> Self {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        Self {
            direction: Vec2::new(angle.cos(), angle.sin()),
            frequency: rng.gen_range(frequency.0..frequency.1),
            speed: rng.gen_range(speed.0..speed.1),
            amplitude: rng.gen_range(amplitude.0..amplitude.1),
            phase: rng.gen_range(0.0..std::f32::consts::TAU),
        }
    }
}

/// Weather state: storm intensity ramps toward a target that is redrawn
/// roughly every 30 seconds of simulated time.
#[derive(Clone, Copy, Debug)]
pub struct WeatherState {
    pub storm_intensity: f32,
    pub target_storm_intensity: f32,
    /// Maximum intensity change per second.
    pub transition_rate: f32,
    pub last_change_time: f32,
}

impl Default for WeatherState {
    fn default() -> Self {
        Self {
            storm_intensity: 0.0,
            target_storm_intensity: 0.2,
            transition_rate: 0.05,
            last_change_time: 0.0,
        }
    }
}

/// Procedural ocean height field: a sum of directional swell and chop
/// sinusoids plus small noise terms, amplified by the current storm.
///
/// `height_at` is the single source of truth for the water surface. The
/// surface mesh, the boat's hull coupling and the particle death check all
/// sample it, so the three can never visibly diverge.
#[derive(Resource, Debug)]
pub struct WaveField {
    pub main_waves: Vec<WaveComponent>,
    pub chop_waves: Vec<WaveComponent>,
    pub weather: WeatherState,
    pub base_amplitude: f32,
    rng: StdRng,
}

impl WaveField {
    /// Builds a randomized field from a seed. The same seed always yields
    /// the same components and the same runtime drift sequence.
    pub fn generate(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let main_waves = (0..MAIN_WAVE_COUNT)
            .map(|_| WaveComponent::random(&mut rng, MAIN_FREQUENCY, MAIN_SPEED, MAIN_AMPLITUDE))
            .collect();
        let chop_waves = (0..CHOP_WAVE_COUNT)
            .map(|_| WaveComponent::random(&mut rng, CHOP_FREQUENCY, CHOP_SPEED, CHOP_AMPLITUDE))
            .collect();
        Self {
            main_waves,
            chop_waves,
            weather: WeatherState::default(),
            base_amplitude: 1.0,
            rng,
        }
    }

    /// Water surface height at (x, z) at time `time`.
    ///
    /// Main swell uses a 0.7 factor on the z frequency term and chop uses
    /// 0.8, so the two families never line up with the grid or each other.
    /// Chop contributes at half weight.
    pub fn height_at(&self, x: f32, z: f32, time: f32) -> f32 {
        let storm_factor = 1.0 + self.weather.storm_intensity * 2.0;
        let mut height = 0.0;

        for wave in &self.main_waves {
            let phase = x * wave.direction.x * wave.frequency
                + z * wave.direction.y * wave.frequency * 0.7
                + time * wave.speed
                + wave.phase;
            height += phase.sin() * wave.amplitude * self.base_amplitude * storm_factor;
        }

        for wave in &self.chop_waves {
            let phase = x * wave.direction.x * wave.frequency
                + z * wave.direction.y * wave.frequency * 0.8
                + time * wave.speed
                + wave.phase;
            height += phase.sin() * wave.amplitude * self.base_amplitude * storm_factor * 0.5;
        }

        // Micro-variation so large calm patches are never perfectly flat.
        let position_noise = (x * 0.1).sin() * (z * 0.1).cos() * 0.1;
        let time_noise = (time * 0.2 + x * 0.05 + z * 0.05).sin() * 0.1;

        height + position_noise + time_noise
    }

    /// Surface normal at (x, z), estimated by central differences of
    /// `height_at`. Keeping the normal numeric rather than analytic means it
    /// stays consistent with the height by construction.
    pub fn normal_at(&self, x: f32, z: f32, time: f32) -> Vec3 {
        let left = self.height_at(x - NORMAL_DELTA, z, time);
        let right = self.height_at(x + NORMAL_DELTA, z, time);
        let near = self.height_at(x, z - NORMAL_DELTA, time);
        let far = self.height_at(x, z + NORMAL_DELTA, time);
        Vec3::new(left - right, 2.0 * NORMAL_DELTA, near - far).normalize()
    }

    /// Storm-amplified ceiling on |height_at|: the sum of all component
    /// amplitudes at current storm intensity plus the noise bound. Used to
    /// normalize heights for vertex coloring.
    pub fn max_height_bound(&self) -> f32 {
        let storm_factor = 1.0 + self.weather.storm_intensity * 2.0;
        let main: f32 = self.main_waves.iter().map(|w| w.amplitude).sum();
        let chop: f32 = self.chop_waves.iter().map(|w| w.amplitude).sum::<f32>() * 0.5;
        (main + chop) * self.base_amplitude * storm_factor + NOISE_BOUND
    }

    /// Advances weather and occasionally drifts one main wave. Returns the
    /// new storm target when one was drawn this tick.
    pub fn tick(&mut self, dt: f32, time: f32) -> Option<f32> {
        let mut new_target = None;
        if time - self.weather.last_change_time >= WEATHER_INTERVAL {
            self.weather.last_change_time = time;
            self.weather.target_storm_intensity = self.rng.gen_range(0.0..MAX_STORM_INTENSITY);
            new_target = Some(self.weather.target_storm_intensity);
        }

        // Intensity moves toward the target by at most transition_rate * dt.
        let max_step = self.weather.transition_rate * dt;
        let delta = (self.weather.target_storm_intensity - self.weather.storm_intensity)
            .clamp(-max_step, max_step);
        self.weather.storm_intensity =
            (self.weather.storm_intensity + delta).clamp(0.0, MAX_STORM_INTENSITY);

        if self.rng.gen_bool(DRIFT_CHANCE) {
            self.drift_one();
        }
        new_target
    }

    /// Random-walks one main wave: jitters its direction angle and nudges
    /// speed and amplitude within their generation bounds. This is a slow
    /// drift, never a resample.
    pub fn drift_one(&mut self) {
        if self.main_waves.is_empty() {
            return;
        }
        let index = self.rng.gen_range(0..self.main_waves.len());
        let angle_delta = self.rng.gen_range(-0.15..0.15f32);
        let speed_delta = self.rng.gen_range(-0.05..0.05f32);
        let amplitude_delta = self.rng.gen_range(-0.05..0.05f32);

        let wave = &mut self.main_waves[index];
        let angle = wave.direction.y.atan2(wave.direction.x) + angle_delta;
        wave.direction = Vec2::new(angle.cos(), angle.sin());
        wave.speed = (wave.speed + speed_delta).clamp(MAIN_SPEED.0, MAIN_SPEED.1);
        wave.amplitude = (wave.amplitude + amplitude_delta).clamp(MAIN_AMPLITUDE.0, MAIN_AMPLITUDE.1);
    }
}

/// System that advances the wave field's weather once per frame.
pub fn tick_weather(
    time: Res<Time>,
    mut wave: ResMut<WaveField>,
    mut shifts: EventWriter<WeatherShiftEvent>,
) {
    let dt = time.delta_secs().min(MAX_TICK_DT);
    if let Some(target) = wave.tick(dt, time.elapsed_secs()) {
        info!("Weather shifting: new storm target {:.2}", target);
        shifts.send(WeatherShiftEvent { target });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_is_deterministic_for_fixed_state() {
        let field = WaveField::generate(42);
        let a = field.height_at(12.5, -7.25, 3.0);
        let b = field.height_at(12.5, -7.25, 3.0);
        assert_eq!(a, b);

        // Same seed, fresh field: identical components, identical heights.
        let other = WaveField::generate(42);
        assert_eq!(a, other.height_at(12.5, -7.25, 3.0));
    }

    #[test]
    fn normals_are_unit_length() {
        let field = WaveField::generate(7);
        for &(x, z, t) in &[
            (0.0, 0.0, 0.0),
            (50.0, -32.0, 4.2),
            (-180.0, 199.0, 61.0),
            (0.3, 0.7, 1000.0),
        ] {
            let n = field.normal_at(x, z, t);
            assert!((n.length() - 1.0).abs() < 1e-4, "normal {n:?} not unit");
            assert!(n.y > 0.0, "normal should point up");
        }
    }

    #[test]
    fn storm_intensity_stays_bounded_and_continuous() {
        let mut field = WaveField::generate(3);
        let dt = 0.05;
        let mut time = 0.0;
        for _ in 0..20_000 {
            let before = field.weather.storm_intensity;
            field.tick(dt, time);
            let after = field.weather.storm_intensity;
            assert!((0.0..=MAX_STORM_INTENSITY).contains(&after));
            let max_step = field.weather.transition_rate * dt;
            assert!(
                (after - before).abs() <= max_step + 1e-6,
                "storm jumped by {}",
                (after - before).abs()
            );
            time += dt;
        }
    }

    #[test]
    fn drift_preserves_component_invariants() {
        let mut field = WaveField::generate(11);
        for _ in 0..500 {
            field.drift_one();
        }
        for wave in &field.main_waves {
            assert!((wave.direction.length() - 1.0).abs() < 1e-4);
            assert!(wave.amplitude >= MAIN_AMPLITUDE.0 && wave.amplitude <= MAIN_AMPLITUDE.1);
            assert!(wave.speed >= MAIN_SPEED.0 && wave.speed <= MAIN_SPEED.1);
        }
    }

    #[test]
    fn heights_respect_the_storm_amplified_ceiling() {
        let mut field = WaveField::generate(99);
        field.weather.storm_intensity = MAX_STORM_INTENSITY;
        let bound = field.max_height_bound();
        for xi in 0..60 {
            for zi in 0..60 {
                let x = -150.0 + xi as f32 * 5.0;
                let z = -150.0 + zi as f32 * 5.0;
                let h = field.height_at(x, z, 13.7);
                assert!(h.abs() <= bound, "height {h} exceeds bound {bound}");
            }
        }
    }

    #[test]
    fn weather_system_runs_in_an_app() {
        let mut app = App::new();
        app.add_plugins(bevy::time::TimePlugin);
        app.add_event::<WeatherShiftEvent>();
        app.insert_resource(WaveField::generate(5));
        app.add_systems(Update, tick_weather);

        app.update();
        app.update();

        let field = app.world().resource::<WaveField>();
        let storm = field.weather.storm_intensity;
        assert!((0.0..=MAX_STORM_INTENSITY).contains(&storm));
    }
}
