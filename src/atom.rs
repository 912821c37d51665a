//! The animated atom: a nucleus, orbit rings and electrons that trail a tail of
//! shrinking spheres. Nothing here is physically meaningful, it only has to
//! look good.

use crate::color::ColorCycle;
use crate::config::{
    AtomConfig, ConfigError, Features, validate_electron_count, validate_radius, validate_speed,
};
use crate::renderer::Renderer;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::time::Duration;

/// Names of the first ten elements, indexed by electron count - 1.
pub const ELEMENT_NAMES: [&str; 10] = [
    "Hydrogen",
    "Helium",
    "Lithium",
    "Beryllium",
    "Boron",
    "Carbon",
    "Nitrogen",
    "Oxygen",
    "Fluorine",
    "Neon",
];

/// The orbit radius is always this many nucleus radii.
pub const ORBIT_SCALE: f32 = 8.0;
/// Scene rotation applied per unit of spin counter.
pub const SPIN_ANGLE_STEP: f32 = PI / 16.0;
/// Number of noise lines drawn inside the nucleus.
pub const NOISE_LINES: usize = 50;
pub const ORBIT_SEGMENTS: u32 = 50;

const NUCLEUS_JITTER: f32 = 2.0;
const ELECTRON_JITTER: f32 = 0.5;
const TAIL_ROTATION_STEP: f32 = PI / 256.0;
const ELLIPSOID_ASPECT: f32 = 1.5;
const NOISE_ALPHA: f32 = 30.0 / 255.0;

/// Per-frame switches exposed to the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomToggles {
    pub nucleus_vibrate: bool,
    pub electron_vibrate: bool,
    pub nucleus_noise: bool,
    pub show_orbits: bool,
    pub antialiasing: bool,
    pub spin: BVec3,
}

impl Default for AtomToggles {
    fn default() -> Self {
        Self {
            nucleus_vibrate: false,
            electron_vibrate: false,
            nucleus_noise: false,
            show_orbits: true,
            antialiasing: false,
            spin: BVec3::FALSE,
        }
    }
}

pub struct AtomModel {
    position: Vec2,
    nucleus_radius: f32,
    orbit_radius: f32,
    orbit_thickness: f32,
    orbit_color: Color,
    electron_count: usize,
    delta_angle: f32,
    rotations_per_sec: f32,
    rotation: f64,
    phase_seeds: Box<[f32]>,
    tail_spheres: usize,
    toggles: AtomToggles,
    features: Features,
    nucleus_color: Color,
    electron_color: Color,
    nucleus_cycle: ColorCycle,
    electron_cycle: ColorCycle,
    spin_counters: Vec3,
    spin_increment: f32,
    last_tick: Option<Duration>,
    last_delta_ms: f64,
    rng: StdRng,
}

impl AtomModel {
    pub fn new(config: &AtomConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Builds the model with a caller-supplied random source.
    pub fn with_rng(config: &AtomConfig, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        // One spare slot past the capacity.
        let phase_seeds = (0..=config.max_electrons)
            .map(|_| rng.random_range(0.0..TAU))
            .collect();
        let spin_counters = Vec3::new(rng.random(), rng.random(), rng.random());

        let [nr, ng, nb] = config.nucleus_color;
        let [er, eg, eb] = config.electron_color;

        Ok(Self {
            position: Vec2::from_array(config.position),
            nucleus_radius: config.nucleus_radius,
            orbit_radius: config.nucleus_radius * ORBIT_SCALE,
            orbit_thickness: config.orbit_thickness,
            orbit_color: Color::BLACK,
            electron_count: config.electron_count,
            delta_angle: PI / config.electron_count as f32,
            rotations_per_sec: config.rotations_per_sec,
            rotation: 0.0,
            phase_seeds,
            tail_spheres: config.tail_spheres,
            toggles: AtomToggles {
                antialiasing: config.antialiasing,
                ..default()
            },
            features: config.features,
            nucleus_color: Color::srgb_u8(nr, ng, nb),
            electron_color: Color::srgb_u8(er, eg, eb),
            nucleus_cycle: ColorCycle::new(
                config.nucleus_cycle_rate,
                config.nucleus_saturation,
                config.nucleus_lightness,
            ),
            electron_cycle: ColorCycle::new(
                config.electron_cycle_rate,
                config.electron_saturation,
                config.electron_lightness,
            ),
            spin_counters,
            spin_increment: config.spin_increment,
            last_tick: None,
            last_delta_ms: 0.0,
            rng,
        })
    }

    /// Element name for the current electron count, if it is one of the first ten.
    pub fn name(&self) -> Option<&'static str> {
        ELEMENT_NAMES.get(self.electron_count.checked_sub(1)?).copied()
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn nucleus_radius(&self) -> f32 {
        self.nucleus_radius
    }

    pub fn set_nucleus_radius(&mut self, radius: f32) -> Result<(), ConfigError> {
        validate_radius(radius)?;
        self.nucleus_radius = radius;
        self.orbit_radius = radius * ORBIT_SCALE;
        debug!("Nucleus radius set to {}", radius);
        Ok(())
    }

    pub fn orbit_radius(&self) -> f32 {
        self.orbit_radius
    }

    pub fn max_electrons(&self) -> usize {
        self.phase_seeds.len() - 1
    }

    pub fn electron_count(&self) -> usize {
        self.electron_count
    }

    pub fn set_electron_count(&mut self, count: usize) -> Result<(), ConfigError> {
        validate_electron_count(count, self.max_electrons())?;
        self.electron_count = count;
        self.delta_angle = PI / count as f32;
        debug!("Electron count set to {}", count);
        Ok(())
    }

    /// Rotation between successive electrons and orbit rings.
    pub fn delta_angle(&self) -> f32 {
        self.delta_angle
    }

    /// Rotations per second. Negative values reverse the orbit direction.
    pub fn electron_speed(&self) -> f32 {
        self.rotations_per_sec
    }

    pub fn set_electron_speed(&mut self, rotations_per_sec: f32) -> Result<(), ConfigError> {
        validate_speed(rotations_per_sec)?;
        self.rotations_per_sec = rotations_per_sec;
        debug!("Electron speed set to {} rotations/s", rotations_per_sec);
        Ok(())
    }

    /// Accumulated orbit phase in radians.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn phase_seeds(&self) -> &[f32] {
        &self.phase_seeds
    }

    pub fn tail_spheres(&self) -> usize {
        self.tail_spheres
    }

    pub fn toggles_mut(&mut self) -> &mut AtomToggles {
        &mut self.toggles
    }

    pub fn features(&self) -> Features {
        self.features
    }

    pub fn nucleus_color(&self) -> Color {
        self.nucleus_color
    }

    pub fn set_nucleus_color(&mut self, color: Color) {
        self.nucleus_color = color;
    }

    pub fn electron_color(&self) -> Color {
        self.electron_color
    }

    pub fn set_electron_color(&mut self, color: Color) {
        self.electron_color = color;
    }

    pub fn orbit_color(&self) -> Color {
        self.orbit_color
    }

    pub fn set_orbit_color(&mut self, color: Color) {
        self.orbit_color = color;
    }

    pub fn nucleus_cycle_mut(&mut self) -> &mut ColorCycle {
        &mut self.nucleus_cycle
    }

    pub fn electron_cycle_mut(&mut self) -> &mut ColorCycle {
        &mut self.electron_cycle
    }

    pub fn spin_counters(&self) -> Vec3 {
        self.spin_counters
    }

    /// Milliseconds covered by the most recent tick.
    pub fn last_delta_ms(&self) -> f64 {
        self.last_delta_ms
    }

    /// Advances the animation to `now` and draws the whole atom.
    ///
    /// `now` is any monotonic timestamp; only differences between calls matter.
    /// The first call covers zero elapsed time.
    pub fn tick(&mut self, now: Duration, renderer: &mut impl Renderer) {
        let elapsed_ms = self
            .last_tick
            .map_or(0.0, |last| now.saturating_sub(last).as_secs_f64() * 1000.0);
        self.last_delta_ms = elapsed_ms;

        self.cycle_colors();
        self.rotation += elapsed_ms * std::f64::consts::TAU * f64::from(self.rotations_per_sec)
            / 1000.0;

        renderer.clear();
        if self.features.antialiasing {
            renderer.set_antialiasing(self.toggles.antialiasing);
        }
        renderer.rotate_x(self.spin_counters.x * SPIN_ANGLE_STEP);
        renderer.rotate_y(self.spin_counters.y * SPIN_ANGLE_STEP);
        renderer.rotate_z(self.spin_counters.z * SPIN_ANGLE_STEP);
        self.advance_spin();
        renderer.no_stroke();

        self.draw_nucleus(renderer);
        if self.toggles.show_orbits {
            self.draw_orbits(renderer);
        }
        self.draw_electrons(renderer);

        self.last_tick = Some(now);
    }

    fn cycle_colors(&mut self) {
        if !self.features.color_cycling {
            return;
        }
        if self.nucleus_cycle.enabled {
            self.nucleus_color = self.nucleus_cycle.advance();
        }
        if self.electron_cycle.enabled {
            self.electron_color = self.electron_cycle.advance();
        }
    }

    fn advance_spin(&mut self) {
        let step = Vec3::select(self.toggles.spin, Vec3::splat(self.spin_increment), Vec3::ZERO);
        self.spin_counters += step;
    }

    fn draw_nucleus(&mut self, renderer: &mut impl Renderer) {
        let center = self.position.extend(0.0);
        let jitter = if self.toggles.nucleus_vibrate {
            Vec3::new(
                self.rng.random_range(-NUCLEUS_JITTER..NUCLEUS_JITTER),
                self.rng.random_range(-NUCLEUS_JITTER..NUCLEUS_JITTER),
                0.0,
            )
        } else {
            Vec3::ZERO
        };

        renderer.push();
        renderer.translate(center + jitter);
        renderer.fill(self.nucleus_color);
        renderer.sphere(self.nucleus_radius);
        renderer.pop();

        if self.features.nucleus_noise && self.toggles.nucleus_noise {
            renderer.stroke(Color::WHITE.with_alpha(NOISE_ALPHA));
            for _ in 0..NOISE_LINES {
                let tip = random_unit_vector(&mut self.rng) * self.nucleus_radius;
                renderer.line(center, center + tip);
            }
            renderer.no_stroke();
        }
    }

    fn draw_orbits(&self, renderer: &mut impl Renderer) {
        renderer.push();
        renderer.translate(self.position.extend(0.0));
        renderer.rotate_x(FRAC_PI_2);
        renderer.fill(self.orbit_color);
        for _ in 0..self.electron_count {
            renderer.rotate_y(self.delta_angle);
            renderer.torus(self.orbit_radius, self.orbit_thickness, ORBIT_SEGMENTS);
        }
        renderer.pop();
    }

    fn draw_electrons(&mut self, renderer: &mut impl Renderer) {
        renderer.push();
        renderer.translate(self.position.extend(0.0));
        for index in 0..self.electron_count {
            renderer.rotate_z(self.delta_angle);
            self.draw_electron(index, renderer);
        }
        renderer.pop();
    }

    fn draw_electron(&mut self, index: usize, renderer: &mut impl Renderer) {
        // Wrap before narrowing to f32.
        let phase = self.rotation.rem_euclid(std::f64::consts::TAU);
        let base_rotation = (phase + f64::from(self.phase_seeds[index])) as f32;

        for sphere in 0..self.tail_spheres {
            let rate = sphere as f32 / self.tail_spheres as f32;
            let jitter = if self.toggles.electron_vibrate {
                self.rng.random_range(-ELECTRON_JITTER..ELECTRON_JITTER)
            } else {
                0.0
            };
            let size = rate * self.nucleus_radius / 5.0;

            renderer.push();
            renderer.rotate_y(base_rotation + TAIL_ROTATION_STEP * sphere as f32 * rate);
            renderer.translate(Vec3::new(self.orbit_radius + jitter, jitter, 0.0));
            renderer.fill(self.electron_color);
            renderer.ellipsoid(size * ELLIPSOID_ASPECT, size);
            renderer.pop();
        }
    }
}

/// Uniformly distributed direction on the unit sphere.
fn random_unit_vector(rng: &mut impl Rng) -> Vec3 {
    let angle = rng.random_range(0.0..TAU);
    let z: f32 = rng.random_range(-1.0..1.0);
    let ring = (1.0 - z * z).sqrt();
    Vec3::new(ring * angle.cos(), ring * angle.sin(), z)
}
