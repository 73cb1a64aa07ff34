use glam::{Vec2, Vec3};

use crate::capability::CapabilityProfile;
use crate::config::PhysicsConfig;
use crate::forces::orbit::orbit_offset;
use crate::forces::pointer::{compute_scatter_impulse, ScatterParams};
use crate::forces::spring::spring_damper;
use crate::interaction::InteractionState;
use crate::math::approach;
use crate::projection::{Projector, Rotation};
use crate::store::ParticleStore;

/// Global simulation state advanced once per processed frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EngineClock {
    pub time: f32,
    pub rotation: Rotation,
    /// Smoothed "pointer is moving" signal in `[0, 1]`.
    pub scatter_intensity: f32,
    pub tick: u64,
}

pub struct Solver {
    pub config: PhysicsConfig,
    clock: EngineClock,
    /// Particle indices, back to front as of the last sort.
    draw_order: Vec<usize>,
    /// Projected depth per particle as of the last sort, indexed by id.
    depth_keys: Vec<f32>,
}

impl Solver {
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            clock: EngineClock::default(),
            draw_order: Vec::new(),
            depth_keys: Vec::new(),
        }
    }

    pub fn clock(&self) -> &EngineClock {
        &self.clock
    }

    pub fn draw_order(&self) -> &[usize] {
        &self.draw_order
    }

    pub fn depth_keys(&self) -> &[f32] {
        &self.depth_keys
    }

    /// Forget the previous population's ordering. The clock keeps running so
    /// rotation does not jump on re-initialization.
    pub fn reset(&mut self, count: usize) {
        self.draw_order = (0..count).collect();
        self.depth_keys = vec![0.0; count];
    }

    /// Projector for the current rotation, centred on `center`.
    pub fn projector(&self, center: Vec2) -> Projector {
        Projector::new(self.clock.rotation, self.config.focal_length, center)
    }

    /// Orbit offset of a particle at the current time.
    pub fn orbit(&self, phase: f32) -> Vec3 {
        orbit_offset(
            self.clock.time,
            phase,
            self.config.orbit_radius,
            self.config.orbit_speed,
        )
    }

    /// Advance the simulation by one tick.
    ///
    /// Scatter is applied to the position before the spring reads it, so a
    /// pushed particle starts springing back within the same tick.
    pub fn step(
        &mut self,
        store: &mut ParticleStore,
        interaction: &InteractionState,
        profile: &CapabilityProfile,
        sort: bool,
    ) {
        let count = store.len();
        if self.draw_order.len() != count {
            self.reset(count);
        }

        let reduced = profile.is_reduced();
        let cfg = &self.config;
        let clock = &mut self.clock;

        clock.tick += 1;
        clock.time += if reduced {
            cfg.reduced_time_step
        } else {
            cfg.time_step
        };
        clock.rotation.yaw += if reduced {
            cfg.reduced_yaw_step
        } else {
            cfg.yaw_step
        };
        clock.rotation.pitch = (clock.time * cfg.pitch_frequency).sin() * cfg.pitch_amplitude;

        let scatter_target = if interaction.is_moving { 1.0 } else { 0.0 };
        clock.scatter_intensity =
            approach(clock.scatter_intensity, scatter_target, cfg.scatter_smoothing)
                .clamp(0.0, 1.0);

        let projector = self.projector(Vec2::ZERO);

        if sort {
            let particles = &store.particles;
            for i in 0..count {
                let p = particles.position[i] + self.orbit(particles.orbit_phase[i]);
                self.depth_keys[i] = projector.project(p).depth;
            }
            let keys = &self.depth_keys;
            self.draw_order.sort_by(|&a, &b| keys[a].total_cmp(&keys[b]));
        }

        let scatter = ScatterParams {
            active: profile.hover_enabled && interaction.is_hovering,
            pointer: interaction.pointer,
            speed: interaction.speed(),
            ..ScatterParams::inactive(&self.config)
        };

        let particles = &mut store.particles;
        for &i in &self.draw_order {
            let orbit = self.orbit(particles.orbit_phase[i]);
            let mut position = particles.position[i];

            if scatter.active {
                let offset = projector.project(position + orbit).offset;
                if let Some(push) =
                    compute_scatter_impulse(offset, particles.orbit_phase[i], &scatter)
                {
                    position += push;
                }
            }

            let (position, velocity) = spring_damper(
                position,
                particles.velocity[i],
                particles.target[i],
                self.config.spring,
                self.config.damping,
            );
            particles.position[i] = position;
            particles.velocity[i] = velocity;
        }
    }
}
