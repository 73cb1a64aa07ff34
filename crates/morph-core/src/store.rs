//! Particle store: owns the live population.
//!
//! `initialize` creates the population scattered around the origin so the
//! first frames read as the shape assembling itself. `retarget` only rewrites
//! targets, which is what lets a morph run without restarting the simulation:
//! particle `i` always maps to shape sample `i`.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use crate::capability::CapabilityProfile;
use crate::particle::{Particle, ParticleSet};
use crate::shapes::{fill_targets, ShapeKind};

/// Half-extent of the initial random cloud around the origin.
const SPAWN_SPREAD: f32 = 50.0;

pub struct ParticleStore {
    pub(crate) particles: ParticleSet,
    shape: ShapeKind,
    radius: f32,
}

impl ParticleStore {
    /// Empty store; call `initialize` before stepping.
    pub fn new() -> Self {
        Self {
            particles: ParticleSet::new(0),
            shape: ShapeKind::Sphere,
            radius: 0.0,
        }
    }

    /// (Re)create `profile.particle_count` particles targeting `shape`.
    ///
    /// `palette_len` bounds the random colour index; zero is treated as one.
    pub fn initialize<R: Rng>(
        &mut self,
        shape: ShapeKind,
        profile: &CapabilityProfile,
        palette_len: usize,
        rng: &mut R,
    ) {
        let count = profile.particle_count;
        let mut particles = ParticleSet::new(count);
        fill_targets(shape, profile.base_radius, &mut particles.target);

        let palette_len = palette_len.max(1);
        for i in 0..count {
            particles.position[i] = Vec3::new(
                rng.gen_range(-SPAWN_SPREAD..SPAWN_SPREAD),
                rng.gen_range(-SPAWN_SPREAD..SPAWN_SPREAD),
                rng.gen_range(-SPAWN_SPREAD..SPAWN_SPREAD),
            );
            particles.size[i] = rng.gen_range(1.5..3.3);
            particles.base_opacity[i] = rng.gen_range(0.7..1.0);
            particles.color_index[i] = rng.gen_range(0..palette_len);
            particles.orbit_phase[i] = rng.gen_range(0.0..TAU);
        }

        log::info!(
            "initialized {} particles as {} (radius {})",
            count,
            shape.name(),
            profile.base_radius
        );
        self.particles = particles;
        self.shape = shape;
        self.radius = profile.base_radius;
    }

    /// Point every particle at `shape`. Returns `false` when already there.
    pub fn retarget(&mut self, shape: ShapeKind) -> bool {
        if shape == self.shape {
            return false;
        }
        fill_targets(shape, self.radius, &mut self.particles.target);
        log::debug!("retarget {} -> {}", self.shape.name(), shape.name());
        self.shape = shape;
        true
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.particles.count
    }

    pub fn is_empty(&self) -> bool {
        self.particles.count == 0
    }

    /// Column view of the population. Targets only change through `retarget`.
    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    /// Park every particle on its target at rest.
    #[doc(hidden)]
    pub fn settle(&mut self) {
        let p = &mut self.particles;
        p.position.copy_from_slice(&p.target);
        p.velocity.fill(Vec3::ZERO);
    }

    #[doc(hidden)]
    pub fn set_orbit_phase(&mut self, i: usize, phase: f32) {
        if let Some(slot) = self.particles.orbit_phase.get_mut(i) {
            *slot = phase;
        }
    }

    pub fn particle(&self, i: usize) -> Option<Particle> {
        self.particles.get(i)
    }

    /// Read-only copy of the whole population.
    pub fn snapshot(&self) -> Vec<Particle> {
        self.particles.iter().collect()
    }
}

impl Default for ParticleStore {
    fn default() -> Self {
        Self::new()
    }
}
