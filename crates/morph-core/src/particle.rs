use glam::Vec3;

/// Read-only view of one particle.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Particle {
    /// Stable for the particle's lifetime; equal to its storage index.
    pub id: usize,
    pub position: Vec3,
    pub target: Vec3,
    pub velocity: Vec3,
    pub size: f32,
    pub base_opacity: f32,
    pub color_index: usize,
    pub orbit_phase: f32,
}

/// SoA particle storage
pub struct ParticleSet {
    pub count: usize,
    pub position: Vec<Vec3>,
    pub velocity: Vec<Vec3>,
    /// Morph target; only rewritten by `ParticleStore::retarget`.
    pub target: Vec<Vec3>,
    /// Base dot radius in CSS pixels before depth scaling.
    pub size: Vec<f32>,
    pub base_opacity: Vec<f32>,
    /// Index into the active palette.
    pub color_index: Vec<usize>,
    /// Per-particle phase of the orbital wobble, in radians.
    pub orbit_phase: Vec<f32>,
}

impl ParticleSet {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            position: vec![Vec3::ZERO; count],
            velocity: vec![Vec3::ZERO; count],
            target: vec![Vec3::ZERO; count],
            size: vec![1.5; count],
            base_opacity: vec![1.0; count],
            color_index: vec![0; count],
            orbit_phase: vec![0.0; count],
        }
    }

    pub fn get(&self, i: usize) -> Option<Particle> {
        (i < self.count).then(|| Particle {
            id: i,
            position: self.position[i],
            target: self.target[i],
            velocity: self.velocity[i],
            size: self.size[i],
            base_opacity: self.base_opacity[i],
            color_index: self.color_index[i],
            orbit_phase: self.orbit_phase[i],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Particle> + '_ {
        (0..self.count).filter_map(move |i| self.get(i))
    }
}
