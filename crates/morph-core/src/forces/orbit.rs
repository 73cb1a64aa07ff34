use glam::Vec3;

/// Ambient wobble added to a particle before projection. Never written back
/// into the stored position.
#[inline]
pub fn orbit_offset(time: f32, phase: f32, radius: f32, speed: f32) -> Vec3 {
    let angle = time * speed + phase;
    Vec3::new(angle.sin() * radius, angle.cos() * radius, 0.0)
}
