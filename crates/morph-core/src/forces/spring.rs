use glam::Vec3;

/// One semi-implicit step of the damped spring pulling `position` toward
/// `target`. Returns the new `(position, velocity)`.
#[inline]
pub fn spring_damper(
    position: Vec3,
    velocity: Vec3,
    target: Vec3,
    stiffness: f32,
    damping: f32,
) -> (Vec3, Vec3) {
    let velocity = velocity * damping + (target - position) * stiffness;
    (position + velocity, velocity)
}
