use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use crate::config::PhysicsConfig;

/// Pointer state as the scatter force sees it for one tick.
pub struct ScatterParams {
    /// False when the pointer is outside the surface or hover is disabled.
    pub active: bool,
    /// Pointer position relative to the surface centre, CSS pixels.
    pub pointer: Vec2,
    /// Pointer speed in pixels per sample.
    pub speed: f32,
    pub radius: f32,
    pub base_force: f32,
    pub speed_gain: f32,
    pub speed_max: f32,
    pub depth_kick: f32,
}

impl Default for ScatterParams {
    fn default() -> Self {
        Self::inactive(&PhysicsConfig::default())
    }
}

impl ScatterParams {
    pub fn inactive(config: &PhysicsConfig) -> Self {
        Self {
            active: false,
            pointer: Vec2::ZERO,
            speed: 0.0,
            radius: config.scatter_radius_px,
            base_force: config.scatter_base_force,
            speed_gain: config.scatter_speed_gain,
            speed_max: config.scatter_speed_max,
            depth_kick: config.scatter_depth_kick,
        }
    }

    /// Speed-dependent part of the push, saturating at `speed_max`.
    fn force(&self) -> f32 {
        self.base_force + (self.speed * self.speed_gain).min(self.speed_max)
    }
}

/// Displacement pushing one particle away from the pointer, or `None` when it
/// is out of reach.
///
/// `screen_offset` is the particle's projected position relative to the
/// surface centre. The push acts on world x/y directly; depth gets a kick
/// whose sign comes from the particle's orbit phase so the cloud bulges both
/// ways.
pub fn compute_scatter_impulse(
    screen_offset: Vec2,
    orbit_phase: f32,
    params: &ScatterParams,
) -> Option<Vec3> {
    if !params.active {
        return None;
    }

    let away = screen_offset - params.pointer;
    let dist_sq = away.length_squared();
    let radius = params.radius.max(1.0);
    if dist_sq >= radius * radius {
        return None;
    }

    let dist = dist_sq.sqrt();
    let falloff = 1.0 - dist / radius;
    let intensity = falloff * falloff;
    let push = intensity * params.force();
    // Dead centre pushes along +x.
    let dir = if dist > 1e-6 { away / dist } else { Vec2::X };

    Some(Vec3::new(
        dir.x * push,
        dir.y * push,
        (orbit_phase - PI) * push * params.depth_kick,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(pointer: Vec2, speed: f32) -> ScatterParams {
        ScatterParams {
            active: true,
            pointer,
            speed,
            ..ScatterParams::default()
        }
    }

    #[test]
    fn inactive_pointer_does_nothing() {
        let p = ScatterParams::default();
        assert!(compute_scatter_impulse(Vec2::ZERO, 1.0, &p).is_none());
    }

    #[test]
    fn out_of_radius_does_nothing() {
        let p = active(Vec2::ZERO, 0.0);
        assert!(compute_scatter_impulse(Vec2::new(100.0, 0.0), 1.0, &p).is_none());
        assert!(compute_scatter_impulse(Vec2::new(0.0, -150.0), 1.0, &p).is_none());
    }

    #[test]
    fn push_points_away_and_falls_off() {
        let p = active(Vec2::ZERO, 0.0);
        let near = compute_scatter_impulse(Vec2::new(10.0, 0.0), PI, &p).unwrap();
        let far = compute_scatter_impulse(Vec2::new(80.0, 0.0), PI, &p).unwrap();
        assert!(near.x > far.x && far.x > 0.0);
        assert_eq!(near.y, 0.0);
        // Phase of exactly pi gives no depth kick.
        assert_eq!(near.z, 0.0);
        assert!((near.x - 0.81 * 15.0).abs() < 1e-3);
    }

    #[test]
    fn speed_boost_saturates() {
        let slow = active(Vec2::ZERO, 0.0);
        let fast = active(Vec2::ZERO, 10.0);
        let very_fast = active(Vec2::ZERO, 1000.0);
        let at = Vec2::new(0.0, 50.0);
        let a = compute_scatter_impulse(at, 0.0, &slow).unwrap();
        let b = compute_scatter_impulse(at, 0.0, &fast).unwrap();
        let c = compute_scatter_impulse(at, 0.0, &very_fast).unwrap();
        assert!(b.y > a.y);
        assert!((c.y - 0.25 * 65.0).abs() < 1e-3);
        assert!(c.z < 0.0);
    }

    #[test]
    fn dead_centre_is_finite() {
        let p = active(Vec2::new(3.0, 3.0), 2.0);
        let v = compute_scatter_impulse(Vec2::new(3.0, 3.0), 0.5, &p).unwrap();
        assert!(v.is_finite());
        assert!(v.x > 0.0);
    }
}
