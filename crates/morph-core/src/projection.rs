//! Rotation and perspective projection.
//!
//! Yaw spins around the vertical axis, pitch tips the result toward the
//! viewer, then a pinhole divide by `focal + depth` maps to the screen.

use glam::{Vec2, Vec3};

use crate::math::ratio_or;

/// Smallest allowed perspective denominator, as a fraction of the focal length.
const MIN_DENOMINATOR: f32 = 0.05;

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Rotation {
    pub yaw: f32,
    pub pitch: f32,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Projection {
    /// Position relative to the surface centre.
    pub offset: Vec2,
    /// Absolute position on the surface.
    pub screen: Vec2,
    /// Rotated depth; larger values are drawn later.
    pub depth: f32,
    /// Perspective scale factor.
    pub scale: f32,
}

/// Rotation with cached trig, valid for one tick.
#[derive(Clone, Copy, Debug)]
pub struct Projector {
    cos_yaw: f32,
    sin_yaw: f32,
    cos_pitch: f32,
    sin_pitch: f32,
    focal_length: f32,
    center: Vec2,
}

impl Projector {
    pub fn new(rotation: Rotation, focal_length: f32, center: Vec2) -> Self {
        Self {
            cos_yaw: rotation.yaw.cos(),
            sin_yaw: rotation.yaw.sin(),
            cos_pitch: rotation.pitch.cos(),
            sin_pitch: rotation.pitch.sin(),
            focal_length: focal_length.max(1.0),
            center,
        }
    }

    pub fn rotate(&self, p: Vec3) -> Vec3 {
        let rx = p.x * self.cos_yaw - p.z * self.sin_yaw;
        let rz = p.x * self.sin_yaw + p.z * self.cos_yaw;
        let ry = p.y * self.cos_pitch - rz * self.sin_pitch;
        let fz = p.y * self.sin_pitch + rz * self.cos_pitch;
        Vec3::new(rx, ry, fz)
    }

    pub fn project(&self, p: Vec3) -> Projection {
        let r = self.rotate(p);
        let denominator = (self.focal_length + r.z).max(self.focal_length * MIN_DENOMINATOR);
        let scale = self.focal_length / denominator;
        let offset = Vec2::new(r.x, r.y) * scale;
        Projection {
            offset,
            screen: self.center + offset,
            depth: r.z,
            scale,
        }
    }
}

/// Depth mapped into `[0, 1]` across a shape of the given radius.
pub fn normalized_depth(depth: f32, radius: f32) -> f32 {
    ratio_or(depth + radius, radius * 2.0, 0.5).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_rotation_keeps_point() {
        let pr = Projector::new(Rotation::default(), 450.0, Vec2::new(300.0, 300.0));
        let p = pr.project(Vec3::new(10.0, -20.0, 0.0));
        assert_eq!(p.scale, 1.0);
        assert_eq!(p.offset, Vec2::new(10.0, -20.0));
        assert_eq!(p.screen, Vec2::new(310.0, 280.0));
    }

    #[test]
    fn quarter_yaw_moves_x_into_depth() {
        let rot = Rotation {
            yaw: std::f32::consts::FRAC_PI_2,
            pitch: 0.0,
        };
        let pr = Projector::new(rot, 450.0, Vec2::ZERO);
        let r = pr.rotate(Vec3::new(100.0, 0.0, 0.0));
        assert!(r.x.abs() < 1e-3);
        assert!((r.z - 100.0).abs() < 1e-3);
    }

    #[test]
    fn camera_plane_does_not_blow_up() {
        let pr = Projector::new(Rotation::default(), 450.0, Vec2::ZERO);
        let p = pr.project(Vec3::new(5.0, 5.0, -450.0));
        assert!(p.scale.is_finite());
        assert!(p.offset.is_finite());
        assert_eq!(p.scale, 20.0);
    }

    #[test]
    fn depth_normalisation_is_clamped() {
        assert_eq!(normalized_depth(-500.0, 150.0), 0.0);
        assert_eq!(normalized_depth(500.0, 150.0), 1.0);
        assert_eq!(normalized_depth(0.0, 150.0), 0.5);
        assert_eq!(normalized_depth(0.0, 0.0), 0.5);
    }
}
