//! Geometric primitives.
//!
//! Every generator maps `(index, total, radius)` to a point. The dispatcher
//! guarantees `total >= 1`, `index < total` and a positive finite `radius`
//! before any of these run.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::math::{fract, GOLDEN_ANGLE, GOLDEN_RATIO_FRACT};

#[inline]
fn progress(index: usize, total: usize) -> f32 {
    index as f32 / total as f32
}

/// Second low-discrepancy coordinate for surfaces parameterised by `(t, s)`.
#[inline]
fn stride(index: usize) -> f32 {
    fract(index as f32 * GOLDEN_RATIO_FRACT)
}

/// Fibonacci sphere. Default shape and fallback for unknown names.
pub fn shape_sphere(index: usize, total: usize, radius: f32) -> Vec3 {
    let r = radius * 0.9;
    let phi = (1.0 - 2.0 * progress(index, total)).clamp(-1.0, 1.0).acos();
    let theta = GOLDEN_ANGLE * index as f32;
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.cos(),
        r * phi.sin() * theta.sin(),
    )
}

/// Cube surface. Maps `t` onto six faces, each 1/6 of the range.
pub fn shape_cube(index: usize, total: usize, radius: f32) -> Vec3 {
    let t = progress(index, total);
    let face = (t * 6.0).floor();
    let u = fract(t * 6.0) * 2.0 - 1.0;
    let v = stride(index) * 2.0 - 1.0;
    let p = if face < 1.0 {
        Vec3::new(u, v, 1.0)
    } else if face < 2.0 {
        Vec3::new(u, v, -1.0)
    } else if face < 3.0 {
        Vec3::new(1.0, u, v)
    } else if face < 4.0 {
        Vec3::new(-1.0, u, v)
    } else if face < 5.0 {
        Vec3::new(u, 1.0, v)
    } else {
        Vec3::new(u, -1.0, v)
    };
    p * radius * 0.55
}

/// Torus with major radius 0.6 and minor radius 0.25 (relative to `radius`).
pub fn shape_torus(index: usize, total: usize, radius: f32) -> Vec3 {
    let big_r = 0.6 * radius;
    let small_r = 0.25 * radius;
    let theta = progress(index, total) * TAU;
    let phi = stride(index) * TAU;
    Vec3::new(
        (big_r + small_r * phi.cos()) * theta.cos(),
        small_r * phi.sin(),
        (big_r + small_r * phi.cos()) * theta.sin(),
    )
}

/// Expanding spiral helix with 5 turns.
pub fn shape_helix(index: usize, total: usize, radius: f32) -> Vec3 {
    let s = progress(index, total);
    let angle = s * TAU * 5.0;
    let height = (s * 2.0 - 1.0) * 0.9;
    let coil = 0.3 + s * 0.5;
    let wave = 0.08 * (angle * 2.0 + stride(index) * TAU).sin();
    Vec3::new(
        (coil + wave) * angle.cos(),
        height,
        (coil + wave) * angle.sin(),
    ) * radius
}

/// Regular octahedron via 8 triangular faces.
pub fn shape_octahedron(index: usize, total: usize, radius: f32) -> Vec3 {
    let t = progress(index, total);
    let face = (t * 8.0).floor();
    let u = fract(t * 8.0);
    let v = stride(index);

    let (v0, v1, v2) = if face < 1.0 {
        (Vec3::X, Vec3::Z, Vec3::Y)
    } else if face < 2.0 {
        (Vec3::Z, Vec3::NEG_X, Vec3::Y)
    } else if face < 3.0 {
        (Vec3::NEG_X, Vec3::NEG_Z, Vec3::Y)
    } else if face < 4.0 {
        (Vec3::NEG_Z, Vec3::X, Vec3::Y)
    } else if face < 5.0 {
        (Vec3::X, Vec3::NEG_Z, Vec3::NEG_Y)
    } else if face < 6.0 {
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::NEG_Y)
    } else if face < 7.0 {
        (Vec3::NEG_X, Vec3::Z, Vec3::NEG_Y)
    } else {
        (Vec3::Z, Vec3::X, Vec3::NEG_Y)
    };

    // Flat face point; the cross-section is a triangle, not a sphere patch.
    let sqrt_v = v.sqrt();
    let p = v0 * (1.0 - sqrt_v) + v1.lerp(v2, u) * sqrt_v;
    p * radius * 0.8
}
