//! Recognisable object silhouettes (globe, phone, pen, gear, cart, cloud).
//!
//! Each generator splits the normalised progress `t = index / total` into
//! consecutive ranges covering `[0, 1)`, one structural feature per range.
//! Depth jitter comes from `index_jitter` so targets stay reproducible.

use std::f32::consts::{FRAC_1_SQRT_2, PI, TAU};

use glam::Vec3;

use crate::math::{fract, index_jitter, local_progress, GOLDEN_ANGLE};

#[inline]
fn progress(index: usize, total: usize) -> f32 {
    index as f32 / total as f32
}

/// Rotate a point in the xy-plane by 45 degrees.
#[inline]
fn diagonal(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new((x + y) * FRAC_1_SQRT_2, (y - x) * FRAC_1_SQRT_2, z)
}

#[inline]
fn lat_lon(r: f32, lat: f32, lon: f32) -> Vec3 {
    Vec3::new(
        r * lat.cos() * lon.cos(),
        r * lat.sin(),
        r * lat.cos() * lon.sin(),
    )
}

/// Globe: sphere surface, five latitude rings, six meridians.
pub fn shape_globe(index: usize, total: usize, radius: f32) -> Vec3 {
    let r = radius * 0.85;
    let t = progress(index, total);

    if t < 0.6 {
        let local = local_progress(t, 0.0, 0.6);
        let phi = (1.0 - 2.0 * local).acos();
        let theta = GOLDEN_ANGLE * index as f32;
        Vec3::new(
            r * phi.sin() * theta.cos(),
            r * phi.cos(),
            r * phi.sin() * theta.sin(),
        )
    } else if t < 0.8 {
        let local = local_progress(t, 0.6, 0.2);
        let ring = (local * 5.0).floor();
        let lat = (ring / 4.0 - 0.5) * PI * 0.8;
        let lon = fract(local * 5.0) * TAU;
        lat_lon(r, lat, lon)
    } else {
        let local = local_progress(t, 0.8, 0.2);
        let meridian = (local * 6.0).floor();
        let lon = meridian / 6.0 * TAU;
        let lat = (fract(local * 6.0) - 0.5) * PI;
        lat_lon(r, lat, lon)
    }
}

/// Phone: body outline, screen grid, home button.
pub fn shape_mobile(index: usize, total: usize, radius: f32) -> Vec3 {
    let r = radius * 0.75;
    let t = progress(index, total);
    let width = r * 0.5;
    let height = r;
    let depth = r * 0.08;

    if t < 0.7 {
        let sides = local_progress(t, 0.0, 0.7) * 4.0;
        let along = fract(sides);
        let (x, y) = match sides.floor() as u32 {
            0 => (width, height * (along - 0.5)),
            1 => (width * (1.0 - along * 2.0), height * 0.5),
            2 => (-width, height * (0.5 - along)),
            _ => (width * (along * 2.0 - 1.0), -height * 0.5),
        };
        Vec3::new(x, y, index_jitter(index, 0.0) * depth)
    } else if t < 0.85 {
        let local = local_progress(t, 0.7, 0.15);
        let screen_w = width * 0.85;
        let screen_h = height * 0.8;
        let gx = fract(local * 5.0);
        let gy = (local * 5.0).floor() / 5.0;
        Vec3::new(
            (gx - 0.5) * screen_w * 2.0,
            (gy - 0.5) * screen_h * 2.0,
            depth * 0.5,
        )
    } else {
        let angle = local_progress(t, 0.85, 0.15) * TAU;
        let button_r = r * 0.08;
        Vec3::new(button_r * angle.cos(), -height * 0.4, depth)
    }
}

/// Pen: barrel, tapering tip, cap; laid diagonally.
pub fn shape_pen(index: usize, total: usize, radius: f32) -> Vec3 {
    let r = radius * 0.9;
    let t = progress(index, total);
    let length = r * 1.2;
    let barrel_r = r * 0.08;

    if t < 0.65 {
        let local = local_progress(t, 0.0, 0.65);
        let angle = local * TAU * 8.0;
        let y = local * length * 0.7 - length * 0.3;
        diagonal(barrel_r * angle.cos(), y, barrel_r * angle.sin())
    } else if t < 0.85 {
        let local = local_progress(t, 0.65, 0.2);
        let angle = local * TAU * 4.0;
        let tip_r = barrel_r * (1.0 - local);
        let y = -length * 0.3 - local * length * 0.2;
        diagonal(tip_r * angle.cos(), y, tip_r * angle.sin())
    } else {
        let local = local_progress(t, 0.85, 0.15);
        let angle = local * TAU * 3.0;
        let cap_r = barrel_r * 1.1;
        let y = length * 0.4 + local * length * 0.15;
        diagonal(cap_r * angle.cos(), y, cap_r * angle.sin())
    }
}

const GEAR_TEETH: f32 = 8.0;

/// Gear: centre hole, disc, eight teeth at equal angular spacing.
pub fn shape_gear(index: usize, total: usize, radius: f32) -> Vec3 {
    let r = radius * 0.8;
    let t = progress(index, total);
    let inner_r = r * 0.35;
    let outer_r = r * 0.65;
    let tooth_h = r * 0.18;
    let z = index_jitter(index, 3.0) * r * 0.15;

    if t < 0.15 {
        let angle = local_progress(t, 0.0, 0.15) * TAU;
        let hole_r = inner_r * 0.5;
        return Vec3::new(hole_r * angle.cos(), hole_r * angle.sin(), z);
    }
    if t < 0.5 {
        let local = local_progress(t, 0.15, 0.35);
        let angle = local * TAU * 3.0;
        let disc_r = inner_r + (outer_r - inner_r) * local;
        return Vec3::new(disc_r * angle.cos(), disc_r * angle.sin(), z);
    }

    let teeth = local_progress(t, 0.5, 0.5) * GEAR_TEETH;
    let along = fract(teeth);
    let base_angle = teeth.floor() / GEAR_TEETH * TAU;
    let width = TAU / GEAR_TEETH * 0.4;
    let (tooth_r, angle) = if along < 0.3 {
        (outer_r + tooth_h * (along / 0.3), base_angle - width * 0.5)
    } else if along < 0.7 {
        (
            outer_r + tooth_h,
            base_angle + width * ((along - 0.3) / 0.4 - 0.5),
        )
    } else {
        (
            outer_r + tooth_h * (1.0 - (along - 0.7) / 0.3),
            base_angle + width * 0.5,
        )
    };
    Vec3::new(tooth_r * angle.cos(), tooth_r * angle.sin(), z)
}

/// Shopping trolley: wireframe basket, handle, two wheels.
pub fn shape_trolley(index: usize, total: usize, radius: f32) -> Vec3 {
    let r = radius * 0.75;
    let t = progress(index, total);
    let w = r * 0.8;
    let h = r * 0.5;
    let d = r * 0.5;

    if t < 0.5 {
        let edges = local_progress(t, 0.0, 0.5) * 12.0;
        let e = fract(edges);
        let (x, y, z) = match edges.floor() as u32 {
            0 => (-w + e * w * 2.0, h, d),
            1 => (w, h, d - e * d * 2.0),
            2 => (w - e * w * 2.0, h, -d),
            3 => (-w, h, -d + e * d * 2.0),
            4 => (-w, h - e * h, d),
            5 => (w, h - e * h, d),
            6 => (w, h - e * h, -d),
            7 => (-w, h - e * h, -d),
            8 => (-w + e * w * 2.0, 0.0, d),
            9 => (w, 0.0, d - e * d * 2.0),
            10 => (w - e * w * 2.0, 0.0, -d),
            _ => (-w, 0.0, -d + e * d * 2.0),
        };
        Vec3::new(x, y - r * 0.2, z)
    } else if t < 0.7 {
        let local = local_progress(t, 0.5, 0.2);
        Vec3::new(
            -w - r * 0.3 + local * r * 0.3,
            h * 0.3 + local * h * 0.4 - r * 0.2,
            0.0,
        )
    } else {
        let (local, cx) = if t < 0.85 {
            (local_progress(t, 0.7, 0.15), -w * 0.6)
        } else {
            (local_progress(t, 0.85, 0.15), w * 0.6)
        };
        let angle = local * TAU;
        let wheel_r = r * 0.15;
        Vec3::new(
            cx + wheel_r * angle.cos() * 0.3,
            -r * 0.35 + wheel_r * angle.sin(),
            d * 0.5,
        )
    }
}

/// Cloud part spheres: `(cx, cy, cr)` relative to the shape radius.
const CLOUD_PARTS: [(f32, f32, f32); 7] = [
    (0.0, 0.0, 0.45),
    (-0.35, 0.05, 0.35),
    (0.35, 0.05, 0.38),
    (-0.55, -0.1, 0.28),
    (0.55, -0.08, 0.3),
    (0.15, 0.15, 0.32),
    (-0.15, 0.12, 0.3),
];

/// Cloud: overlapping part spheres with a flattened underside.
pub fn shape_cloud(index: usize, total: usize, radius: f32) -> Vec3 {
    let r = radius * 0.8;
    let t = progress(index, total);
    let spread = t * CLOUD_PARTS.len() as f32 * 1.5;
    let (cx, cy, cr) = CLOUD_PARTS[spread.floor() as usize % CLOUD_PARTS.len()];
    let (cx, cy, cr) = (cx * r, cy * r, cr * r);

    let phi = (1.0 - 2.0 * fract(spread)).acos();
    let theta = GOLDEN_ANGLE * index as f32;

    let sphere_y = cr * phi.cos();
    let floor = -cr * 0.3;
    let y = if sphere_y > floor {
        sphere_y
    } else {
        floor + (index_jitter(index, 7.0) + 0.5) * cr * 0.1
    };

    Vec3::new(
        cx + cr * phi.sin() * theta.cos() * 0.9,
        cy + y * 0.8,
        cr * phi.sin() * theta.sin() * 0.5,
    )
}
