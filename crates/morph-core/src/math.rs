use std::f32::consts::PI;

/// Golden angle in radians, `π·(1 + √5)`, used for Fibonacci spirals.
pub const GOLDEN_ANGLE: f32 = PI * 3.236_068;

/// Fractional part of the golden ratio, used as a low-discrepancy stride.
pub const GOLDEN_RATIO_FRACT: f32 = 0.618_034;

/// Fractional part, always in `[0, 1)` (GLSL `fract`).
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Scalar hash of `p` into `[0, 1)`.
pub fn hash11(p: f32) -> f32 {
    let mut p = fract(p * 0.1031);
    p *= p + 33.33;
    p *= p + p;
    fract(p)
}

/// Deterministic per-index jitter in `[-0.5, 0.5)`.
#[inline]
pub fn index_jitter(index: usize, salt: f32) -> f32 {
    hash11(index as f32 * 1.37 + salt) - 0.5
}

/// Single-pole low-pass step from `current` toward `target`.
#[inline]
pub fn approach(current: f32, target: f32, rate: f32) -> f32 {
    current + (target - current) * rate
}

/// `numerator / denominator`, or `fallback` when the denominator is not usable.
#[inline]
pub fn ratio_or(numerator: f32, denominator: f32, fallback: f32) -> f32 {
    if denominator.abs() > f32::EPSILON && denominator.is_finite() {
        numerator / denominator
    } else {
        fallback
    }
}

/// Local progress of `t` inside the range `[start, start + len)`, in `[0, 1)`.
#[inline]
pub fn local_progress(t: f32, start: f32, len: f32) -> f32 {
    ratio_or(t - start, len, 0.0).clamp(0.0, 0.999_999)
}
