//! Pure computation helpers extracted for testability.
//!
//! All functions in this module are free of Bevy ECS dependencies and operate
//! on plain numeric / `Vec3` inputs, making them straightforward to unit-test.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::Vec3;

/// Blend factor for frame-rate independent exponential smoothing.
///
/// Returns `1 - e^(-rate * dt)`, which is always in `[0, 1)` for finite
/// non-negative inputs. A zero or negative `dt` yields `0.0` (no movement).
///
/// For small `rate * dt` this is approximately `rate * dt`, the classic
/// `lerp(current, target, dt * rate)` easing, but it never overshoots on a
/// long frame.
pub fn damp_factor(rate: f32, dt: f32) -> f32 {
    let x = (rate * dt).max(0.0);
    if !x.is_finite() {
        return 1.0;
    }
    1.0 - (-x).exp()
}

/// Exponentially smooths `current` toward `target`.
pub fn damp(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * damp_factor(rate, dt)
}

/// Exponentially smooths a vector toward `target`.
pub fn damp_vec3(current: Vec3, target: Vec3, rate: f32, dt: f32) -> Vec3 {
    current.lerp(target, damp_factor(rate, dt))
}

/// Maps a noise value from the standard `[-1, 1]` range into `[min, max]`.
///
/// Noise generators (e.g. `Perlin`) produce values centred around zero.
/// This linearly rescales to an arbitrary output range.
///
/// # Examples
/// ```
/// # use sky_journey::math::map_noise_to_range;
/// assert_eq!(map_noise_to_range(-1.0, 0.0, 10.0), 0.0);
/// assert_eq!(map_noise_to_range( 1.0, 0.0, 10.0), 10.0);
/// assert_eq!(map_noise_to_range( 0.0, 2.0, 6.0),  4.0);
/// ```
pub fn map_noise_to_range(noise_val: f64, min: f32, max: f32) -> f32 {
    min + ((noise_val as f32 + 1.0) / 2.0) * (max - min)
}

/// Quadratic ease-out curve: `1 - (1 - t)^2`.
///
/// The default ease of tweened clips and timeline segments. `t` is clamped
/// to `[0, 1]`.
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Computes the face normal of a triangle defined by three vertices.
///
/// Uses the cross product of edges `(v1 - v0)` and `(v2 - v0)`.
/// Returns `Vec3::ZERO` if the triangle is degenerate (collinear points).
pub fn compute_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    edge1.cross(edge2).normalize_or_zero()
}

/// Unclamped bank angle in degrees for a tangent expressed in the flight frame.
///
/// The flight frame looks down `-Z`, so a straight tangent `(0, 0, -1)` gives
/// zero. The horizontal heading is measured with `atan2(-z, x)` and shifted by
/// a quarter turn, then multiplied by `exaggeration`.
pub fn raw_bank_degrees(local_tangent: Vec3, exaggeration: f32) -> f32 {
    let heading = (-local_tangent.z).atan2(local_tangent.x);
    (heading - FRAC_PI_2).to_degrees() * exaggeration
}

/// Bank angle in radians, clamped to `±max_degrees`.
///
/// The sign always matches [`raw_bank_degrees`].
pub fn bank_angle(local_tangent: Vec3, exaggeration: f32, max_degrees: f32) -> f32 {
    raw_bank_degrees(local_tangent, exaggeration)
        .clamp(-max_degrees, max_degrees)
        .to_radians()
}
