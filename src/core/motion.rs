//! CPU mirror of the galaxy vertex/fragment shader math
//!
//! `galaxy/shader.wgsl` implements the same formulas on the GPU; the CPU
//! fallback view uses these to draw a subsample of stars.

use glam::{Vec2, Vec3};

use super::geometry::StarVertex;

/// Angular speed numerator: stars at radius `r` turn `0.2 / r` rad per second
pub const SWIRL_RATE: f32 = 0.2;
/// Horizontal stretch applied to each branch ellipse
pub const ELLIPSE_STRETCH: f32 = 1.5;
/// Exponent of the sprite's radial falloff
pub const SPRITE_FALLOFF: f32 = 10.0;

/// Rotate `v` counter-clockwise by `theta`
#[inline]
pub fn rotate_2d(v: Vec2, theta: f32) -> Vec2 {
    let (sin, cos) = theta.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// World-space position of `star` at `time` seconds.
///
/// Stars at radius 0 stay at the center; their angular term would divide
/// by zero.
pub fn animated_position(star: &StarVertex, time: f32) -> Vec3 {
    let mut p = Vec3::from_array(star.position);
    let radius = star.radius;
    if radius > 0.0 {
        let angle = p.x.atan2(p.z);
        let swirl = angle + SWIRL_RATE * time / radius;
        let ellipse = Vec2::new(ELLIPSE_STRETCH * swirl.sin() * radius, swirl.cos() * radius);
        let tilted = rotate_2d(ellipse, star.axis_tilt);
        p.x = tilted.x;
        p.z = tilted.y;
    }
    p + Vec3::from_array(star.randomness)
}

/// Sprite diameter in pixels; shrinks with view-space depth (`view_z < 0`
/// in front of the camera)
#[inline]
pub fn point_size_px(size: f32, scale: f32, view_z: f32) -> f32 {
    size * scale * (1.0 / -view_z)
}

/// Brightness at `distance` from the sprite center (uv units, 0..~0.707)
#[inline]
pub fn sprite_strength(distance: f32) -> f32 {
    (1.0 - distance).powf(SPRITE_FALLOFF)
}
