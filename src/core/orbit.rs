//! Damped orbit controls
//!
//! Drag rotates the camera around its target on a sphere, scroll dollies
//! in and out. Input accumulates into pending deltas; [`OrbitControls::update`]
//! applies a `damping` fraction of them each frame and decays the rest.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::camera::PerspectiveCamera;

/// Keeps the polar angle off the poles so `look_at` stays well defined
const POLAR_EPSILON: f32 = 1e-3;

/// Deltas below this are considered settled
const SETTLE_THRESHOLD: f32 = 1e-6;

#[derive(Clone, Debug)]
pub struct OrbitControls {
    /// Fraction of the pending motion applied per update
    pub damping: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Pending azimuth change (radians)
    theta_delta: f32,
    /// Pending polar change (radians)
    phi_delta: f32,
    /// Pending distance multiplier
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            damping: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.5,
            max_distance: 50.0,
            theta_delta: 0.0,
            phi_delta: 0.0,
            scale: 1.0,
        }
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer drag by `(dx, dy)` pixels on a view `viewport_height` tall.
    /// A drag across the full height turns one full revolution.
    pub fn drag(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.theta_delta -= TAU * dx / viewport_height * self.rotate_speed;
        self.phi_delta -= TAU * dy / viewport_height * self.rotate_speed;
    }

    /// Scroll by `delta` (positive = towards the target)
    pub fn scroll(&mut self, delta: f32) {
        if delta == 0.0 {
            return;
        }
        let step = 0.95f32.powf(self.zoom_speed * delta.abs() / 50.0);
        if delta > 0.0 {
            self.scale *= step;
        } else {
            self.scale /= step;
        }
        self.scale = self.scale.clamp(0.01, 100.0);
    }

    /// True while there is motion left to apply
    pub fn is_moving(&self) -> bool {
        self.theta_delta.abs() > SETTLE_THRESHOLD
            || self.phi_delta.abs() > SETTLE_THRESHOLD
            || (self.scale - 1.0).abs() > SETTLE_THRESHOLD
    }

    /// Advance one damping step and move `camera`
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        let offset = camera.position - camera.target;
        let mut radius = offset.length();
        if radius <= 0.0 {
            return;
        }
        // Spherical coordinates around +Y
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta += self.theta_delta * self.damping;
        phi += self.phi_delta * self.damping;
        phi = phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        let zoom = 1.0 + (self.scale - 1.0) * self.damping;
        radius = (radius * zoom).clamp(self.min_distance, self.max_distance);

        let sin_phi = phi.sin();
        camera.position = camera.target
            + Vec3::new(
                radius * sin_phi * theta.sin(),
                radius * phi.cos(),
                radius * sin_phi * theta.cos(),
            );

        self.theta_delta *= 1.0 - self.damping;
        self.phi_delta *= 1.0 - self.damping;
        self.scale = 1.0 + (self.scale - 1.0) * (1.0 - self.damping);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_update_keeps_camera_in_place() {
        let mut controls = OrbitControls::new();
        let mut camera = PerspectiveCamera::galaxy_default(1.0);
        let before = camera.position;
        controls.update(&mut camera);
        assert!((camera.position - before).length() < 1e-5);
        assert!(!controls.is_moving());
    }

    #[test]
    fn drag_orbits_at_constant_distance_and_settles() {
        let mut controls = OrbitControls::new();
        let mut camera = PerspectiveCamera::galaxy_default(1.0);
        let distance = camera.position.length();

        controls.drag(100.0, 0.0, 800.0);
        assert!(controls.is_moving());
        for _ in 0..1_000 {
            controls.update(&mut camera);
            assert!((camera.position.length() - distance).abs() < 1e-3);
        }
        assert!(!controls.is_moving());

        // Total applied azimuth approaches the full drag amount
        let theta = camera.position.x.atan2(camera.position.z);
        let expected = -TAU * 100.0 / 800.0;
        assert!((theta - expected).abs() < 1e-3, "theta {}", theta);
    }

    #[test]
    fn polar_angle_never_crosses_the_pole() {
        let mut controls = OrbitControls::new();
        let mut camera = PerspectiveCamera::galaxy_default(1.0);
        controls.drag(0.0, 10_000.0, 100.0);
        for _ in 0..200 {
            controls.update(&mut camera);
            let offset = camera.position - camera.target;
            let phi = (offset.y / offset.length()).acos();
            assert!(phi > 0.0 && phi < PI);
            assert!(offset.x.is_finite() && offset.y.is_finite() && offset.z.is_finite());
        }
    }

    #[test]
    fn scroll_dollies_within_limits() {
        let mut controls = OrbitControls::new();
        let mut camera = PerspectiveCamera::galaxy_default(1.0);
        let start = camera.position.length();

        controls.scroll(200.0);
        for _ in 0..500 {
            controls.update(&mut camera);
        }
        assert!(camera.position.length() < start);

        for _ in 0..100 {
            controls.scroll(-5_000.0);
            controls.update(&mut camera);
        }
        assert!(camera.position.length() <= controls.max_distance + 1e-3);
    }
}
