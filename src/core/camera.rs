//! Perspective camera for viewing the galaxy

use glam::{Mat4, Vec3};

/// Camera with position, look-at target and projection parameters
#[derive(Clone, Debug, PartialEq)]
pub struct PerspectiveCamera {
    /// World position
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl PerspectiveCamera {
    /// Create a camera looking at the origin
    pub fn new(position: Vec3, fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::ZERO,
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near,
            far,
        }
    }

    /// The galaxy's default framing: 75°, slightly above and in front
    pub fn galaxy_default(aspect: f32) -> Self {
        Self::new(Vec3::new(0.0, 4.0, 4.0), 75.0, aspect, 0.1, 100.0)
    }

    /// World to camera space
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Camera to clip space (wgpu depth range 0..1)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update aspect ratio (call on window resize)
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::galaxy_default(16.0 / 9.0)
    }
}
