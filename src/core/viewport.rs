//! Output surface size and pixel ratio

/// Pixel ratio cap; higher densities cost fill rate for no visible gain
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Logical size of the drawing surface plus its (clamped) pixel ratio
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: clamp_pixel_ratio(device_pixel_ratio),
        }
    }

    /// Apply a new size; returns true if anything changed
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) -> bool {
        let next = Self::new(width, height, device_pixel_ratio);
        if next == *self {
            return false;
        }
        *self = next;
        true
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Size in physical pixels
    pub fn physical_size(&self) -> [f32; 2] {
        [self.width * self.pixel_ratio, self.height * self.pixel_ratio]
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0, 1.0)
    }
}

/// `min(device_pixel_ratio, 2)`, falling back to 1 for nonsense input
pub fn clamp_pixel_ratio(device_pixel_ratio: f32) -> f32 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_is_capped_at_two() {
        assert_eq!(clamp_pixel_ratio(1.0), 1.0);
        assert_eq!(clamp_pixel_ratio(1.5), 1.5);
        assert_eq!(clamp_pixel_ratio(3.0), 2.0);
        assert_eq!(clamp_pixel_ratio(0.0), 1.0);
        assert_eq!(clamp_pixel_ratio(f32::NAN), 1.0);
    }

    #[test]
    fn resize_reports_changes() {
        let mut viewport = Viewport::new(800.0, 600.0, 1.0);
        assert!(!viewport.resize(800.0, 600.0, 1.0));
        assert!(viewport.resize(1024.0, 768.0, 3.0));
        assert_eq!(viewport.pixel_ratio, 2.0);
        assert_eq!(viewport.physical_size(), [2048.0, 1536.0]);
        assert!((viewport.aspect() - 4.0 / 3.0).abs() < 1e-6);
    }
}
