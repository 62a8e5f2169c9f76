//! Per-star attribute arrays and their interleaved GPU layout

use bytemuck::{Pod, Zeroable};

/// Flat attribute arrays, one entry (or three for vectors) per star.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointAttributes {
    /// xyz, y always 0
    pub positions: Vec<f32>,
    /// rgb
    pub colors: Vec<f32>,
    pub scales: Vec<f32>,
    /// xyz scatter added after the spiral motion
    pub randomness: Vec<f32>,
    pub radii: Vec<f32>,
    pub axis_tilt: Vec<f32>,
}

impl PointAttributes {
    /// Zero-filled arrays for `count` stars
    pub fn zeroed(count: usize) -> Self {
        Self {
            positions: vec![0.0; count * 3],
            colors: vec![0.0; count * 3],
            scales: vec![0.0; count],
            randomness: vec![0.0; count * 3],
            radii: vec![0.0; count],
            axis_tilt: vec![0.0; count],
        }
    }

    /// Number of stars
    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    /// Gather star `index` into its vertex layout
    pub fn vertex(&self, index: usize) -> StarVertex {
        let i3 = index * 3;
        StarVertex {
            position: [self.positions[i3], self.positions[i3 + 1], self.positions[i3 + 2]],
            color: [self.colors[i3], self.colors[i3 + 1], self.colors[i3 + 2]],
            scale: self.scales[index],
            randomness: [
                self.randomness[i3],
                self.randomness[i3 + 1],
                self.randomness[i3 + 2],
            ],
            radius: self.radii[index],
            axis_tilt: self.axis_tilt[index],
        }
    }

    /// Interleave all arrays into one vertex buffer
    pub fn interleave(&self) -> Vec<StarVertex> {
        (0..self.len()).map(|i| self.vertex(i)).collect()
    }

    /// Drop every array and give the memory back
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// GPU-ready star instance (48 bytes), one per instanced quad.
/// Field order must match the vertex attributes in `shader.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct StarVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub scale: f32,
    pub randomness: [f32; 3],
    pub radius: f32,
    pub axis_tilt: f32,
}
