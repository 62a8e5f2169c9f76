//! Scene graph holding the live point cloud
//!
//! A [`PointCloud`] owns its geometry and material. Releasing it frees the
//! CPU-side arrays and marks it so the GPU renderer drops the matching
//! vertex buffer the next time it sees a different cloud id.

use std::sync::Arc;

use tracing::debug;

use super::geometry::{PointAttributes, StarVertex};
use super::params::BlendMode;

/// Identity of one generated cloud; the renderer re-uploads when it changes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CloudId(pub u64);

/// Shader parameters shared by every star of a cloud
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Point size in physical pixels (`point_size * pixel_ratio`)
    pub size: f32,
    /// Seconds since the animation started
    pub time: f32,
    pub blend_mode: BlendMode,
}

impl Material {
    pub fn new(point_size: f32, pixel_ratio: f32, blend_mode: BlendMode) -> Self {
        Self {
            size: point_size * pixel_ratio,
            time: 0.0,
            blend_mode,
        }
    }
}

/// The drawable: geometry + material
#[derive(Debug)]
pub struct PointCloud {
    id: CloudId,
    attributes: PointAttributes,
    vertices: Arc<Vec<StarVertex>>,
    pub material: Material,
    released: bool,
}

impl PointCloud {
    pub fn new(id: CloudId, attributes: PointAttributes, material: Material) -> Self {
        let vertices = Arc::new(attributes.interleave());
        Self {
            id,
            attributes,
            vertices,
            material,
            released: false,
        }
    }

    pub fn id(&self) -> CloudId {
        self.id
    }

    pub fn attributes(&self) -> &PointAttributes {
        &self.attributes
    }

    /// Interleaved vertices, shared with in-flight paint callbacks
    pub fn vertices(&self) -> &Arc<Vec<StarVertex>> {
        &self.vertices
    }

    pub fn star_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Free geometry buffers. Safe to call more than once.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        debug!(id = self.id.0, stars = self.attributes.len(), "Releasing point cloud");
        self.attributes.clear();
        self.vertices = Arc::new(Vec::new());
        self.released = true;
    }
}

/// Drawables currently attached for rendering
#[derive(Debug, Default)]
pub struct Scene {
    clouds: Vec<PointCloud>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, cloud: PointCloud) {
        self.clouds.push(cloud);
    }

    /// Detach a cloud by id. Detaching an absent id is a no-op.
    pub fn detach(&mut self, id: CloudId) -> Option<PointCloud> {
        let pos = self.clouds.iter().position(|c| c.id == id)?;
        Some(self.clouds.remove(pos))
    }

    /// Detach the live cloud, if any
    pub fn detach_cloud(&mut self) -> Option<PointCloud> {
        self.clouds.pop()
    }

    /// The live cloud (most recently attached)
    pub fn cloud(&self) -> Option<&PointCloud> {
        self.clouds.last()
    }

    pub fn cloud_mut(&mut self) -> Option<&mut PointCloud> {
        self.clouds.last_mut()
    }

    /// Number of attached drawables
    pub fn len(&self) -> usize {
        self.clouds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clouds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloud(id: u64, stars: usize) -> PointCloud {
        PointCloud::new(
            CloudId(id),
            PointAttributes::zeroed(stars),
            Material::new(40.0, 2.0, BlendMode::Additive),
        )
    }

    #[test]
    fn material_scales_size_by_pixel_ratio() {
        let material = Material::new(40.0, 2.0, BlendMode::Additive);
        assert_eq!(material.size, 80.0);
        assert_eq!(material.time, 0.0);
    }

    #[test]
    fn release_is_idempotent() {
        let mut c = cloud(1, 100);
        assert_eq!(c.vertices().len(), 100);
        c.release();
        assert!(c.is_released());
        assert_eq!(c.star_count(), 0);
        assert!(c.vertices().is_empty());
        c.release();
        assert!(c.is_released());
    }

    #[test]
    fn detach_returns_live_cloud() {
        let mut scene = Scene::new();
        scene.attach(cloud(1, 10));
        let live = scene.detach_cloud().unwrap();
        assert_eq!(live.id(), CloudId(1));
        assert!(scene.is_empty());
        assert!(scene.detach_cloud().is_none());
    }

    #[test]
    fn detach_missing_id_is_noop() {
        let mut scene = Scene::new();
        scene.attach(cloud(1, 1));
        assert!(scene.detach(CloudId(9)).is_none());
        assert_eq!(scene.len(), 1);
        assert!(scene.detach(CloudId(1)).is_some());
        assert!(scene.is_empty());
    }
}
