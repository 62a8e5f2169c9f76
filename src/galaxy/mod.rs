//! Galaxy point cloud rendering on the GPU

mod renderer;

pub use renderer::{GalaxyCallback, GalaxyRenderer, GalaxyUniforms};
