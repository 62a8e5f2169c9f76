//! GPU renderer for the galaxy point cloud
//!
//! Draws every star as an instanced quad directly into egui's render pass
//! via CallbackTrait. The vertex buffer is tied to a [`CloudId`]: when a
//! callback arrives for a different cloud, the old buffer is destroyed and
//! the new vertices are uploaded once. After that only the uniforms move.

use egui_wgpu::wgpu::{self, util::DeviceExt};
use std::sync::Arc;
use tracing::debug;

use bytemuck::{Pod, Zeroable};

use crate::core::{BlendMode, CloudId, Material, PerspectiveCamera, StarVertex, Viewport};

/// Vertices per star quad (two triangles)
const VERTICES_PER_STAR: u32 = 6;

const STAR_ATTRIBUTES: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
    0 => Float32x3, // position
    1 => Float32x3, // color
    2 => Float32,   // scale
    3 => Float32x3, // randomness
    4 => Float32,   // radius
    5 => Float32,   // axis_tilt
];

/// Uniform buffer layout for the shader
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GalaxyUniforms {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub viewport: [f32; 2],
    pub size: f32,
    pub time: f32,
}

impl GalaxyUniforms {
    pub fn new(camera: &PerspectiveCamera, viewport: &Viewport, material: &Material) -> Self {
        Self {
            view: camera.view_matrix().to_cols_array_2d(),
            projection: camera.projection_matrix().to_cols_array_2d(),
            viewport: viewport.physical_size(),
            size: material.size,
            time: material.time,
        }
    }
}

impl Default for GalaxyUniforms {
    fn default() -> Self {
        Self::new(
            &PerspectiveCamera::default(),
            &Viewport::default(),
            &Material::new(40.0, 1.0, BlendMode::default()),
        )
    }
}

/// Color blend state for a blend mode. Alpha output is always 1, so
/// the factors work on color alone.
pub fn blend_state(mode: BlendMode) -> Option<wgpu::BlendState> {
    let color = |src_factor, dst_factor| wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor,
            dst_factor,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
    };
    match mode {
        BlendMode::None => None,
        BlendMode::Normal => Some(wgpu::BlendState::ALPHA_BLENDING),
        BlendMode::Additive => Some(color(wgpu::BlendFactor::SrcAlpha, wgpu::BlendFactor::One)),
        BlendMode::Subtractive => {
            Some(color(wgpu::BlendFactor::Zero, wgpu::BlendFactor::OneMinusSrc))
        }
        BlendMode::Multiply => Some(color(wgpu::BlendFactor::Zero, wgpu::BlendFactor::Src)),
    }
}

/// Uploaded vertices of one cloud
struct StarBuffer {
    cloud: CloudId,
    buffer: wgpu::Buffer,
    count: u32,
}

/// GPU renderer for the galaxy.
/// Renders directly into egui's render pass (no intermediate texture).
pub struct GalaxyRenderer {
    /// One pipeline per blend mode, indexed by `BlendMode::index`
    pipelines: Vec<wgpu::RenderPipeline>,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    stars: Option<StarBuffer>,
    blend_mode: BlendMode,
}

impl GalaxyRenderer {
    pub fn new(device: &wgpu::Device, target_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("galaxy_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("galaxy_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("galaxy_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipelines = BlendMode::ALL
            .iter()
            .map(|&mode| {
                device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: Some(&format!("galaxy_pipeline_{}", mode.label())),
                    layout: Some(&pipeline_layout),
                    vertex: wgpu::VertexState {
                        module: &shader,
                        entry_point: Some("vs_main"),
                        buffers: &[wgpu::VertexBufferLayout {
                            array_stride: std::mem::size_of::<StarVertex>() as wgpu::BufferAddress,
                            step_mode: wgpu::VertexStepMode::Instance,
                            attributes: &STAR_ATTRIBUTES,
                        }],
                        compilation_options: Default::default(),
                    },
                    fragment: Some(wgpu::FragmentState {
                        module: &shader,
                        entry_point: Some("fs_main"),
                        targets: &[Some(wgpu::ColorTargetState {
                            format: target_format,
                            blend: blend_state(mode),
                            write_mask: wgpu::ColorWrites::ALL,
                        })],
                        compilation_options: Default::default(),
                    }),
                    // TriangleList quads: PointList is fixed at 1px and cannot carry
                    // the perspective point size.
                    primitive: wgpu::PrimitiveState {
                        topology: wgpu::PrimitiveTopology::TriangleList,
                        ..Default::default()
                    },
                    // Stars never occlude each other
                    depth_stencil: None,
                    multisample: wgpu::MultisampleState::default(),
                    multiview: None,
                    cache: None,
                })
            })
            .collect();

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("galaxy_uniforms"),
            contents: bytemuck::bytes_of(&GalaxyUniforms::default()),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::UNIFORM,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("galaxy_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            pipelines,
            bind_group,
            uniform_buffer,
            stars: None,
            blend_mode: BlendMode::default(),
        }
    }

    /// Make `cloud` the uploaded cloud, releasing the previous buffer
    pub fn upload_cloud(&mut self, device: &wgpu::Device, cloud: CloudId, vertices: &[StarVertex]) {
        if self.stars.as_ref().is_some_and(|s| s.cloud == cloud) {
            return;
        }

        if let Some(old) = self.stars.take() {
            old.buffer.destroy();
            debug!(cloud = old.cloud.0, "Released star buffer");
        }

        if vertices.is_empty() {
            return;
        }

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("galaxy_stars_{}", cloud.0)),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        debug!(cloud = cloud.0, stars = vertices.len(), "Uploaded star buffer");

        self.stars = Some(StarBuffer {
            cloud,
            buffer,
            count: vertices.len() as u32,
        });
    }

    pub fn upload_uniforms(&mut self, queue: &wgpu::Queue, uniforms: &GalaxyUniforms, blend_mode: BlendMode) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
        self.blend_mode = blend_mode;
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipelines[self.blend_mode.index()]
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Uploaded vertex buffer and its star count
    fn star_buffer(&self) -> Option<(&wgpu::Buffer, u32)> {
        self.stars.as_ref().map(|s| (&s.buffer, s.count))
    }
}

/// Callback for egui integration
pub struct GalaxyCallback {
    pub cloud: CloudId,
    /// Shared with the CPU-side cloud; only read when `cloud` is new
    pub vertices: Arc<Vec<StarVertex>>,
    pub uniforms: GalaxyUniforms,
    pub blend_mode: BlendMode,
}

impl egui_wgpu::CallbackTrait for GalaxyCallback {
    fn prepare(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        _screen_descriptor: &egui_wgpu::ScreenDescriptor,
        _encoder: &mut wgpu::CommandEncoder,
        callback_resources: &mut egui_wgpu::CallbackResources,
    ) -> Vec<wgpu::CommandBuffer> {
        let Some(renderer) = callback_resources.get_mut::<GalaxyRenderer>() else {
            return vec![];
        };

        renderer.upload_cloud(device, self.cloud, &self.vertices);
        renderer.upload_uniforms(queue, &self.uniforms, self.blend_mode);
        vec![]
    }

    fn paint(
        &self,
        _info: egui::PaintCallbackInfo,
        render_pass: &mut wgpu::RenderPass<'static>,
        callback_resources: &egui_wgpu::CallbackResources,
    ) {
        let Some(renderer) = callback_resources.get::<GalaxyRenderer>() else {
            return;
        };
        let Some((buffer, count)) = renderer.star_buffer() else {
            return;
        };

        render_pass.set_pipeline(renderer.pipeline());
        render_pass.set_bind_group(0, renderer.bind_group(), &[]);
        render_pass.set_vertex_buffer(0, buffer.slice(..));
        render_pass.draw(0..VERTICES_PER_STAR, 0..count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniforms_match_shader_layout() {
        assert_eq!(std::mem::size_of::<GalaxyUniforms>(), 144);
        assert_eq!(std::mem::size_of::<GalaxyUniforms>() % 16, 0);
    }

    #[test]
    fn star_attributes_cover_vertex() {
        let last = STAR_ATTRIBUTES[5];
        assert_eq!(last.offset + 4, std::mem::size_of::<StarVertex>() as u64);
        assert_eq!(STAR_ATTRIBUTES[3].offset, 28);
    }

    #[test]
    fn pipeline_fits_webgl2_limits() {
        let limits = wgpu::Limits::downlevel_webgl2_defaults();
        assert!(STAR_ATTRIBUTES.len() as u32 <= limits.max_vertex_attributes);
        assert!(std::mem::size_of::<StarVertex>() as u32 <= limits.max_vertex_buffer_array_stride);
        assert!(
            std::mem::size_of::<GalaxyUniforms>() as u32 <= limits.max_uniform_buffer_binding_size
        );

        // Largest cloud the panel can ask for
        let largest = *crate::core::params::POINT_COUNT_RANGE.end() as u64
            * std::mem::size_of::<StarVertex>() as u64;
        assert!(largest <= limits.max_buffer_size);
    }

    #[test]
    fn blend_modes_map_to_distinct_states() {
        assert!(blend_state(BlendMode::None).is_none());
        assert_eq!(blend_state(BlendMode::Normal), Some(wgpu::BlendState::ALPHA_BLENDING));

        let additive = blend_state(BlendMode::Additive).unwrap();
        assert_eq!(additive.color.dst_factor, wgpu::BlendFactor::One);

        let subtractive = blend_state(BlendMode::Subtractive).unwrap();
        assert_eq!(subtractive.color.src_factor, wgpu::BlendFactor::Zero);
        assert_eq!(subtractive.color.dst_factor, wgpu::BlendFactor::OneMinusSrc);

        let multiply = blend_state(BlendMode::Multiply).unwrap();
        assert_eq!(multiply.color.dst_factor, wgpu::BlendFactor::Src);
    }

    #[test]
    fn uniforms_carry_material_and_surface() {
        let material = Material { size: 80.0, time: 3.0, blend_mode: BlendMode::Additive };
        let uniforms = GalaxyUniforms::new(
            &PerspectiveCamera::galaxy_default(2.0),
            &Viewport::new(400.0, 200.0, 2.0),
            &material,
        );
        assert_eq!(uniforms.viewport, [800.0, 400.0]);
        assert_eq!(uniforms.size, 80.0);
        assert_eq!(uniforms.time, 3.0);
    }
}
