//! Galaxy view - routes to GPU or CPU path, feeds orbit input

use eframe::egui;
use glam::{Vec3, Vec4Swizzles};

use crate::core::motion::{animated_position, point_size_px, sprite_strength};
use crate::core::BlendMode;
use crate::galaxy::{GalaxyCallback, GalaxyUniforms};
use super::GalaxyApp;

/// Stars drawn per frame by the CPU path
const CPU_STAR_BUDGET: usize = 20_000;

/// Drawn dot radius as a fraction of the sprite diameter; the falloff
/// leaves little visible light beyond it
const CPU_DOT_FRACTION: f32 = 0.12;

impl GalaxyApp {
    /// Render the galaxy view.
    pub(crate) fn render_galaxy(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_size();
        let (response, painter) = ui.allocate_painter(available, egui::Sense::click_and_drag());
        let rect = response.rect;

        self.galaxy
            .resize(rect.width(), rect.height(), ui.ctx().pixels_per_point());

        if response.dragged() {
            let delta = response.drag_delta();
            self.galaxy.controls.drag(delta.x, delta.y, rect.height());
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            self.galaxy.controls.scroll(scroll);
        }
        if self.galaxy.controls.is_moving() {
            ui.ctx().request_repaint();
        }

        if self.use_cpu {
            self.paint_galaxy_cpu(&painter, rect);
        } else {
            self.paint_galaxy_gpu(&painter, rect);
        }
    }

    /// GPU path: hand the cloud and uniforms to the paint callback.
    fn paint_galaxy_gpu(&self, painter: &egui::Painter, rect: egui::Rect) {
        let Some(cloud) = self.galaxy.scene.cloud() else {
            return;
        };
        let uniforms = GalaxyUniforms::new(&self.galaxy.camera, &self.galaxy.viewport, &cloud.material);
        painter.add(egui_wgpu::Callback::new_paint_callback(
            rect,
            GalaxyCallback {
                cloud: cloud.id(),
                vertices: cloud.vertices().clone(),
                uniforms,
                blend_mode: cloud.material.blend_mode,
            },
        ));
    }

    /// CPU path (`--use-cpu`, or no wgpu adapter at startup).
    /// Animates and projects an even subsample of the stars.
    fn paint_galaxy_cpu(&self, painter: &egui::Painter, rect: egui::Rect) {
        let Some(cloud) = self.galaxy.scene.cloud() else {
            return;
        };
        let vertices = cloud.vertices();
        let material = &cloud.material;
        let view = self.galaxy.camera.view_matrix();
        let projection = self.galaxy.camera.projection_matrix();
        let step = (vertices.len() / CPU_STAR_BUDGET).max(1);
        // Material size is in physical pixels; egui paints in points
        let size_scale = material.size / self.galaxy.viewport.pixel_ratio;
        let brightness = sprite_strength(CPU_DOT_FRACTION * 0.5);
        // Premultiplied color with zero alpha adds onto the framebuffer
        let additive = material.blend_mode == BlendMode::Additive;

        for star in vertices.iter().step_by(step) {
            let world = animated_position(star, material.time);
            let view_position = view * world.extend(1.0);
            if view_position.z >= 0.0 {
                continue;
            }
            let clip = projection * view_position;
            let ndc: Vec3 = clip.xyz() / clip.w;
            if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || ndc.z.abs() > 1.0 {
                continue;
            }

            let pos = egui::pos2(
                rect.min.x + (ndc.x + 1.0) * 0.5 * rect.width(),
                rect.min.y + (1.0 - ndc.y) * 0.5 * rect.height(),
            );
            let diameter = point_size_px(size_scale, star.scale, view_position.z);
            let radius = (diameter * CPU_DOT_FRACTION).max(0.5);

            let [r, g, b] = star.color.map(|c| (c * brightness).clamp(0.0, 1.0) * 255.0);
            let alpha = if additive { 0 } else { 255 };
            painter.circle_filled(
                pos,
                radius,
                egui::Color32::from_rgba_premultiplied(r as u8, g as u8, b as u8, alpha),
            );
        }
    }
}
