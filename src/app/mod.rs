//! Galaxy app
//!
//! This module contains the egui app that runs on both native and WASM platforms.

mod header;
mod panel;
mod view;

use eframe::egui;
use tracing::{info, warn};

use crate::core::{GalaxyConfig, GalaxyContext, Viewport};
use crate::galaxy::GalaxyRenderer;
use crate::theme::{colors, galaxy_style};
use crate::time::now_seconds;

/// Galaxy app - runs on both native and WASM
pub struct GalaxyApp {
    /// Params, scene, camera and animation state
    pub(crate) galaxy: GalaxyContext,
    /// FPS counter
    pub(crate) fps_counter: header::FpsCounter,
    /// Parameter panel visibility (closed on start)
    pub(crate) show_panel: bool,
    /// Use CPU rendering (--use-cpu on native, fallback if no wgpu)
    pub(crate) use_cpu: bool,
}

impl GalaxyApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: GalaxyConfig, use_cpu: bool) -> Self {
        cc.egui_ctx.set_style(galaxy_style(config.params.inner_color));

        // Register GPU renderer unless CPU mode requested
        let use_cpu = if use_cpu {
            true
        } else if let Some(render_state) = cc.wgpu_render_state.as_ref() {
            let renderer = GalaxyRenderer::new(&render_state.device, render_state.target_format);
            render_state
                .renderer
                .write()
                .callback_resources
                .insert(renderer);
            false
        } else {
            warn!("wgpu unavailable, falling back to CPU rendering");
            true
        };

        let screen = cc.egui_ctx.screen_rect();
        let viewport = Viewport::new(
            screen.width(),
            screen.height(),
            cc.egui_ctx.pixels_per_point(),
        );
        let mut galaxy = GalaxyContext::new(config, viewport);
        galaxy.driver.start(now_seconds());

        info!(
            use_cpu,
            stars = galaxy.star_count(),
            pixel_ratio = galaxy.viewport.pixel_ratio,
            "Galaxy app started"
        );

        Self {
            galaxy,
            fps_counter: header::FpsCounter::new(),
            show_panel: false,
            use_cpu,
        }
    }
}

impl eframe::App for GalaxyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Reschedule only while the driver is running
        if self.galaxy.tick(now_seconds()).is_some() {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::new().fill(colors::SPACE).inner_margin(4.0))
            .show(ctx, |ui| {
                self.render_header(ui);
            });

        // Parameter panel (right, must be shown before CentralPanel)
        let changed = self.show_panel && self.render_panel(ctx);
        // Edits finish on the first frame with no pointer held and no text field focused
        let settled = !ctx.input(|i| i.pointer.any_down()) && !ctx.wants_keyboard_input();
        self.galaxy.observe_panel(changed, settled);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(colors::SPACE))
            .show(ctx, |ui| {
                self.render_galaxy(ui);
            });
    }

    fn on_exit(&mut self) {
        self.galaxy.driver.stop();
    }
}
