//! Parameter panel - galaxy generation controls

use eframe::egui;
use crate::core::params::{
    BRANCH_COUNT_RANGE, LERP_DISTANCE_RANGE, MU_RANGE, POINT_COUNT_RANGE, POINT_SIZE_RANGE,
    RANDOMNESS_RANGE, SIGMA_RANGE,
};
use crate::core::{BlendMode, Rgb};
use crate::theme::colors;
use super::GalaxyApp;

/// Labelled full-width slider row
fn slider<N: egui::emath::Numeric>(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut N,
    range: std::ops::RangeInclusive<N>,
    step: f64,
) -> egui::Response {
    ui.label(egui::RichText::new(label).color(colors::LABEL));
    ui.add(
        egui::Slider::new(value, range)
            .step_by(step)
            .clamping(egui::SliderClamping::Always),
    )
}

impl GalaxyApp {
    /// Returns true if any generation parameter changed this frame
    pub(crate) fn render_panel(&mut self, ctx: &egui::Context) -> bool {
        let mut changed = false;

        egui::SidePanel::right("panel")
            .default_width(280.0)
            .min_width(240.0)
            .resizable(true)
            .frame(egui::Frame::new().fill(colors::SPACE).inner_margin(8.0))
            .show(ctx, |ui| {
                let group_frame = egui::Frame::new()
                    .stroke(egui::Stroke::new(1.0, colors::EDGE))
                    .corner_radius(4.0)
                    .inner_margin(6.0);

                group_frame.show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    let mut instant = self.galaxy.params.instant_update;
                    if ui.checkbox(&mut instant, "Update instantly").changed() {
                        self.galaxy.set_instant_update(instant);
                    }
                });

                ui.add_space(8.0);

                group_frame.show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    let slider_width = ui.available_width() - 70.0;
                    ui.spacing_mut().slider_width = slider_width;
                    let params = &mut self.galaxy.params;

                    changed |= slider(ui, "Stars count", &mut params.point_count, POINT_COUNT_RANGE, 100.0)
                        .changed();
                    changed |= slider(ui, "Stars size", &mut params.point_size, POINT_SIZE_RANGE, 1.0)
                        .changed();

                    ui.label(egui::RichText::new("Blending").color(colors::LABEL));
                    egui::ComboBox::from_id_salt("blending")
                        .selected_text(params.blend_mode.label())
                        .show_ui(ui, |ui| {
                            for &mode in BlendMode::ALL {
                                changed |= ui
                                    .selectable_value(&mut params.blend_mode, mode, mode.label())
                                    .changed();
                            }
                        });

                    changed |= slider(
                        ui,
                        "Color offset",
                        &mut params.color_lerp_distance,
                        LERP_DISTANCE_RANGE,
                        0.01,
                    )
                    .changed();
                    changed |= slider(ui, "Elliptical spread", &mut params.branch_count, BRANCH_COUNT_RANGE, 1.0)
                        .changed();
                    changed |= slider(ui, "Randomness", &mut params.randomness_scale, RANDOMNESS_RANGE, 0.01)
                        .changed();
                    changed |= slider(ui, "Distribution σ", &mut params.distribution_sigma, SIGMA_RANGE, 0.001)
                        .changed();
                    changed |= slider(ui, "Distribution μ", &mut params.distribution_mu, MU_RANGE, 0.001)
                        .changed();
                });

                ui.add_space(8.0);

                group_frame.show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    let params = &mut self.galaxy.params;
                    for (label, color) in [
                        ("Center color", &mut params.inner_color),
                        ("Outside color", &mut params.outer_color),
                    ] {
                        ui.horizontal(|ui| {
                            let mut rgb = color.to_array();
                            if ui.color_edit_button_rgb(&mut rgb).changed() {
                                *color = Rgb::from_array(rgb);
                                changed = true;
                            }
                            ui.label(egui::RichText::new(label).color(colors::LABEL));
                        });
                    }
                });
            });

        changed
    }
}
