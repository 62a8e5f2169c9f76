//! Header bar with panel toggle and stats

use eframe::egui;
use crate::theme::colors;
use crate::time::now_seconds;
use super::GalaxyApp;

impl GalaxyApp {
    pub(crate) fn render_header(&mut self, ui: &mut egui::Ui) {
        self.fps_counter.tick();

        ui.horizontal(|ui| {
            let panel_text = if self.show_panel { "Controls >>>" } else { "Controls <<<" };

            ui.label(
                egui::RichText::new(format!("{:.0} fps", self.fps_counter.fps()))
                    .color(colors::READOUT),
            );
            ui.label(egui::RichText::new("/").color(colors::LABEL));
            ui.label(
                egui::RichText::new(format!("{} stars", self.galaxy.star_count()))
                    .color(colors::LABEL),
            );
            ui.label(egui::RichText::new("/").color(colors::LABEL));
            ui.label(
                egui::RichText::new(format!("{:.1}s", self.galaxy.driver.elapsed()))
                    .color(colors::LABEL),
            );
            if self.use_cpu {
                ui.label(egui::RichText::new("/").color(colors::LABEL));
                ui.label(egui::RichText::new("cpu").color(colors::LABEL));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(egui::RichText::new(panel_text)).clicked() {
                    self.show_panel = !self.show_panel;
                }
            });
        });
    }
}

/// FPS counter using platform-agnostic time
pub struct FpsCounter {
    frames: Vec<f64>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frames: Vec::with_capacity(60),
        }
    }

    pub fn tick(&mut self) {
        self.record(now_seconds() * 1000.0);
    }

    /// Record a frame at `now_ms`, keeping the last 60
    fn record(&mut self, now_ms: f64) {
        self.frames.push(now_ms);
        if self.frames.len() > 60 {
            self.frames.remove(0);
        }
    }

    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.frames.first(), self.frames.last()) else {
            return 0.0;
        };
        let elapsed = last - first;
        if self.frames.len() < 2 || elapsed == 0.0 {
            return 0.0;
        }
        (self.frames.len() as f64 - 1.0) / (elapsed / 1000.0)
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_needs_two_frames() {
        let mut counter = FpsCounter::new();
        assert_eq!(counter.fps(), 0.0);
        counter.record(0.0);
        assert_eq!(counter.fps(), 0.0);
    }

    #[test]
    fn fps_over_sliding_window() {
        let mut counter = FpsCounter::new();
        for i in 0..100 {
            counter.record(i as f64 * 20.0);
        }
        assert!((counter.fps() - 50.0).abs() < 1e-9);
    }
}
