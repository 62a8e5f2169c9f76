//! Night-sky theme
//!
//! Panels are the same black as the space around the galaxy, so the
//! controls sit on the sky instead of in front of it. The one warm tone
//! is the accent on active controls, taken from the galaxy's core color.

use egui::{Color32, CornerRadius, Stroke, Style, Visuals};

use crate::core::Rgb;

pub mod colors {
    use egui::Color32;

    /// Empty space; also the panel background
    pub const SPACE: Color32 = Color32::BLACK;
    /// Idle widgets and popup bodies (color picker, blending combo)
    pub const DUST: Color32 = Color32::from_rgb(14, 14, 20);
    pub const DUST_HOVER: Color32 = Color32::from_rgb(30, 30, 40);
    /// Group frames and widget outlines
    pub const EDGE: Color32 = Color32::from_rgb(44, 44, 56);

    pub const TEXT: Color32 = Color32::from_rgb(232, 232, 240);
    /// Readouts in the header
    pub const READOUT: Color32 = Color32::from_rgb(160, 160, 176);
    /// Labels and separators
    pub const LABEL: Color32 = Color32::from_rgb(96, 96, 112);
}

/// Accent color for a galaxy core color; channels outside 0..1 clamp
pub fn accent(core: Rgb) -> Color32 {
    let [r, g, b] = core.to_array().map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    Color32::from_rgb(r, g, b)
}

/// Dark visuals with `accent` on selections, slider fill and pressed widgets
pub fn galaxy_visuals(accent: Color32) -> Visuals {
    use colors::*;

    let mut visuals = Visuals::dark();
    visuals.panel_fill = SPACE;
    visuals.window_fill = DUST;
    visuals.window_stroke = Stroke::new(1.0, EDGE);
    visuals.extreme_bg_color = SPACE;
    visuals.faint_bg_color = DUST;
    visuals.override_text_color = Some(TEXT);

    let radius = CornerRadius::same(3);
    let widgets = &mut visuals.widgets;
    for (state, fill, outline, text) in [
        (&mut widgets.noninteractive, SPACE, EDGE, LABEL),
        (&mut widgets.inactive, DUST, EDGE, READOUT),
        (&mut widgets.hovered, DUST_HOVER, LABEL, TEXT),
        (&mut widgets.active, DUST_HOVER, accent, TEXT),
    ] {
        state.bg_fill = fill;
        state.weak_bg_fill = fill;
        state.bg_stroke = Stroke::new(1.0, outline);
        state.fg_stroke = Stroke::new(1.0, text);
        state.corner_radius = radius;
        state.expansion = 0.0;
    }

    visuals.selection.bg_fill = accent.gamma_multiply(0.55);
    visuals.selection.stroke = Stroke::new(1.0, accent);
    visuals.slider_trailing_fill = true;

    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;
    visuals
}

/// Full style for the viewer: galaxy visuals plus compact panel spacing
pub fn galaxy_style(core: Rgb) -> Style {
    let mut style = Style {
        visuals: galaxy_visuals(accent(core)),
        ..Style::default()
    };
    style.spacing.item_spacing = egui::vec2(6.0, 5.0);
    // Color swatches and checkboxes share the slider row height
    style.spacing.interact_size.y = 20.0;
    style.spacing.combo_width = 140.0;
    style
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accent_follows_core_color() {
        let core = Rgb::from_bytes(0xff, 0x60, 0x30);
        assert_eq!(accent(core), Color32::from_rgb(0xff, 0x60, 0x30));

        let hot = Rgb::from_array([1.7, -0.2, 0.5]);
        assert_eq!(accent(hot), Color32::from_rgb(255, 0, 128));
    }

    #[test]
    fn panels_blend_into_space() {
        let visuals = galaxy_visuals(Color32::RED);
        assert!(visuals.dark_mode);
        assert_eq!(visuals.panel_fill, colors::SPACE);
        assert_eq!(visuals.extreme_bg_color, colors::SPACE);
        assert!(visuals.slider_trailing_fill);
    }

    #[test]
    fn accent_marks_only_active_controls() {
        let visuals = galaxy_visuals(Color32::RED);
        assert_eq!(visuals.selection.stroke.color, Color32::RED);
        assert_eq!(visuals.widgets.active.bg_stroke.color, Color32::RED);
        assert_ne!(visuals.widgets.inactive.bg_stroke.color, Color32::RED);
        assert_ne!(visuals.widgets.hovered.bg_stroke.color, Color32::RED);
    }

    #[test]
    fn style_carries_galaxy_visuals() {
        let core = Rgb::from_bytes(0x1b, 0x39, 0x84);
        let style = galaxy_style(core);
        assert_eq!(style.visuals.selection.stroke.color, accent(core));
        assert_eq!(style.spacing.interact_size.y, 20.0);
    }
}
