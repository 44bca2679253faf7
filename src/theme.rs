//! Light and dark palettes
//!
//! Each theme is five fixed colours. [`Theme::apply`] pushes them into every
//! egui widget state in one go, so a theme change is visible on the next
//! paint with no transition.

use eframe::egui::{self, Color32, Margin, Stroke, Vec2};

/// The five colours a theme is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Window and panel background
    pub background: Color32,
    /// Foreground text
    pub text: Color32,
    /// Button and input fill
    pub button: Color32,
    /// Button fill under the pointer
    pub hover: Color32,
    /// Text input outline
    pub border: Color32,
}

/// Light or dark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// White background, black text
    #[default]
    Light,
    /// Charcoal background, white text
    Dark,
}

impl Theme {
    /// Theme for a `dark_mode` flag
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode { Theme::Dark } else { Theme::Light }
    }

    /// Whether this is the dark theme
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Fixed colours for this theme
    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: Color32::from_rgb(0xFF, 0xFF, 0xFF),
                text: Color32::from_rgb(0x00, 0x00, 0x00),
                button: Color32::from_rgb(0xEE, 0xEE, 0xEE),
                hover: Color32::from_rgb(0xDD, 0xDD, 0xDD),
                border: Color32::from_rgb(0xCC, 0xCC, 0xCC),
            },
            Theme::Dark => Palette {
                background: Color32::from_rgb(0x33, 0x33, 0x33),
                text: Color32::from_rgb(0xFF, 0xFF, 0xFF),
                button: Color32::from_rgb(0x55, 0x55, 0x55),
                hover: Color32::from_rgb(0x66, 0x66, 0x66),
                border: Color32::from_rgb(0x55, 0x55, 0x55),
            },
        }
    }

    /// egui visuals carrying this theme's palette
    pub fn visuals(self) -> egui::Visuals {
        let p = self.palette();
        let mut visuals = if self.is_dark() {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.override_text_color = Some(p.text);
        visuals.panel_fill = p.background;
        visuals.window_fill = p.background;
        visuals.faint_bg_color = p.background;
        // TextEdit background
        visuals.extreme_bg_color = p.button;

        let border = Stroke::new(2.0, p.border);
        for (state, fill) in [
            (&mut visuals.widgets.inactive, p.button),
            (&mut visuals.widgets.hovered, p.hover),
            (&mut visuals.widgets.active, p.hover),
            (&mut visuals.widgets.open, p.button),
        ] {
            state.bg_fill = fill;
            state.weak_bg_fill = fill;
            state.bg_stroke = border;
            state.fg_stroke.color = p.text;
        }
        visuals.widgets.noninteractive.bg_fill = p.background;
        visuals.widgets.noninteractive.weak_bg_fill = p.background;
        visuals.widgets.noninteractive.fg_stroke.color = p.text;

        visuals
    }

    /// Install this theme on the context
    pub fn apply(self, ctx: &egui::Context) {
        ctx.set_visuals(self.visuals());
        ctx.style_mut(|style| {
            style.spacing.button_padding = Vec2::new(15.0, 10.0);
            style.spacing.item_spacing = Vec2::new(5.0, 5.0);
            style.spacing.window_margin = Margin::same(5.0);
        });
        tracing::debug!(theme = ?self, "Applied theme");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_mode_mapping() {
        assert_eq!(Theme::from_dark_mode(true), Theme::Dark);
        assert_eq!(Theme::from_dark_mode(false), Theme::Light);
        assert!(Theme::Dark.is_dark());
    }

    #[test]
    fn test_visuals_carry_palette() {
        for theme in [Theme::Light, Theme::Dark] {
            let p = theme.palette();
            let v = theme.visuals();
            assert_eq!(v.panel_fill, p.background);
            assert_eq!(v.window_fill, p.background);
            assert_eq!(v.override_text_color, Some(p.text));
            assert_eq!(v.extreme_bg_color, p.button);
            assert_eq!(v.widgets.inactive.weak_bg_fill, p.button);
            assert_eq!(v.widgets.hovered.weak_bg_fill, p.hover);
            assert_eq!(v.widgets.inactive.bg_stroke.color, p.border);
            assert_eq!(v.widgets.inactive.fg_stroke.color, p.text);
        }
    }

    #[test]
    fn test_palettes_differ() {
        let light = Theme::Light.palette();
        let dark = Theme::Dark.palette();
        assert_eq!(light.background, Color32::WHITE);
        assert_eq!(dark.text, Color32::WHITE);
        assert_ne!(light.button, dark.button);
    }

    #[test]
    fn test_apply_switches_context_instantly() {
        let ctx = egui::Context::default();
        Theme::Dark.apply(&ctx);
        assert_eq!(ctx.style().visuals.panel_fill, Theme::Dark.palette().background);
        Theme::Light.apply(&ctx);
        assert_eq!(ctx.style().visuals.panel_fill, Theme::Light.palette().background);
    }
}
