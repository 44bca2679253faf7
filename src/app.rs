//! Main window: frameless QR generator

use crate::config::QrgenConfig;
use crate::drag::WindowDrag;
use crate::error::Error;
use crate::generator::QrGenerator;
use crate::theme::Theme;
use crate::toggle::ToggleSwitch;
use eframe::egui::{
    self, Color32, ColorImage, Id, PointerButton, Pos2, Rect, Sense, TextureHandle, Vec2,
};
use image::DynamicImage;
use std::path::PathBuf;

/// Window title (only visible in task switchers, the window has no title bar)
pub const WINDOW_TITLE: &str = "QR Code Generator";

/// eframe application state
pub struct QrGeneratorApp {
    generator: QrGenerator,
    switch: ToggleSwitch,
    drag: WindowDrag,
    text: String,
    preview_size: f32,
    texture: Option<TextureHandle>,
    status: Option<String>,
    /// Rects of the widgets laid out this frame that own their own presses
    controls: Vec<Rect>,
}

impl QrGeneratorApp {
    /// Build the window state and install the starting theme
    pub fn new(cc: &eframe::CreationContext<'_>, config: &QrgenConfig) -> Self {
        Self::with_context(&cc.egui_ctx, config)
    }

    /// Same as [`new`](Self::new) for callers that only hold an egui context
    pub fn with_context(ctx: &egui::Context, config: &QrgenConfig) -> Self {
        // The palette is ours; don't let the OS theme swap styles underneath it.
        ctx.options_mut(|o| o.theme_preference = egui::ThemePreference::Light);

        let switch = ToggleSwitch::with_checked(config.window.dark_mode);
        Theme::from_dark_mode(switch.is_checked()).apply(ctx);

        Self {
            generator: QrGenerator::from_config(config),
            switch,
            drag: WindowDrag::new(),
            text: String::new(),
            preview_size: config.window.preview_size as f32,
            texture: None,
            status: None,
            controls: Vec::new(),
        }
    }

    fn dark_mode(&self) -> bool {
        self.switch.is_checked()
    }

    fn on_generate(&mut self, ctx: &egui::Context) {
        let dark_mode = self.dark_mode();
        match self.generator.generate(&self.text, dark_mode) {
            Ok(image) => {
                let color_image = to_color_image(image);
                match self.texture.as_mut() {
                    Some(texture) => texture.set(color_image, egui::TextureOptions::LINEAR),
                    None => {
                        self.texture = Some(ctx.load_texture(
                            "qr-preview",
                            color_image,
                            egui::TextureOptions::LINEAR,
                        ))
                    }
                }
                self.status = None;
            }
            Err(err) => {
                tracing::error!("QR generation failed: {err}");
                self.status = Some(err.to_string());
            }
        }
    }

    fn on_save(&mut self) {
        if self.generator.displayed().is_none() {
            tracing::warn!("{}", Error::NothingToSave);
            return;
        }

        let Some(path) = save_dialog() else {
            tracing::debug!("Save cancelled");
            return;
        };
        if let Err(err) = self.generator.save(&path) {
            tracing::error!(path = %path.display(), "Saving QR code failed: {err}");
        }
    }

    fn on_theme_toggled(&self, ctx: &egui::Context) {
        let theme = Theme::from_dark_mode(self.dark_mode());
        tracing::info!(?theme, "Theme switched");
        theme.apply(ctx);
    }

    fn control(&mut self, response: egui::Response) -> egui::Response {
        self.controls.push(response.rect);
        response
    }

    /// Frameless window drag on the bare panel surface.
    ///
    /// `surface` must be interacted before the child widgets so it sits
    /// beneath them. A drag only starts when the press landed outside every
    /// rect in `controls`.
    fn drag_window(&mut self, ctx: &egui::Context, surface: &egui::Response) {
        if surface.drag_stopped() {
            self.drag.end();
            return;
        }

        let Some(origin) = ctx.input(|i| i.viewport().outer_rect).map(|r| r.min) else {
            return;
        };
        let global = |local: Pos2| origin + local.to_vec2();

        if surface.drag_started_by(PointerButton::Primary) {
            let press = ctx.input(|i| i.pointer.press_origin());
            if let Some(press) = press.filter(|p| !self.controls.iter().any(|r| r.contains(*p))) {
                self.drag.begin(global(press), origin);
            }
        }

        if surface.dragged_by(PointerButton::Primary) {
            if let Some(new_origin) = surface
                .interact_pointer_pos()
                .and_then(|p| self.drag.update(global(p)))
            {
                ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(new_origin));
            }
        }
    }

    fn title_row(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let switch = self.switch.ui(ui);
            if self.control(switch).changed() {
                self.on_theme_toggled(ui.ctx());
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let close = ui.button("✖");
                if self.control(close).clicked() {
                    tracing::info!("Close requested");
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
        });
    }

    fn preview(&self, ui: &mut egui::Ui) {
        let size = Vec2::splat(self.preview_size);
        ui.vertical_centered(|ui| match &self.texture {
            Some(texture) => {
                let fitted = fit_within(texture.size_vec2(), size);
                let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
                let image_rect = egui::Rect::from_center_size(rect.center(), fitted);
                egui::Image::new((texture.id(), fitted)).paint_at(ui, image_rect);
            }
            None => {
                ui.allocate_exact_size(size, Sense::hover());
            }
        });
    }

    /// Lay out and run one frame of the window
    pub fn show(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.controls.clear();
            let surface = ui.interact(ui.max_rect(), Id::new("window-drag"), Sense::drag());

            self.title_row(ui);

            let input = ui.add(
                egui::TextEdit::singleline(&mut self.text)
                    .hint_text("Enter text or URL here...")
                    .desired_width(f32::INFINITY)
                    .margin(Vec2::new(10.0, 10.0)),
            );
            self.control(input);

            self.preview(ui);

            ui.horizontal(|ui| {
                let generate = ui.button("Generate QR");
                if self.control(generate).clicked() {
                    self.on_generate(ui.ctx());
                }
                let save = ui.button("Save QR");
                if self.control(save).clicked() {
                    self.on_save();
                }
            });

            if let Some(status) = &self.status {
                ui.colored_label(Color32::from_rgb(0xD0, 0x30, 0x30), status);
            }

            self.drag_window(ui.ctx(), &surface);
        });
    }
}

impl eframe::App for QrGeneratorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

/// Save prompt filters. No catch-all entry: some backends turn `*` into
/// `*.*`, which would hide files without an extension.
const SAVE_FILTERS: &[(&str, &[&str])] = &[("PNG Files", &["png"])];

fn save_dialog() -> Option<PathBuf> {
    SAVE_FILTERS
        .iter()
        .fold(rfd::FileDialog::new().set_title("Save Image"), |dialog, (name, exts)| {
            dialog.add_filter(*name, *exts)
        })
        .save_file()
}

fn to_color_image(image: &DynamicImage) -> ColorImage {
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    ColorImage::from_rgba_unmultiplied(size, rgba.as_raw())
}

/// Largest size with `content`'s aspect ratio that fits in `bounds`
fn fit_within(content: Vec2, bounds: Vec2) -> Vec2 {
    if content.x <= 0.0 || content.y <= 0.0 {
        return Vec2::ZERO;
    }
    let scale = (bounds.x / content.x).min(bounds.y / content.y);
    content * scale
}
