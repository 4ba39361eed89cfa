//! The application shell.
//!
//! One window: the image on top, a fixed control row at the bottom. Every
//! handler runs inline on the event thread, including the blocking external
//! editor wait and the blocking photo fetch; the window does not repaint
//! until they return.

use eframe::CreationContext;
use egui::{Color32, Context, TextureHandle, Ui};
use image::Rgb;
use tracing::{error, info, warn};

use retouch_core::io;
use retouch_core::{
    DuotoneLut, EditSession, FilterSettings, SelectionRect, ToolMode, ViewTransform,
};

use crate::canvas::{upload_texture, ImageCanvas};
use crate::editor::{self, EDITOR_NAME};
use crate::stock;

/// Display bounds assumed when the environment reports no monitor size.
const FALLBACK_SCREEN: (u32, u32) = (1920, 1080);

/// Extensions offered by the open dialog; matches the enabled decoders.
const OPEN_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp", "tif", "tiff"];

pub struct RetouchApp {
    session: Option<EditSession>,
    canvas: ImageCanvas,
    /// GPU copy of the working image; `None` marks it stale, and the next
    /// frame re-uploads from the session.
    texture: Option<TextureHandle>,
    tool: ToolMode,
    /// Slider model. Pushed into the session on change, reset on load.
    settings: FilterSettings,
    rotate_dialog: Option<RotateDialog>,
    palette_dialog: Option<PaletteDialog>,
    fetch_dialog: Option<FetchDialog>,
    status: String,
}

struct RotateDialog {
    angle: f64,
}

struct PaletteDialog {
    color: Color32,
}

struct FetchDialog {
    query: String,
}

impl RetouchApp {
    pub fn new(_cc: &CreationContext<'_>) -> Self {
        Self {
            session: None,
            canvas: ImageCanvas::default(),
            texture: None,
            tool: ToolMode::Idle,
            settings: FilterSettings::default(),
            rotate_dialog: None,
            palette_dialog: None,
            fetch_dialog: None,
            status: "Load an image to begin".to_string(),
        }
    }

    fn controls_ui(&mut self, ui: &mut Ui) {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.button("Load Image").clicked() {
                self.load_image(ui.ctx());
            }
            if ui.button("Save Image").clicked() {
                self.save_image();
            }
            if ui.button("Crop Image").clicked() {
                self.arm_tool(ToolMode::Crop);
            }
            if ui.button("Rotate Image").clicked() {
                self.open_rotate_dialog();
            }
            if ui.button("Resize Image").clicked() {
                self.arm_tool(ToolMode::Resize);
            }
            if ui.button(format!("Edit in {EDITOR_NAME}")).clicked() {
                self.edit_externally();
            }
            if ui.button("Apply Color Palette").clicked() {
                self.open_palette_dialog();
            }
            if ui.button("Just find photos").clicked() {
                self.open_fetch_dialog();
            }
        });
        self.sliders_ui(ui);
        ui.separator();
        ui.label(&self.status);
        ui.add_space(4.0);
    }

    fn sliders_ui(&mut self, ui: &mut Ui) {
        let mut changed = false;
        ui.horizontal(|ui| {
            changed |= ui
                .add(
                    egui::Slider::new(
                        &mut self.settings.brightness,
                        FilterSettings::FACTOR_MIN..=FilterSettings::FACTOR_MAX,
                    )
                    .text("Brightness"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(
                        &mut self.settings.contrast,
                        FilterSettings::FACTOR_MIN..=FilterSettings::FACTOR_MAX,
                    )
                    .text("Contrast"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(
                        &mut self.settings.saturation,
                        FilterSettings::FACTOR_MIN..=FilterSettings::FACTOR_MAX,
                    )
                    .text("Saturation"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut self.settings.blur, 0.0..=FilterSettings::BLUR_MAX)
                        .text("Blur"),
                )
                .changed();
        });

        // Without a session the sliders move but drive nothing, like
        // before the first load
        if changed {
            if let Some(session) = &mut self.session {
                session.set_filters(self.settings);
                self.settings = session.settings();
                self.texture = None;
            }
        }
    }

    fn canvas_ui(&mut self, ui: &mut Ui) {
        let Some(session) = &self.session else {
            ui.centered_and_justified(|ui| {
                ui.label("Load an image to begin");
            });
            return;
        };

        if self.texture.is_none() {
            self.texture = Some(upload_texture(ui.ctx(), session.working()));
        }
        let Some(texture) = &self.texture else {
            return;
        };

        let tool_armed = self.tool != ToolMode::Idle;
        let output = self.canvas.show(ui, texture, tool_armed);
        if let Some(selection) = output.completed {
            self.handle_selection(selection, output.transform);
        }
    }

    fn handle_selection(&mut self, selection: SelectionRect, transform: ViewTransform) {
        // One gesture per arming; the tool clears even when the selection
        // is rejected
        let tool = std::mem::take(&mut self.tool);
        let Some(session) = &mut self.session else {
            return;
        };

        let outcome = match tool {
            ToolMode::Idle => return,
            ToolMode::Crop => apply_crop(session, &selection, &transform),
            ToolMode::Resize => apply_resize(session, &selection, &transform),
        };

        match outcome {
            Ok(message) => {
                info!("{}", message);
                self.texture = None;
                self.status = message;
            }
            Err(err) => {
                warn!("Selection rejected: {}", err);
                self.status = format!("Selection rejected: {err}");
            }
        }
    }

    fn load_image(&mut self, ctx: &Context) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", OPEN_EXTENSIONS)
            .pick_file()
        else {
            return;
        };

        match io::load_image(&path) {
            Ok(image) => {
                let (max_w, max_h) = screen_bounds(ctx);
                let image = io::fit_within(&image, max_w, max_h);
                info!(
                    "Loaded {} ({}x{})",
                    path.display(),
                    image.width(),
                    image.height()
                );
                self.status = format!("Loaded {}", path.display());
                self.session = Some(EditSession::new(image));
                self.settings = FilterSettings::default();
                self.texture = None;
                self.tool = ToolMode::Idle;
            }
            Err(err) => {
                error!("Failed to load {}: {}", path.display(), err);
                self.status = format!("Failed to load image: {err}");
            }
        }
    }

    fn save_image(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JPEG", &["jpg", "jpeg"])
            .add_filter("PNG", &["png"])
            .add_filter("All Files", &["*"])
            .save_file()
        else {
            return;
        };

        match io::save_image(session.working(), &path) {
            Ok(()) => {
                info!("Saved {}", path.display());
                self.status = format!("Saved {}", path.display());
            }
            Err(err) => {
                error!("Failed to save {}: {}", path.display(), err);
                self.status = format!("Failed to save image: {err}");
            }
        }
    }

    fn arm_tool(&mut self, tool: ToolMode) {
        if self.session.is_none() {
            return;
        }
        self.tool = tool;
        self.status = match tool {
            ToolMode::Crop => "Drag across the image to crop".to_string(),
            ToolMode::Resize => "Drag to set the new size".to_string(),
            ToolMode::Idle => String::new(),
        };
    }

    fn open_rotate_dialog(&mut self) {
        if self.session.is_none() {
            return;
        }
        self.rotate_dialog = Some(RotateDialog { angle: 0.0 });
    }

    fn open_palette_dialog(&mut self) {
        if self.session.is_none() {
            return;
        }
        self.palette_dialog = Some(PaletteDialog {
            color: Color32::WHITE,
        });
    }

    fn open_fetch_dialog(&mut self) {
        if self.session.is_none() {
            return;
        }
        self.fetch_dialog = Some(FetchDialog {
            query: String::new(),
        });
    }

    fn show_rotate_dialog(&mut self, ctx: &Context) {
        let Some(dialog) = &mut self.rotate_dialog else {
            return;
        };
        let mut apply = false;
        let mut cancel = false;

        egui::Window::new("Rotate")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Enter angle in degrees:");
                    ui.add(
                        egui::DragValue::new(&mut dialog.angle)
                            .range(0.0..=360.0)
                            .speed(1.0)
                            .suffix("°"),
                    );
                });
                ui.horizontal(|ui| {
                    if ui.button("Rotate").clicked() {
                        apply = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if apply {
            let angle = dialog.angle;
            self.rotate_dialog = None;
            self.rotate_by(angle);
        } else if cancel {
            self.rotate_dialog = None;
        }
    }

    fn show_palette_dialog(&mut self, ctx: &Context) {
        let Some(dialog) = &mut self.palette_dialog else {
            return;
        };
        let mut apply = false;
        let mut cancel = false;

        egui::Window::new("Apply Color Palette")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Highlight color:");
                    ui.color_edit_button_srgba(&mut dialog.color);
                });
                ui.horizontal(|ui| {
                    if ui.button("Apply").clicked() {
                        apply = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if apply {
            let color = dialog.color;
            self.palette_dialog = None;
            self.apply_palette(color);
        } else if cancel {
            self.palette_dialog = None;
        }
    }

    fn show_fetch_dialog(&mut self, ctx: &Context) {
        let Some(dialog) = &mut self.fetch_dialog else {
            return;
        };
        let mut apply = false;
        let mut cancel = false;

        egui::Window::new("Find Photos")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Enter a prompt for the image:");
                ui.text_edit_singleline(&mut dialog.query);
                ui.horizontal(|ui| {
                    if ui.button("Search").clicked() {
                        apply = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if apply {
            let query = std::mem::take(&mut dialog.query);
            self.fetch_dialog = None;
            self.fetch_photo(&query);
        } else if cancel {
            self.fetch_dialog = None;
        }
    }

    fn rotate_by(&mut self, angle: f64) {
        let Some(session) = &mut self.session else {
            return;
        };
        session.rotate(angle);
        info!(
            "Rotated by {}° to {}x{}",
            angle,
            session.working().width(),
            session.working().height()
        );
        self.texture = None;
        self.status = format!("Rotated by {angle}°");
    }

    fn apply_palette(&mut self, color: Color32) {
        let Some(session) = &mut self.session else {
            return;
        };
        let lut = DuotoneLut::new(Rgb([0, 0, 0]), Rgb([color.r(), color.g(), color.b()]));
        session.recolor(&lut);
        info!(
            "Applied color palette ({}, {}, {})",
            color.r(),
            color.g(),
            color.b()
        );
        self.texture = None;
        self.status = "Applied color palette".to_string();
    }

    fn edit_externally(&mut self) {
        let Some(session) = &mut self.session else {
            return;
        };
        match editor::edit_externally(session.working()) {
            Ok(edited) => {
                session.replace_committed(edited);
                info!("Reloaded image from {}", EDITOR_NAME);
                self.texture = None;
                self.status = format!("Reloaded from {EDITOR_NAME}");
            }
            Err(err) => {
                error!("External edit failed: {}", err);
                self.status = format!("External edit failed: {err}");
            }
        }
    }

    fn fetch_photo(&mut self, query: &str) {
        info!("Searching photos for '{}'", query);
        match stock::fetch_photo(query) {
            Ok(Some(photo)) => {
                if let Some(session) = &mut self.session {
                    session.replace_working(photo);
                    self.texture = None;
                    self.status = format!("Showing a photo for '{query}'");
                }
            }
            Ok(None) => {
                warn!("No photos found for '{}'", query);
                self.status = format!("No photos found for '{query}'");
            }
            Err(err) => {
                warn!("Photo fetch failed: {}", err);
            }
        }
    }
}

impl eframe::App for RetouchApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            self.controls_ui(ui);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas_ui(ui);
        });

        self.show_rotate_dialog(ctx);
        self.show_palette_dialog(ctx);
        self.show_fetch_dialog(ctx);
    }
}

fn screen_bounds(ctx: &Context) -> (u32, u32) {
    match ctx.input(|i| i.viewport().monitor_size) {
        Some(size) => (size.x as u32, size.y as u32),
        None => FALLBACK_SCREEN,
    }
}

fn apply_crop(
    session: &mut EditSession,
    selection: &SelectionRect,
    transform: &ViewTransform,
) -> Result<String, String> {
    let region = selection
        .to_crop_region(
            transform,
            session.working().width(),
            session.working().height(),
        )
        .map_err(|e| e.to_string())?;
    session.crop(region).map_err(|e| e.to_string())?;
    Ok(format!("Cropped to {}x{}", region.width, region.height))
}

fn apply_resize(
    session: &mut EditSession,
    selection: &SelectionRect,
    transform: &ViewTransform,
) -> Result<String, String> {
    let (width, height) = selection
        .to_target_size(transform)
        .map_err(|e| e.to_string())?;
    session.resize(width, height).map_err(|e| e.to_string())?;
    Ok(format!("Resized to {width}x{height}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    fn test_session(width: u32, height: u32) -> EditSession {
        let buffer = RgbImage::from_fn(width, height, |x, y| {
            let v = (((x + y * width) * 7) % 256) as u8;
            Rgb([v, v, v])
        });
        EditSession::new(DynamicImage::ImageRgb8(buffer))
    }

    /// View transform that maps display points one-to-one onto pixels.
    fn full_view(width: u32, height: u32) -> ViewTransform {
        ViewTransform::fit((width, height), (0.0, 0.0), (width as f32, height as f32))
    }

    // ===== Selection Dispatch Tests =====

    #[test]
    fn test_apply_crop_commits_region() {
        let mut session = test_session(100, 80);
        let selection = SelectionRect::new((10.0, 10.0), (60.0, 50.0));

        let message = apply_crop(&mut session, &selection, &full_view(100, 80)).unwrap();

        assert_eq!(session.working().width(), 50);
        assert_eq!(session.working().height(), 40);
        assert_eq!(session.original().width(), 50);
        assert!(message.contains("50x40"));
    }

    #[test]
    fn test_apply_crop_rejects_empty_selection() {
        let mut session = test_session(100, 80);
        let selection = SelectionRect::new((10.0, 10.0), (10.0, 10.0));

        let result = apply_crop(&mut session, &selection, &full_view(100, 80));

        assert!(result.is_err());
        assert_eq!(session.working().width(), 100);
        assert_eq!(session.working().height(), 80);
    }

    #[test]
    fn test_apply_resize_uses_selection_extent() {
        let mut session = test_session(100, 80);
        let selection = SelectionRect::new((20.0, 20.0), (60.0, 40.0));

        let message = apply_resize(&mut session, &selection, &full_view(100, 80)).unwrap();

        assert_eq!(session.working().width(), 40);
        assert_eq!(session.working().height(), 20);
        assert!(message.contains("40x20"));
    }

    #[test]
    fn test_apply_resize_rejects_zero_extent() {
        let mut session = test_session(100, 80);
        let selection = SelectionRect::new((20.0, 20.0), (20.0, 60.0));

        let result = apply_resize(&mut session, &selection, &full_view(100, 80));

        assert!(result.is_err());
        assert_eq!(session.working().width(), 100);
    }

    #[test]
    fn test_apply_crop_acts_on_working_image() {
        let mut session = test_session(100, 80);
        let mut settings = FilterSettings::default();
        settings.brightness = 1.8;
        session.set_filters(settings);
        let expected = session.working().crop_imm(10, 10, 50, 40).to_rgb8();

        let selection = SelectionRect::new((10.0, 10.0), (60.0, 50.0));
        apply_crop(&mut session, &selection, &full_view(100, 80)).unwrap();

        assert_eq!(session.original().to_rgb8().as_raw(), expected.as_raw());
    }
}
