//! The display surface.
//!
//! Draws the working image as a GPU texture scaled to fit the panel and
//! tracks drag gestures for the crop and resize tools, echoing the live
//! selection as a red outline.

use egui::{
    Color32, ColorImage, Context, CursorIcon, Rect, Sense, Stroke, StrokeKind, TextureHandle,
    TextureOptions, Ui,
};
use image::DynamicImage;
use retouch_core::{SelectionRect, ViewTransform};

/// What one frame of the canvas produced.
pub struct CanvasOutput {
    /// Placement of the image within the panel this frame.
    pub transform: ViewTransform,
    /// A drag gesture that finished this frame, if any.
    pub completed: Option<SelectionRect>,
}

/// Image view with drag-selection support.
#[derive(Default)]
pub struct ImageCanvas {
    drag: Option<SelectionRect>,
}

impl ImageCanvas {
    /// Draw the image and advance any selection gesture.
    ///
    /// While a tool is armed the cursor becomes a crosshair and drags are
    /// recorded; a finished drag is handed back exactly once. Arming off
    /// mid-gesture abandons the gesture.
    pub fn show(&mut self, ui: &mut Ui, texture: &TextureHandle, tool_armed: bool) -> CanvasOutput {
        let canvas_rect = ui.available_rect_before_wrap();
        let sense = if tool_armed {
            Sense::drag()
        } else {
            Sense::hover()
        };
        let response = ui.allocate_rect(canvas_rect, sense);
        let painter = ui.painter_at(canvas_rect);

        let [tex_w, tex_h] = texture.size();
        let transform = ViewTransform::fit(
            (tex_w as u32, tex_h as u32),
            (canvas_rect.min.x, canvas_rect.min.y),
            (canvas_rect.width(), canvas_rect.height()),
        );
        let (min_x, min_y) = transform.to_display((0.0, 0.0));
        let (max_x, max_y) = transform.to_display((tex_w as f32, tex_h as f32));
        painter.image(
            texture.id(),
            Rect::from_min_max(egui::pos2(min_x, min_y), egui::pos2(max_x, max_y)),
            Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            Color32::WHITE,
        );

        let mut completed = None;
        if tool_armed {
            ui.ctx().set_cursor_icon(CursorIcon::Crosshair);

            if response.drag_started() {
                if let Some(pos) = response.interact_pointer_pos() {
                    self.drag = Some(SelectionRect::new((pos.x, pos.y), (pos.x, pos.y)));
                }
            }
            if response.dragged() {
                if let (Some(drag), Some(pos)) = (self.drag.as_mut(), response.interact_pointer_pos())
                {
                    drag.end = (pos.x, pos.y);
                }
            }
            if response.drag_stopped() {
                if let (Some(drag), Some(pos)) =
                    (self.drag.as_mut(), response.interact_pointer_pos())
                {
                    drag.end = (pos.x, pos.y);
                }
                completed = self.drag.take();
            }
        } else {
            self.drag = None;
        }

        if let Some(drag) = &self.drag {
            let outline = Rect::from_two_pos(
                egui::pos2(drag.start.0, drag.start.1),
                egui::pos2(drag.end.0, drag.end.1),
            );
            painter.rect_stroke(outline, 0.0, Stroke::new(1.0, Color32::RED), StrokeKind::Middle);
        }

        CanvasOutput {
            transform,
            completed,
        }
    }
}

/// Upload an image to the GPU for display.
pub fn upload_texture(ctx: &Context, image: &DynamicImage) -> TextureHandle {
    let rgba = image.to_rgba8();
    let (w, h) = (rgba.width() as usize, rgba.height() as usize);
    let color_image = ColorImage {
        size: [w, h],
        source_size: egui::vec2(w as f32, h as f32),
        pixels: rgba
            .pixels()
            .map(|p| Color32::from_rgba_unmultiplied(p.0[0], p.0[1], p.0[2], p.0[3]))
            .collect(),
    };
    ctx.load_texture("working-image", color_image, TextureOptions::LINEAR)
}
