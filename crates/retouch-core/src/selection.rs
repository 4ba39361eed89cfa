//! Mapping pointer drags to image-space regions.
//!
//! The display surface shows the image scaled to fit the window, so pointer
//! coordinates are not pixel coordinates. A [`ViewTransform`] captures the
//! placement (offset plus uniform scale) and a [`SelectionRect`] carries a
//! drag gesture's two corners in display space. Conversion to pixel bounds
//! happens once, when the gesture ends.

use thiserror::Error;

use crate::transform::CropRegion;

/// Errors from converting a selection to image bounds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The selection rounds to a zero-area region.
    #[error("selection has no area")]
    EmptySelection,
    /// The selection lies entirely outside the image.
    #[error("selection lies outside the image")]
    OutsideImage,
}

/// Which operation the next drag gesture will perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    /// No tool armed; drags are ignored.
    #[default]
    Idle,
    /// Next completed drag crops to the selection.
    Crop,
    /// Next completed drag resizes to the selection's extent.
    Resize,
}

/// Placement of the image within the display surface.
///
/// Maps image pixel `(ix, iy)` to display point
/// `(ix * scale + offset.0, iy * scale + offset.1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Display position of the image's top-left corner.
    pub offset: (f32, f32),
    /// Uniform display-pixels-per-image-pixel factor.
    pub scale: f32,
}

impl ViewTransform {
    /// Compute the transform that fits an image inside a view rectangle.
    ///
    /// The image is scaled uniformly to the largest size that fits and
    /// centered on both axes.
    ///
    /// # Arguments
    /// * `image_size` - Image dimensions in pixels
    /// * `view_origin` - Display position of the view's top-left corner
    /// * `view_size` - View dimensions in display units
    pub fn fit(image_size: (u32, u32), view_origin: (f32, f32), view_size: (f32, f32)) -> Self {
        let (img_w, img_h) = (image_size.0 as f32, image_size.1 as f32);
        let (view_w, view_h) = view_size;

        if img_w <= 0.0 || img_h <= 0.0 || view_w <= 0.0 || view_h <= 0.0 {
            return Self {
                offset: view_origin,
                scale: 1.0,
            };
        }

        let scale = (view_w / img_w).min(view_h / img_h);
        let offset = (
            view_origin.0 + (view_w - img_w * scale) / 2.0,
            view_origin.1 + (view_h - img_h * scale) / 2.0,
        );

        Self { offset, scale }
    }

    /// Convert a display point to image coordinates.
    pub fn to_image(&self, display: (f32, f32)) -> (f32, f32) {
        (
            (display.0 - self.offset.0) / self.scale,
            (display.1 - self.offset.1) / self.scale,
        )
    }

    /// Convert an image point to display coordinates.
    pub fn to_display(&self, image: (f32, f32)) -> (f32, f32) {
        (
            image.0 * self.scale + self.offset.0,
            image.1 * self.scale + self.offset.1,
        )
    }
}

/// A drag gesture's rectangle in display coordinates.
///
/// The corners are the gesture's start and end points and may arrive in any
/// order; dragging up or leftward is legal. Normalization happens during
/// conversion, not storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    /// Where the drag started.
    pub start: (f32, f32),
    /// Where the drag currently is, or ended.
    pub end: (f32, f32),
}

impl SelectionRect {
    pub fn new(start: (f32, f32), end: (f32, f32)) -> Self {
        Self { start, end }
    }

    /// Corners ordered as (min_x, min_y, max_x, max_y).
    fn normalized(&self) -> (f32, f32, f32, f32) {
        (
            self.start.0.min(self.end.0),
            self.start.1.min(self.end.1),
            self.start.0.max(self.end.0),
            self.start.1.max(self.end.1),
        )
    }

    /// Convert to integer crop bounds within an image.
    ///
    /// Corners are normalized, mapped through the view transform, rounded to
    /// pixel edges, and clamped to the image.
    ///
    /// # Errors
    /// [`SelectionError::EmptySelection`] if the rectangle rounds to zero
    /// width or height; [`SelectionError::OutsideImage`] if it has area but
    /// no overlap with the image.
    pub fn to_crop_region(
        &self,
        transform: &ViewTransform,
        image_width: u32,
        image_height: u32,
    ) -> Result<CropRegion, SelectionError> {
        let (min_x, min_y, max_x, max_y) = self.normalized();
        let (ix0, iy0) = transform.to_image((min_x, min_y));
        let (ix1, iy1) = transform.to_image((max_x, max_y));

        // Round to pixel edges before clamping so a zero-area drag is
        // distinguishable from one clamped away at the border
        let rx0 = ix0.round() as i64;
        let ry0 = iy0.round() as i64;
        let rx1 = ix1.round() as i64;
        let ry1 = iy1.round() as i64;

        if rx1 <= rx0 || ry1 <= ry0 {
            return Err(SelectionError::EmptySelection);
        }

        let x0 = rx0.clamp(0, image_width as i64);
        let y0 = ry0.clamp(0, image_height as i64);
        let x1 = rx1.clamp(0, image_width as i64);
        let y1 = ry1.clamp(0, image_height as i64);

        if x1 <= x0 || y1 <= y0 {
            return Err(SelectionError::OutsideImage);
        }

        Ok(CropRegion::new(
            x0 as u32,
            y0 as u32,
            (x1 - x0) as u32,
            (y1 - y0) as u32,
        ))
    }

    /// Convert to a resize target: the selection's extent in image pixels.
    ///
    /// The target is the absolute drag extent on each axis divided by the
    /// view scale, rounded. The position of the rectangle is irrelevant.
    ///
    /// # Errors
    /// [`SelectionError::EmptySelection`] if either axis rounds to zero.
    pub fn to_target_size(&self, transform: &ViewTransform) -> Result<(u32, u32), SelectionError> {
        let (min_x, min_y, max_x, max_y) = self.normalized();
        let width = ((max_x - min_x) / transform.scale).round() as u32;
        let height = ((max_y - min_y) / transform.scale).round() as u32;

        if width == 0 || height == 0 {
            return Err(SelectionError::EmptySelection);
        }

        Ok((width, height))
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
