//! Retouch Core - Image processing library
//!
//! This crate provides the image processing functionality for Retouch:
//! the enhancement filter pipeline, crop/resize/rotate transforms, duotone
//! recoloring, selection-to-region mapping, and the edit session that ties
//! them together. It is GUI-free; the desktop shell lives in `retouch-app`.

pub mod filters;
pub mod io;
pub mod palette;
pub mod selection;
pub mod session;
pub mod transform;

pub use filters::apply_filters;
pub use io::{fit_within, load_image, save_image, ImageIoError};
pub use palette::{apply_duotone, DuotoneLut};
pub use selection::{SelectionError, SelectionRect, ToolMode, ViewTransform};
pub use session::EditSession;
pub use transform::{crop, resize, rotate, rotated_bounds, CropRegion, ResampleFilter, TransformError};

/// Slider-controlled enhancement settings.
///
/// Brightness, contrast, and saturation are multipliers; blur is a Gaussian
/// radius in pixels. The identity settings (all multipliers 1.0, blur 0.0)
/// leave an image untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSettings {
    /// Brightness multiplier (0.1 to 2.0, identity 1.0)
    pub brightness: f32,
    /// Contrast multiplier (0.1 to 2.0, identity 1.0)
    pub contrast: f32,
    /// Saturation multiplier (0.1 to 2.0, identity 1.0)
    pub saturation: f32,
    /// Gaussian blur radius in pixels (0.0 to 10.0, identity 0.0)
    pub blur: f32,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
            blur: 0.0,
        }
    }
}

impl FilterSettings {
    /// Minimum value for the multiplier settings.
    pub const FACTOR_MIN: f32 = 0.1;
    /// Maximum value for the multiplier settings.
    pub const FACTOR_MAX: f32 = 2.0;
    /// Maximum blur radius.
    pub const BLUR_MAX: f32 = 10.0;

    /// Create identity settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their identity points.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Return a copy with every value clamped to its legal range.
    pub fn clamped(self) -> Self {
        Self {
            brightness: self.brightness.clamp(Self::FACTOR_MIN, Self::FACTOR_MAX),
            contrast: self.contrast.clamp(Self::FACTOR_MIN, Self::FACTOR_MAX),
            saturation: self.saturation.clamp(Self::FACTOR_MIN, Self::FACTOR_MAX),
            blur: self.blur.clamp(0.0, Self::BLUR_MAX),
        }
    }
}
