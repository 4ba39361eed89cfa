//! The edit session: one original, one working image, one set of sliders.
//!
//! ## Buffers
//!
//! `original` is the last committed state. `working` is what the display
//! shows, derived from `original` by applying the current filter settings.
//!
//! ## Commit Semantics
//!
//! Cropping, resizing, rotation, recoloring, and an external-editor reload
//! all act on the working image and then replace *both* buffers with the
//! result, so the filtered appearance is baked into the new original. Filter
//! settings survive commits; they reset only when a new image is loaded
//! (which means constructing a new session). A fetched substitute photo
//! replaces only the working image, never the original.

use image::DynamicImage;

use crate::filters::apply_filters;
use crate::palette::{apply_duotone, DuotoneLut};
use crate::transform::{self, CropRegion, ResampleFilter, TransformError};
use crate::FilterSettings;

/// Owns the image buffers and filter settings for one loaded image.
#[derive(Debug, Clone)]
pub struct EditSession {
    original: DynamicImage,
    working: DynamicImage,
    settings: FilterSettings,
}

impl EditSession {
    /// Start a session from a freshly loaded image.
    ///
    /// Both buffers hold the image and the settings are at identity.
    pub fn new(image: DynamicImage) -> Self {
        Self {
            original: image.clone(),
            working: image,
            settings: FilterSettings::default(),
        }
    }

    /// The last committed image.
    pub fn original(&self) -> &DynamicImage {
        &self.original
    }

    /// The currently displayed image.
    pub fn working(&self) -> &DynamicImage {
        &self.working
    }

    /// The current filter settings.
    pub fn settings(&self) -> FilterSettings {
        self.settings
    }

    /// Update the filter settings and rederive the working image.
    ///
    /// Settings are clamped to their legal ranges. The working image becomes
    /// the filtered original; the original is untouched.
    pub fn set_filters(&mut self, settings: FilterSettings) {
        self.settings = settings.clamped();
        self.working = apply_filters(&self.original, &self.settings);
    }

    /// Crop the working image and commit the result.
    ///
    /// # Errors
    /// [`TransformError`] if the region is empty or outside the image; the
    /// session is unchanged on error.
    pub fn crop(&mut self, region: CropRegion) -> Result<(), TransformError> {
        let result = transform::crop(&self.working, region)?;
        self.commit(result);
        Ok(())
    }

    /// Resize the working image to exact dimensions and commit the result.
    ///
    /// Uses Lanczos3 resampling.
    ///
    /// # Errors
    /// [`TransformError::ZeroSize`] if either dimension is zero; the session
    /// is unchanged on error.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), TransformError> {
        let result = transform::resize(&self.working, width, height, ResampleFilter::Lanczos3)?;
        self.commit(result);
        Ok(())
    }

    /// Rotate the working image counter-clockwise and commit the result.
    ///
    /// The canvas expands to the rotated bounding box.
    pub fn rotate(&mut self, angle_degrees: f64) {
        let result = transform::rotate(&self.working, angle_degrees);
        self.commit(result);
    }

    /// Recolor the working image through a duotone gradient and commit.
    pub fn recolor(&mut self, lut: &DuotoneLut) {
        let result = apply_duotone(&self.working, lut);
        self.commit(result);
    }

    /// Replace both buffers with an externally edited image.
    ///
    /// Used after an external-editor roundtrip. Settings are kept.
    pub fn replace_committed(&mut self, image: DynamicImage) {
        self.commit(image);
    }

    /// Replace only the working image.
    ///
    /// Used for fetched substitute photos. The original is untouched, so the
    /// next filter change rederives from it and discards the substitute.
    pub fn replace_working(&mut self, image: DynamicImage) {
        self.working = image;
    }

    fn commit(&mut self, image: DynamicImage) {
        self.original = image.clone();
        self.working = image;
    }
}
