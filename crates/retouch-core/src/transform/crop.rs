//! Image cropping.
//!
//! Crop regions arrive in absolute pixel coordinates, normally produced by
//! the selection mapping in [`crate::selection`]. The far edge is clamped to
//! the image; a region that starts outside the image or has a zero dimension
//! is rejected.

use image::DynamicImage;

use super::TransformError;

/// Axis-aligned crop region in absolute pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    /// Left edge, in pixels from the image's left border.
    pub x: u32,
    /// Top edge, in pixels from the image's top border.
    pub y: u32,
    /// Region width in pixels.
    pub width: u32,
    /// Region height in pixels.
    pub height: u32,
}

impl CropRegion {
    /// Create a region from its top-left corner and size.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the region covers the full extent of a `width` x `height` image.
    pub fn covers(&self, width: u32, height: u32) -> bool {
        self.x == 0 && self.y == 0 && self.width >= width && self.height >= height
    }
}

/// Cut a region out of an image.
///
/// # Arguments
/// * `image` - Source image
/// * `region` - Region to keep, in absolute pixel coordinates
///
/// # Returns
/// A new image containing only the region. A full-image region returns a
/// clone of the input, bit for bit.
///
/// # Errors
/// * [`TransformError::ZeroSize`] when the region has a zero dimension
/// * [`TransformError::OutOfBounds`] when the region starts past the image
///
/// # Behavior
/// A region extending past the right or bottom edge is clamped to the image.
pub fn crop(image: &DynamicImage, region: CropRegion) -> Result<DynamicImage, TransformError> {
    let (img_w, img_h) = (image.width(), image.height());

    if region.width == 0 || region.height == 0 {
        return Err(TransformError::ZeroSize {
            width: region.width,
            height: region.height,
        });
    }
    if region.x >= img_w || region.y >= img_h {
        return Err(TransformError::OutOfBounds {
            width: img_w,
            height: img_h,
        });
    }

    // Fast path: full crop returns a clone
    if region.covers(img_w, img_h) {
        return Ok(image.clone());
    }

    let width = region.width.min(img_w - region.x);
    let height = region.height.min(img_h - region.y);

    Ok(image.crop_imm(region.x, region.y, width, height))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use image::{Rgb, RgbImage};
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (4u32..=64, 4u32..=64)
    }

    fn create_test_image(width: u32, height: u32) -> DynamicImage {
        let buffer = RgbImage::from_fn(width, height, |x, y| {
            let v = ((y * width + x) % 256) as u8;
            Rgb([v, v, v])
        });
        DynamicImage::ImageRgb8(buffer)
    }

    proptest! {
        /// Property: A successful crop never exceeds the source dimensions.
        #[test]
        fn prop_output_bounded_by_input(
            (width, height) in dimensions_strategy(),
            x in 0u32..=63,
            y in 0u32..=63,
            w in 1u32..=64,
            h in 1u32..=64,
        ) {
            let img = create_test_image(width, height);
            if let Ok(result) = crop(&img, CropRegion::new(x, y, w, h)) {
                prop_assert!(result.width() >= 1 && result.width() <= width);
                prop_assert!(result.height() >= 1 && result.height() <= height);
            }
        }

        /// Property: An in-bounds crop has exactly the requested dimensions.
        #[test]
        fn prop_in_bounds_crop_exact(
            (width, height) in (16u32..=64, 16u32..=64),
        ) {
            let img = create_test_image(width, height);
            let region = CropRegion::new(width / 4, height / 4, width / 2, height / 2);
            let result = crop(&img, region).unwrap();

            prop_assert_eq!(result.width(), width / 2);
            prop_assert_eq!(result.height(), height / 2);
        }

        /// Property: Full crop returns the original image.
        #[test]
        fn prop_full_crop_identity(
            (width, height) in dimensions_strategy(),
        ) {
            let img = create_test_image(width, height);
            let result = crop(&img, CropRegion::new(0, 0, width, height)).unwrap();

            prop_assert_eq!(result.to_rgb8(), img.to_rgb8());
        }

        /// Property: Every cropped pixel matches the source pixel it came from.
        #[test]
        fn prop_pixels_match_source(
            (width, height) in (8u32..=32, 8u32..=32),
        ) {
            let img = create_test_image(width, height);
            let region = CropRegion::new(2, 3, width / 2, height / 2);
            let result = crop(&img, region).unwrap().to_rgb8();
            let source = img.to_rgb8();

            for (x, y, pixel) in result.enumerate_pixels() {
                prop_assert_eq!(pixel, source.get_pixel(x + region.x, y + region.y));
            }
        }

        /// Property: Cropping is deterministic.
        #[test]
        fn prop_deterministic(
            (width, height) in dimensions_strategy(),
        ) {
            let img = create_test_image(width, height);
            let region = CropRegion::new(1, 1, width / 2, height / 2);

            let first = crop(&img, region).unwrap();
            let second = crop(&img, region).unwrap();

            prop_assert_eq!(first.to_rgb8(), second.to_rgb8());
        }
    }
}
