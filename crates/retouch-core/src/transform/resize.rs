//! Exact-dimension resizing.

use image::DynamicImage;

use super::TransformError;

/// Resampling filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleFilter {
    /// Nearest neighbor (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    #[default]
    Lanczos3,
}

impl ResampleFilter {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResampleFilter::Nearest => image::imageops::FilterType::Nearest,
            ResampleFilter::Bilinear => image::imageops::FilterType::Triangle,
            ResampleFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Resize an image to exact dimensions, ignoring aspect ratio.
///
/// # Arguments
/// * `image` - The source image
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Resampling filter to use
///
/// # Returns
/// A new image with exactly the requested dimensions. Matching dimensions
/// return a clone of the input.
///
/// # Errors
/// Returns [`TransformError::ZeroSize`] when either target dimension is 0.
pub fn resize(
    image: &DynamicImage,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> Result<DynamicImage, TransformError> {
    if width == 0 || height == 0 {
        return Err(TransformError::ZeroSize { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width() == width && image.height() == height {
        return Ok(image.clone());
    }

    Ok(image.resize_exact(width, height, filter.to_image_filter()))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
