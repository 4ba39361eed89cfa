//! Image file loading and saving.
//!
//! Loading accepts anything the enabled decoders recognize. Saving infers
//! the output format from the file extension: `png` writes PNG, `jpg` and
//! `jpeg` write JPEG, and any other or missing extension falls back to
//! JPEG. JPEG output is converted to 8-bit RGB first since the format has
//! no alpha channel.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat};
use thiserror::Error;

use crate::transform::ResampleFilter;

/// JPEG quality for saved files.
const JPEG_QUALITY: u8 = 75;

/// Errors from image file operations.
#[derive(Debug, Error)]
pub enum ImageIoError {
    /// The file could not be read or decoded.
    #[error("Failed to load image: {0}")]
    LoadFailed(String),

    /// The image could not be encoded or written.
    #[error("Failed to save image: {0}")]
    SaveFailed(String),
}

/// Load an image from disk.
///
/// # Errors
/// [`ImageIoError::LoadFailed`] if the file is missing, unreadable, or not
/// a decodable image.
pub fn load_image(path: &Path) -> Result<DynamicImage, ImageIoError> {
    image::open(path).map_err(|e| ImageIoError::LoadFailed(e.to_string()))
}

/// Save an image, choosing the format from the path's extension.
///
/// # Errors
/// [`ImageIoError::SaveFailed`] if the file cannot be created or encoding
/// fails.
pub fn save_image(image: &DynamicImage, path: &Path) -> Result<(), ImageIoError> {
    match format_for_path(path) {
        ImageFormat::Png => image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| ImageIoError::SaveFailed(e.to_string())),
        _ => save_jpeg(image, path),
    }
}

/// Downscale an image to fit within bounds, preserving aspect ratio.
///
/// Images already inside the bounds are returned unchanged, as are calls
/// with a zero bound. Uses Lanczos3 resampling.
pub fn fit_within(image: &DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    if max_width == 0 || max_height == 0 {
        return image.clone();
    }
    if image.width() <= max_width && image.height() <= max_height {
        return image.clone();
    }
    image.resize(
        max_width,
        max_height,
        ResampleFilter::Lanczos3.to_image_filter(),
    )
}

/// Map a file extension to the output format. JPEG is the fallback.
fn format_for_path(path: &Path) -> ImageFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => ImageFormat::Png,
        Some("jpg" | "jpeg") => ImageFormat::Jpeg,
        _ => ImageFormat::Jpeg,
    }
}

fn save_jpeg(image: &DynamicImage, path: &Path) -> Result<(), ImageIoError> {
    // JPEG has no alpha channel
    let rgb = image.to_rgb8();

    let file = File::create(path).map_err(|e| ImageIoError::SaveFailed(e.to_string()))?;
    let mut writer = BufWriter::new(file);

    let encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
    encoder
        .write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| ImageIoError::SaveFailed(e.to_string()))?;

    writer
        .flush()
        .map_err(|e| ImageIoError::SaveFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    /// Create a simple gradient test image.
    fn test_image(width: u32, height: u32) -> DynamicImage {
        let buffer = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 13 % 256) as u8, (y * 17 % 256) as u8, 90])
        });
        DynamicImage::ImageRgb8(buffer)
    }

    // ===== Format Inference Tests =====

    #[test]
    fn test_format_png_extension() {
        assert_eq!(format_for_path(Path::new("photo.png")), ImageFormat::Png);
        assert_eq!(format_for_path(Path::new("photo.PNG")), ImageFormat::Png);
    }

    #[test]
    fn test_format_jpeg_extensions() {
        assert_eq!(format_for_path(Path::new("photo.jpg")), ImageFormat::Jpeg);
        assert_eq!(format_for_path(Path::new("photo.jpeg")), ImageFormat::Jpeg);
        assert_eq!(format_for_path(Path::new("photo.JPG")), ImageFormat::Jpeg);
    }

    #[test]
    fn test_format_defaults_to_jpeg() {
        assert_eq!(format_for_path(Path::new("photo.webp")), ImageFormat::Jpeg);
        assert_eq!(format_for_path(Path::new("photo.data")), ImageFormat::Jpeg);
        assert_eq!(format_for_path(Path::new("photo")), ImageFormat::Jpeg);
    }

    // ===== Save/Load Tests =====

    #[test]
    fn test_png_roundtrip_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let img = test_image(20, 15);

        save_image(&img, &path).unwrap();
        let loaded = load_image(&path).unwrap();

        assert_eq!(loaded.to_rgb8(), img.to_rgb8());
    }

    #[test]
    fn test_jpg_writes_jpeg_magic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");

        save_image(&test_image(16, 16), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();

        // SOI marker
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_unknown_extension_writes_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.data");

        save_image(&test_image(16, 16), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();

        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_png_extension_writes_png_magic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        save_image(&test_image(16, 16), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();

        assert_eq!(&bytes[0..4], &[0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn test_rgba_saves_as_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([200, 50, 50, 128])));

        save_image(&img, &path).unwrap();
        let loaded = load_image(&path).unwrap();

        assert_eq!(loaded.width(), 8);
        assert_eq!(loaded.height(), 8);
        assert!(!loaded.color().has_alpha());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_image(&dir.path().join("nothing.png"));

        assert!(matches!(result, Err(ImageIoError::LoadFailed(_))));
    }

    #[test]
    fn test_load_non_image_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.png");
        std::fs::write(&path, b"this is not an image").unwrap();

        assert!(load_image(&path).is_err());
    }

    // ===== Fit Tests =====

    #[test]
    fn test_fit_leaves_small_image_alone() {
        let img = test_image(40, 30);
        let result = fit_within(&img, 100, 100);

        assert_eq!(result.to_rgb8(), img.to_rgb8());
    }

    #[test]
    fn test_fit_downscales_landscape() {
        let img = test_image(200, 100);
        let result = fit_within(&img, 50, 50);

        assert_eq!(result.width(), 50);
        assert_eq!(result.height(), 25);
    }

    #[test]
    fn test_fit_downscales_portrait() {
        let img = test_image(100, 200);
        let result = fit_within(&img, 50, 50);

        assert_eq!(result.width(), 25);
        assert_eq!(result.height(), 50);
    }

    #[test]
    fn test_fit_zero_bound_is_noop() {
        let img = test_image(100, 100);
        let result = fit_within(&img, 0, 50);

        assert_eq!(result.width(), 100);
        assert_eq!(result.height(), 100);
    }
}
