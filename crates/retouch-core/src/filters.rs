//! Enhancement filter pipeline
//!
//! Recomputes the working image from a committed base image and the current
//! slider settings.
//!
//! ## Filter Order
//! 1. Brightness
//! 2. Contrast
//! 3. Saturation
//! 4. Gaussian blur (only when radius > 0)
//!
//! The order is fixed. The pipeline is pure: the base image is never
//! modified, and identical inputs always produce identical output.

use image::{imageops, DynamicImage};

use crate::FilterSettings;

/// Apply the full filter pipeline to a base image.
///
/// # Arguments
/// * `base` - The committed image the filters derive from
/// * `settings` - Current slider values
///
/// # Returns
/// A new image with all four filters applied in order. Identity settings
/// return a clone of the base, bit for bit.
///
/// # Behavior
/// Color channels are processed in 8-bit RGBA space; the alpha channel is
/// passed through untouched. Each stage short-circuits at its identity
/// value, so the pixel-identity guarantee does not depend on rounding.
pub fn apply_filters(base: &DynamicImage, settings: &FilterSettings) -> DynamicImage {
    // Early exit when every slider sits at identity
    if settings.is_identity() {
        return base.clone();
    }

    let mut rgba = base.to_rgba8();
    apply_brightness(&mut rgba, settings.brightness);
    apply_contrast(&mut rgba, settings.contrast);
    apply_saturation(&mut rgba, settings.saturation);

    let rgba = if settings.blur > 0.0 {
        imageops::blur(&rgba, settings.blur)
    } else {
        rgba
    };

    DynamicImage::ImageRgba8(rgba)
}

/// Scale every color channel by a constant factor.
///
/// A factor of 0.0 gives a black image, 1.0 the original.
#[inline]
fn apply_brightness(pixels: &mut [u8], factor: f32) {
    if is_identity_factor(factor) {
        return;
    }
    for chunk in pixels.chunks_exact_mut(4) {
        for channel in &mut chunk[..3] {
            *channel = clamp_channel(*channel as f32 * factor);
        }
    }
}

/// Scale contrast around the image's mean gray level.
///
/// The pivot is the rounded Rec. 601 gray mean of the stage's input, so a
/// uniform image is unchanged for any factor.
#[inline]
fn apply_contrast(pixels: &mut [u8], factor: f32) {
    if is_identity_factor(factor) {
        return;
    }
    let mean = gray_mean(pixels);
    for chunk in pixels.chunks_exact_mut(4) {
        for channel in &mut chunk[..3] {
            *channel = clamp_channel(mean + (*channel as f32 - mean) * factor);
        }
    }
}

/// Blend each pixel with its own gray level.
///
/// A factor of 0.0 gives full grayscale, 1.0 the original colors.
#[inline]
fn apply_saturation(pixels: &mut [u8], factor: f32) {
    if is_identity_factor(factor) {
        return;
    }
    for chunk in pixels.chunks_exact_mut(4) {
        let gray = luma(chunk[0], chunk[1], chunk[2]).round();
        for channel in &mut chunk[..3] {
            *channel = clamp_channel(gray + (*channel as f32 - gray) * factor);
        }
    }
}

/// Rec. 601 luma for an 8-bit RGB pixel.
#[inline]
fn luma(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

/// Mean gray level across all pixels, rounded to the nearest integer.
///
/// Rounding keeps the contrast pivot on an exact 8-bit value, which makes
/// the factor-1.0 case lossless even without the early exit.
fn gray_mean(pixels: &[u8]) -> f32 {
    let mut sum = 0.0f64;
    let mut count = 0u64;
    for chunk in pixels.chunks_exact(4) {
        sum += luma(chunk[0], chunk[1], chunk[2]) as f64;
        count += 1;
    }
    if count == 0 {
        return 0.0;
    }
    (sum / count as f64).round() as f32
}

#[inline]
fn is_identity_factor(factor: f32) -> bool {
    (factor - 1.0).abs() < f32::EPSILON
}

#[inline]
fn clamp_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}


// ============================================================================
// Property-Based Tests
// ============================================================================
