//! Duotone recoloring
//!
//! Reduces an image to grayscale, then maps every gray level through a
//! precomputed two-color gradient. With black as the low end this produces
//! the classic colorize effect: shadows stay dark, highlights take on the
//! chosen color.

use image::{DynamicImage, Rgb, RgbImage};

// ============================================================================
// LUT Type
// ============================================================================

/// Pre-computed 256-entry gradient between two colors.
#[derive(Debug, Clone)]
pub struct DuotoneLut {
    /// LUT values: lut[gray] = mapped RGB color
    pub lut: [[u8; 3]; 256],
}

impl DuotoneLut {
    /// Build a linear gradient from `black` (gray 0) to `white` (gray 255).
    ///
    /// Each channel is interpolated independently. The endpoints map
    /// exactly: gray 0 always yields `black` and gray 255 always yields
    /// `white`.
    pub fn new(black: Rgb<u8>, white: Rgb<u8>) -> Self {
        let mut lut = [[0u8; 3]; 256];
        for (i, entry) in lut.iter_mut().enumerate() {
            let t = i as f32 / 255.0;
            for channel in 0..3 {
                let lo = black.0[channel] as f32;
                let hi = white.0[channel] as f32;
                entry[channel] = (lo + (hi - lo) * t).round().clamp(0.0, 255.0) as u8;
            }
        }
        Self { lut }
    }
}

// ============================================================================
// Recolor Application
// ============================================================================

/// Recolor an image as a duotone gradient.
///
/// # Arguments
/// * `image` - Source image (any color mode)
/// * `lut` - Gradient to map gray levels through
///
/// # Returns
/// A new RGB image of the same dimensions where every pixel is the LUT
/// entry for that pixel's gray level.
pub fn apply_duotone(image: &DynamicImage, lut: &DuotoneLut) -> DynamicImage {
    let gray = image.to_luma8();
    let (width, height) = gray.dimensions();

    let mut output = RgbImage::new(width, height);
    for (dst, src) in output.pixels_mut().zip(gray.pixels()) {
        dst.0 = lut.lut[src.0[0] as usize];
    }

    DynamicImage::ImageRgb8(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_image(width: u32, height: u32, value: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(value)))
    }

    // ===== LUT Tests =====

    #[test]
    fn test_lut_endpoints_exact() {
        let lut = DuotoneLut::new(Rgb([0, 0, 0]), Rgb([180, 90, 40]));
        assert_eq!(lut.lut[0], [0, 0, 0], "Gray 0 must map to the black color");
        assert_eq!(lut.lut[255], [180, 90, 40], "Gray 255 must map to the white color");
    }

    #[test]
    fn test_lut_midpoint() {
        let lut = DuotoneLut::new(Rgb([0, 0, 0]), Rgb([200, 100, 50]));
        // t = 128/255
        assert_eq!(lut.lut[128], [100, 50, 25]);
    }

    #[test]
    fn test_lut_channels_monotone() {
        let lut = DuotoneLut::new(Rgb([0, 0, 0]), Rgb([255, 128, 7]));
        for channel in 0..3 {
            for i in 1..256 {
                assert!(
                    lut.lut[i][channel] >= lut.lut[i - 1][channel],
                    "Channel {channel} must be non-decreasing at gray {i}"
                );
            }
        }
    }

    #[test]
    fn test_lut_equal_endpoints_constant() {
        let lut = DuotoneLut::new(Rgb([60, 60, 60]), Rgb([60, 60, 60]));
        assert!(lut.lut.iter().all(|entry| *entry == [60, 60, 60]));
    }

    // ===== Recolor Tests =====

    #[test]
    fn test_duotone_black_stays_black() {
        let image = uniform_image(6, 4, [0, 0, 0]);
        let lut = DuotoneLut::new(Rgb([0, 0, 0]), Rgb([255, 0, 0]));
        let result = apply_duotone(&image, &lut).to_rgb8();
        assert_eq!(result.get_pixel(3, 2).0, [0, 0, 0]);
    }

    #[test]
    fn test_duotone_white_becomes_chosen_color() {
        let image = uniform_image(6, 4, [255, 255, 255]);
        let lut = DuotoneLut::new(Rgb([0, 0, 0]), Rgb([30, 120, 210]));
        let result = apply_duotone(&image, &lut).to_rgb8();
        assert_eq!(result.get_pixel(0, 0).0, [30, 120, 210]);
    }

    #[test]
    fn test_duotone_gray_maps_through_lut() {
        // Equal channels survive grayscale conversion exactly
        let image = uniform_image(3, 3, [77, 77, 77]);
        let lut = DuotoneLut::new(Rgb([0, 0, 0]), Rgb([200, 100, 50]));
        let result = apply_duotone(&image, &lut).to_rgb8();
        assert_eq!(result.get_pixel(1, 1).0, lut.lut[77]);
    }

    #[test]
    fn test_duotone_preserves_dimensions() {
        let image = uniform_image(17, 9, [128, 64, 32]);
        let lut = DuotoneLut::new(Rgb([0, 0, 0]), Rgb([255, 255, 0]));
        let result = apply_duotone(&image, &lut);
        assert_eq!(result.width(), 17);
        assert_eq!(result.height(), 9);
    }

    #[test]
    fn test_duotone_colored_input_goes_two_tone() {
        // Any input pixel must land on the gradient line
        let image = uniform_image(4, 4, [200, 40, 130]);
        let lut = DuotoneLut::new(Rgb([0, 0, 0]), Rgb([255, 0, 0]));
        let result = apply_duotone(&image, &lut).to_rgb8();

        let [_, g, b] = result.get_pixel(0, 0).0;
        assert_eq!((g, b), (0, 0), "A pure red ramp leaves green and blue at zero");
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
