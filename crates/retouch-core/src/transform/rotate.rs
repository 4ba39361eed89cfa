//! Arbitrary-angle rotation with canvas expansion.
//!
//! The output canvas is always the bounding box of the rotated image, so no
//! corner is ever clipped. Exact quarter turns take lossless paths; every
//! other angle uses inverse mapping: for each output pixel, the source
//! location is found by rotating back, then sampled bilinearly.
//!
//! For rotation by angle θ, the inverse transform is:
//! ```text
//! src_x = (dst_x - dst_cx) * cos(-θ) - (dst_y - dst_cy) * sin(-θ) + src_cx
//! src_y = (dst_x - dst_cx) * sin(-θ) + (dst_y - dst_cy) * cos(-θ) + src_cy
//! ```

use image::{DynamicImage, RgbaImage};

/// Angles closer than this to a quarter turn are treated as exact.
const ANGLE_EPSILON: f64 = 0.001;

/// Compute the bounding box of a rotated image.
///
/// When an image is rotated, the corners swing beyond the original bounds.
/// This returns the smallest box that contains the whole rotated image.
///
/// # Arguments
/// * `width` - Original image width
/// * `height` - Original image height
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise)
///
/// # Returns
/// Tuple of (new_width, new_height). Quarter turns produce exact results:
/// 0 and 180 preserve the dimensions, 90 and 270 swap them.
pub fn rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    // Normalize so 360, 720 and negative angles behave
    let normalized = angle_degrees.rem_euclid(360.0);

    if normalized < ANGLE_EPSILON || 360.0 - normalized < ANGLE_EPSILON {
        return (width, height);
    }
    if (normalized - 90.0).abs() < ANGLE_EPSILON || (normalized - 270.0).abs() < ANGLE_EPSILON {
        return (height, width);
    }
    if (normalized - 180.0).abs() < ANGLE_EPSILON {
        return (width, height);
    }

    let angle_rad = normalized.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    // The bounding box of a rotated rectangle is:
    // new_w = |w*cos| + |h*sin|
    // new_h = |w*sin| + |h*cos|
    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image counter-clockwise, expanding the canvas to fit.
///
/// # Arguments
/// * `image` - Source image
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise)
///
/// # Returns
/// A new image sized by [`rotated_bounds`]. 0 (or any multiple of 360)
/// returns a clone; 90, 180 and 270 use the lossless quarter-turn paths.
/// Regions outside the source are filled with black, or transparent black
/// when the source carries an alpha channel.
pub fn rotate(image: &DynamicImage, angle_degrees: f64) -> DynamicImage {
    let normalized = angle_degrees.rem_euclid(360.0);

    // Lossless fast paths for quarter turns. The image crate's rotations
    // are clockwise, so a 90 counter-clockwise turn is its rotate270.
    if normalized < ANGLE_EPSILON || 360.0 - normalized < ANGLE_EPSILON {
        return image.clone();
    }
    if (normalized - 90.0).abs() < ANGLE_EPSILON {
        return image.rotate270();
    }
    if (normalized - 180.0).abs() < ANGLE_EPSILON {
        return image.rotate180();
    }
    if (normalized - 270.0).abs() < ANGLE_EPSILON {
        return image.rotate90();
    }

    let src = image.to_rgba8();
    let (src_w, src_h) = (src.width() as f64, src.height() as f64);
    let (dst_w, dst_h) = rotated_bounds(image.width(), image.height(), normalized);

    // Negate the angle for the inverse transform so that positive input
    // angles rotate counter-clockwise on screen
    let angle_rad = -normalized.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let fill = if image.color().has_alpha() {
        [0, 0, 0, 0]
    } else {
        [0, 0, 0, 255]
    };

    let mut output = RgbaImage::new(dst_w, dst_h);
    for (dst_x, dst_y, pixel) in output.enumerate_pixels_mut() {
        let dx = dst_x as f64 - dst_cx;
        let dy = dst_y as f64 - dst_cy;

        let src_x = dx * cos - dy * sin + src_cx;
        let src_y = dx * sin + dy * cos + src_cy;

        pixel.0 = sample_bilinear(&src, src_x, src_y, fill);
    }

    DynamicImage::ImageRgba8(output)
}

/// Sample a pixel with bilinear interpolation.
///
/// Returns `fill` for coordinates outside the source image.
fn sample_bilinear(image: &RgbaImage, x: f64, y: f64, fill: [u8; 4]) -> [u8; 4] {
    let (w, h) = (image.width() as i64, image.height() as i64);

    if x < 0.0 || x >= (w - 1) as f64 || y < 0.0 || y >= (h - 1) as f64 {
        return fill;
    }

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = image.get_pixel(x0, y0).0;
    let p10 = image.get_pixel(x0 + 1, y0).0;
    let p01 = image.get_pixel(x0, y0 + 1).0;
    let p11 = image.get_pixel(x0 + 1, y0 + 1).0;

    let mut result = [0u8; 4];
    for i in 0..4 {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}


// ============================================================================
// Property-Based Tests
// ============================================================================
