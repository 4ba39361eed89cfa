//! Image transformation operations: crop, resize, and rotation.
//!
//! These are the committing edits. Each one produces a new image that the
//! session then stores as both the working and the original buffer, unlike
//! the filter pipeline which only re-derives the working buffer.
//!
//! # Coordinate System
//!
//! - Crop regions are absolute pixel coordinates, origin at the top-left
//! - Rotation angles are in degrees, positive = counter-clockwise

mod crop;
mod resize;
mod rotate;

pub use crop::{crop, CropRegion};
pub use resize::{resize, ResampleFilter};
pub use rotate::{rotate, rotated_bounds};

use thiserror::Error;

/// Error types for transform operations.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The requested output size has a zero dimension.
    #[error("target size {width}x{height} has a zero dimension")]
    ZeroSize {
        /// Requested output width.
        width: u32,
        /// Requested output height.
        height: u32,
    },

    /// The crop region starts outside the image.
    #[error("crop region lies outside the {width}x{height} image")]
    OutOfBounds {
        /// Source image width.
        width: u32,
        /// Source image height.
        height: u32,
    },
}
