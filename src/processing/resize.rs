//! Resize geometry calculations
//!
//! Computes target dimensions that fit within a bounding box while
//! preserving the aspect ratio. Pixel resampling itself is delegated to the
//! codec layer; this module only does the math.

use crate::error::{BatchError, Result};

/// Compute the target dimensions for an image bounded by `max_width` x `max_height`
///
/// Images already within the bounding box are returned unchanged; upscaling
/// never happens. Otherwise both sides are scaled by the smaller of the two
/// axis ratios and truncated toward zero, which keeps the result inside the
/// box to within integer-truncation error.
pub fn compute_target_size(
    width: u32,
    height: u32,
    max_width: u32,
    max_height: u32,
) -> Result<(u32, u32)> {
    if width == 0 || height == 0 {
        return Err(BatchError::config(format!(
            "image dimensions must be positive, got: {width}x{height}"
        )));
    }
    if max_width == 0 || max_height == 0 {
        return Err(BatchError::config(format!(
            "maximum dimensions must be positive, got: {max_width}x{max_height}"
        )));
    }

    if width <= max_width && height <= max_height {
        return Ok((width, height));
    }

    let width_scale = f64::from(max_width) / f64::from(width);
    let height_scale = f64::from(max_height) / f64::from(height);
    let scale = width_scale.min(height_scale);

    let new_width = (f64::from(width) * scale).floor() as u32;
    let new_height = (f64::from(height) * scale).floor() as u32;

    // A very skewed aspect ratio can truncate a side to zero
    Ok((new_width.max(1), new_height.max(1)))
}
