use image::RgbaImage;
use tracing::debug;

use crate::error::{Result, SnapstripError};

/// Decode an encoded image (PNG, JPEG, anything the `image` crate sniffs)
/// into RGBA8. Format is detected from the byte content, not a file name.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage> {
    let img = image::load_from_memory(bytes).map_err(SnapstripError::Decode)?;
    let rgba = img.to_rgba8();
    debug!(
        width = rgba.width(),
        height = rgba.height(),
        bytes = bytes.len(),
        "decoded image"
    );
    Ok(rgba)
}
