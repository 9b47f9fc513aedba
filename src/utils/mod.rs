//! Shared helpers: image loading, font discovery, and logging setup.

use std::path::Path;

use ab_glyph::FontVec;
use image::RgbImage;
use tracing_subscriber::EnvFilter;

use crate::core::errors::{PrepError, PrepResult};

/// Loads an image from disk and converts it to RGB.
///
/// # Arguments
///
/// * `path` - Path to the image file; the format is inferred from the
///   content/extension by the `image` crate.
///
/// # Returns
///
/// The decoded image as an `RgbImage`, or [`PrepError::ImageLoad`] if the
/// file cannot be read or decoded.
pub fn load_image(path: impl AsRef<Path>) -> PrepResult<RgbImage> {
    let img = image::open(path.as_ref()).map_err(PrepError::ImageLoad)?;
    Ok(img.to_rgb8())
}

/// Tries to load a TrueType font from common system locations.
///
/// Returns `None` when no font is available; callers render without text
/// annotations in that case.
pub fn load_font() -> Option<FontVec> {
    let font_paths = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/System/Library/Fonts/Helvetica.ttc",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];

    for path in &font_paths {
        if let Ok(font_data) = std::fs::read(path)
            && let Ok(font) = FontVec::try_from_vec(font_data)
        {
            return Some(font);
        }
    }

    None
}

/// Initializes tracing with an env-filter (`RUST_LOG`), defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
