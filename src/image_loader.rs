//! Unified image loading with support for multiple formats
//!
//! This module provides a single entry point for loading images from disk or
//! from an in-memory blob. Decoding is done by the `image` crate.
//!
//! ## Supported Formats
//!
//! - JPEG, PNG, GIF (first frame), WebP, TIFF, BMP, ICO, TGA, EXR, PNM, QOI,
//!   DDS, HDR
//!
//! Every decoder failure, including a missing or unreadable file, is reported
//! as [`AnalysisError::DecodeFailure`] so batch callers can skip the item.

use crate::error::{AnalysisError, Result};
use image::{DynamicImage, ImageReader};
use std::path::Path;

/// Lowercase extensions of the formats the `image` crate decodes here
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "tiff", "tif", "bmp", "ico", "tga", "exr", "pbm", "pgm",
    "ppm", "pnm", "qoi", "dds", "hdr",
];

/// Load and decode an image file
///
/// The format is sniffed from the file contents, so a misnamed file still
/// decodes as long as its bytes are a supported format.
///
/// # Errors
///
/// Returns `AnalysisError::DecodeFailure` if:
/// - File cannot be opened
/// - Format is not recognized
/// - Decoding fails
///
/// # Example
///
/// ```rust,no_run
/// use hue_sort::image_loader::load_image;
/// use std::path::Path;
///
/// let img = load_image(Path::new("photo.jpg"))?;
/// println!("Loaded image: {}x{}", img.width(), img.height());
/// # Ok::<(), hue_sort::AnalysisError>(())
/// ```
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let reader = ImageReader::open(path)
        .map_err(|e| {
            AnalysisError::decode(format!("Failed to open image file: {}", path.display()), e)
        })?
        .with_guessed_format()
        .map_err(|e| {
            AnalysisError::decode(format!("Failed to read image file: {}", path.display()), e)
        })?;

    reader.decode().map_err(|e| {
        AnalysisError::decode(format!("Failed to decode image: {}", path.display()), e)
    })
}

/// Decode an image held in memory
pub fn load_image_from_memory(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes)
        .map_err(|e| AnalysisError::decode("Failed to decode image blob", e))
}

/// Get list of all supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    SUPPORTED_EXTENSIONS
}

/// Check if a path names a supported image by its extension, ignoring case
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
}
