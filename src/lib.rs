//! # Hue Sort
//!
//! A Rust crate for sorting photographs by their dominant color.
//!
//! This library reduces an image to a named color category by:
//! - Downsampling and discarding near-black pixels
//! - Clustering the remaining pixels with seeded k-means
//! - Taking the centroid of the most populated cluster
//! - Walking a fixed hue/saturation/brightness decision tree
//!
//! ## Example
//!
//! ```rust,no_run
//! use hue_sort::{analyze_image, PipelineConfig};
//! use std::path::Path;
//!
//! let result = analyze_image(Path::new("photo.jpg"), &PipelineConfig::default())?;
//! println!("{} ({})", result.category, result.hex);
//! # Ok::<(), hue_sort::AnalysisError>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod image_loader;
pub mod naming;
pub mod organize;

pub use color::{
    classify, ColorCategory, ColorClassifier, ColorConverter, DominantColor,
    DominantColorExtractor, Hsv, Rgb,
};
pub use config::{ClassificationConfig, ExtractionConfig, NamingConfig, PipelineConfig};
pub use error::{AnalysisError, Result};
pub use naming::NameRegistry;
pub use organize::{collect_images, OrganizeReport, Organizer};

/// Complete analysis of one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorResult {
    /// Dominant color
    pub rgb: Rgb,
    /// Hexadecimal color representation
    pub hex: String,
    /// HSV form used by the classifier
    pub hsv: Hsv,
    /// Assigned category
    pub category: ColorCategory,
    /// Usable pixels after downsampling and dark-pixel filtering
    pub pixel_count: usize,
    /// Fraction of usable pixels in the winning cluster
    pub cluster_share: f32,
}

impl ColorResult {
    /// Classify an extracted dominant color
    pub fn from_dominant(dominant: DominantColor, classifier: &ColorClassifier) -> Self {
        let converter = ColorConverter::new();
        Self {
            rgb: dominant.rgb,
            hex: converter.rgb_to_hex(dominant.rgb),
            hsv: converter.rgb_to_hsv(dominant.rgb),
            category: classifier.classify(dominant.rgb),
            pixel_count: dominant.pixel_count,
            cluster_share: dominant.cluster_share,
        }
    }
}

/// Analyze an image file
///
/// This is the main entry point for single-image analysis: extraction
/// followed by classification, both driven by `config`.
///
/// # Errors
///
/// Returns `AnalysisError` if:
/// - The configuration is out of range
/// - The image cannot be loaded or decoded
/// - Too few pixels remain after dark-pixel filtering
pub fn analyze_image(image_path: &Path, config: &PipelineConfig) -> Result<ColorResult> {
    let extractor = DominantColorExtractor::new(config.extraction.clone())?;
    let dominant = extractor.extract_from_path(image_path)?;
    Ok(ColorResult::from_dominant(
        dominant,
        &ColorClassifier::new(&config.classification),
    ))
}

/// Analyze an encoded image held in memory
pub fn analyze_bytes(bytes: &[u8], config: &PipelineConfig) -> Result<ColorResult> {
    let extractor = DominantColorExtractor::new(config.extraction.clone())?;
    let dominant = extractor.extract_from_bytes(bytes)?;
    Ok(ColorResult::from_dominant(
        dominant,
        &ColorClassifier::new(&config.classification),
    ))
}
