//! Color extraction, conversion and classification
//!
//! This module handles reduction of an image to its dominant color,
//! RGB/HSV conversion, and mapping of colors to named categories.

pub mod analysis;
pub mod classification;
pub mod conversion;

pub use analysis::{DominantColor, DominantColorExtractor};
pub use classification::{classify, ColorCategory, ColorClassifier};
pub use conversion::{ColorConverter, Hsv, Rgb};
