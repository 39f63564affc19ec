//! Configuration structures for the hue_sort pipeline.
//!
//! This module defines all tunable parameters, organized into groups for
//! dominant color extraction, classification, and file naming.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use hue_sort::PipelineConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = PipelineConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = PipelineConfig::default();
//! # Ok::<(), hue_sort::AnalysisError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`ExtractionConfig`]: downsampling, dark-pixel filter, k-means settings
//! - [`ClassificationConfig`]: decision tree options
//! - [`NamingConfig`]: unique name generation

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{extraction, naming};
use crate::{AnalysisError, Result};

/// Complete pipeline configuration.
///
/// Can be serialized to/from JSON for reproducible runs. Missing sections
/// and fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory of photos to organize
    pub input_path: PathBuf,

    /// Directory that receives the per-category folders
    pub output_path: PathBuf,

    /// Dominant color extraction configuration
    pub extraction: ExtractionConfig,

    /// Color classification configuration
    pub classification: ClassificationConfig,

    /// Output file naming configuration
    pub naming: NamingConfig,
}

/// Dominant color extraction parameters.
///
/// Controls how an image is reduced to the pixel set that gets clustered,
/// and how the clustering itself runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of clusters requested (capped by the usable pixel count)
    pub n_colors: usize,

    /// Pixels with `r + g + b <= dark_threshold` are discarded
    pub dark_threshold: u16,

    /// Longer edge after downsampling, in pixels
    pub max_dimension: u32,

    /// Minimum pixels required after filtering
    pub min_pixels: usize,

    /// Seed for the first k-means run; run `i` uses `seed + i`
    pub seed: u64,

    /// Number of k-means initializations
    pub n_init: usize,

    /// Iteration cap for each k-means run
    pub max_iterations: usize,

    /// Convergence threshold on centroid movement
    pub tolerance: f32,
}

/// Decision tree options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Check the Brown condition before the hue branches.
    ///
    /// Off by default, which keeps Brown unreachable.
    pub brown_override: bool,
}

/// Unique name generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Fixed seed for reproducible names; random when absent
    pub seed: Option<u64>,

    /// Random draws before falling back to a category-based name
    pub max_attempts: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("input"),
            output_path: PathBuf::from("organized_by_color"),
            extraction: ExtractionConfig::default(),
            classification: ClassificationConfig::default(),
            naming: NamingConfig::default(),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            n_colors: extraction::N_COLORS,
            dark_threshold: extraction::DARK_PIXEL_SUM,
            max_dimension: extraction::MAX_DIMENSION,
            min_pixels: extraction::MIN_USABLE_PIXELS,
            seed: extraction::SEED,
            n_init: extraction::N_INIT,
            max_iterations: extraction::MAX_ITERATIONS,
            tolerance: extraction::TOLERANCE,
        }
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_attempts: naming::MAX_ATTEMPTS,
        }
    }
}

impl ExtractionConfig {
    /// Check every knob is inside its domain
    pub fn validate(&self) -> Result<()> {
        if self.n_colors == 0 || self.n_colors > extraction::MAX_CLUSTERS {
            return Err(AnalysisError::invalid("n_colors", self.n_colors));
        }
        if self.dark_threshold >= 765 {
            return Err(AnalysisError::invalid("dark_threshold", self.dark_threshold));
        }
        if self.max_dimension == 0 {
            return Err(AnalysisError::invalid("max_dimension", self.max_dimension));
        }
        if self.min_pixels == 0 {
            return Err(AnalysisError::invalid("min_pixels", self.min_pixels));
        }
        if self.n_init == 0 {
            return Err(AnalysisError::invalid("n_init", self.n_init));
        }
        if self.max_iterations == 0 {
            return Err(AnalysisError::invalid("max_iterations", self.max_iterations));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(AnalysisError::invalid("tolerance", self.tolerance));
        }
        Ok(())
    }
}

impl PipelineConfig {
    /// Validate all sections
    pub fn validate(&self) -> Result<()> {
        self.extraction.validate()?;
        if self.naming.max_attempts == 0 {
            return Err(AnalysisError::invalid(
                "max_attempts",
                self.naming.max_attempts,
            ));
        }
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AnalysisError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| AnalysisError::Config {
            message: format!("cannot parse {}: {}", path.display(), e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| AnalysisError::Config {
            message: format!("cannot serialize configuration: {}", e),
        })?;
        std::fs::write(path, json)
            .map_err(|e| AnalysisError::io(format!("cannot write {}", path.display()), e))?;
        Ok(())
    }
}
