//! Default parameters and classification thresholds
//!
//! Extraction defaults are the recognized values for the configuration
//! knobs in [`crate::config::ExtractionConfig`]. Classification thresholds
//! are fixed heuristics; they are not colorimetric.

/// Dominant color extraction defaults
pub mod extraction {
    /// Number of clusters requested from k-means
    pub const N_COLORS: usize = 5;

    /// Pixels whose channel sum is at or below this are dropped as near-black
    pub const DARK_PIXEL_SUM: u16 = 30;

    /// Longer image edge after downsampling
    pub const MAX_DIMENSION: u32 = 200;

    /// Minimum pixels that must survive filtering
    pub const MIN_USABLE_PIXELS: usize = 10;

    /// Base seed for k-means initialization
    pub const SEED: u64 = 42;

    /// Number of k-means initializations; the lowest-inertia run wins
    pub const N_INIT: usize = 10;

    /// Iteration cap per k-means run
    pub const MAX_ITERATIONS: usize = 300;

    /// Centroid movement below which a run is considered converged
    pub const TOLERANCE: f32 = 1e-4;

    /// Largest k the clustering backend can label (indices are `u8`)
    pub const MAX_CLUSTERS: usize = 255;
}

/// HSV decision tree thresholds
pub mod thresholds {
    /// Saturation below which a color is treated as grayscale
    pub const GRAYSCALE_SATURATION: f64 = 0.15;

    /// Grayscale brightness bands (brightness is value × 255)
    pub const WHITE_BRIGHTNESS: f64 = 220.0;
    pub const LIGHT_GRAY_BRIGHTNESS: f64 = 170.0;
    pub const GRAY_BRIGHTNESS: f64 = 100.0;

    /// Below this brightness hue families switch to their dark variant
    pub const DARK_BRIGHTNESS: f64 = 80.0;

    /// Brown override guard
    pub const BROWN_MAX_BRIGHTNESS: f64 = 100.0;
    pub const BROWN_MAX_SATURATION: f64 = 0.5;
    pub const BROWN_HUE_RANGE: (f64, f64) = (20.0, 60.0);

    /// Lower hue edge of each family, in degrees. Red wraps through 0.
    pub const ORANGE_HUE_START: f64 = 15.0;
    pub const YELLOW_HUE_START: f64 = 45.0;
    pub const YELLOW_GREEN_HUE_START: f64 = 70.0;
    pub const GREEN_HUE_START: f64 = 90.0;
    pub const TEAL_HUE_START: f64 = 150.0;
    pub const CYAN_HUE_START: f64 = 175.0;
    pub const BLUE_HUE_START: f64 = 200.0;
    pub const PURPLE_HUE_START: f64 = 260.0;
    pub const MAGENTA_HUE_START: f64 = 290.0;
    pub const RED_HUE_START: f64 = 345.0;

    /// Saturated, bright reds read as Pink
    pub const PINK_RED_MIN_SATURATION: f64 = 0.6;
    pub const PINK_RED_MIN_BRIGHTNESS: f64 = 200.0;

    /// Orange family splits
    pub const BRIGHT_ORANGE_MIN_BRIGHTNESS: f64 = 180.0;
    pub const BRIGHT_ORANGE_MIN_SATURATION: f64 = 0.5;
    pub const TAN_MAX_SATURATION: f64 = 0.4;

    /// Yellow family splits: Yellow above both, Gold when only saturated
    pub const YELLOW_MIN_SATURATION: f64 = 0.6;
    pub const YELLOW_MIN_BRIGHTNESS: f64 = 150.0;

    /// Bright magentas read as Pink
    pub const PINK_MAGENTA_MIN_BRIGHTNESS: f64 = 180.0;
}

/// Unique name generation
pub mod naming {
    /// Random draws before falling back to a category-based name
    pub const MAX_ATTEMPTS: usize = 50;

    /// Numeric suffix range for pool names
    pub const SUFFIX_RANGE: (u32, u32) = (1, 999);

    /// Numeric suffix range for fallback names
    pub const FALLBACK_SUFFIX_RANGE: (u32, u32) = (1000, 9999);
}
