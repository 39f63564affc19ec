//! Dominant color extraction
//!
//! Reduces an image to the single color that covers the most of it:
//! - Downsampling so the longer edge fits `max_dimension`
//! - Near-black pixel removal (borders, letterboxing, shadows)
//! - k-means clustering in RGB space, best of several seeded runs
//! - Selection of the most populated cluster (mode, not mean)

use std::collections::HashSet;
use std::path::Path;

use image::DynamicImage;
use kmeans_colors::{get_kmeans, Kmeans};
use palette::Srgb;
use tracing::debug;

use super::conversion::Rgb;
use crate::config::ExtractionConfig;
use crate::image_loader::{load_image, load_image_from_memory};
use crate::{AnalysisError, Result};

/// Outcome of a successful extraction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DominantColor {
    /// Centroid of the largest cluster, truncated to integers
    pub rgb: Rgb,
    /// Pixels left after downsampling and dark-pixel filtering
    pub pixel_count: usize,
    /// Fraction of `pixel_count` assigned to the winning cluster
    pub cluster_share: f32,
}

/// Extracts the dominant color of an image with seeded k-means
#[derive(Debug, Clone, Default)]
pub struct DominantColorExtractor {
    config: ExtractionConfig,
}

impl DominantColorExtractor {
    /// Create an extractor, rejecting out-of-range configuration
    pub fn new(config: ExtractionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Load an image file and extract its dominant color
    pub fn extract_from_path(&self, path: &Path) -> Result<DominantColor> {
        let image = load_image(path)?;
        self.extract(&image)
    }

    /// Decode an in-memory image and extract its dominant color
    pub fn extract_from_bytes(&self, bytes: &[u8]) -> Result<DominantColor> {
        let image = load_image_from_memory(bytes)?;
        self.extract(&image)
    }

    /// Extract the dominant color of a decoded image
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InsufficientPixels` when fewer than
    /// `min_pixels` pixels survive the dark-pixel filter.
    pub fn extract(&self, image: &DynamicImage) -> Result<DominantColor> {
        let pixels = self.usable_pixels(image);

        if pixels.len() < self.config.min_pixels {
            return Err(AnalysisError::InsufficientPixels {
                found: pixels.len(),
                minimum: self.config.min_pixels,
            });
        }

        let distinct = pixels.iter().copied().collect::<HashSet<Rgb>>().len();
        let k = self.config.n_colors.min(pixels.len()).min(distinct);

        let points: Vec<Srgb> = pixels.iter().map(|&p| to_point(p)).collect();
        let best = self.best_clustering(k, &points);

        let mut counts = vec![0usize; best.centroids.len()];
        for &index in &best.indices {
            counts[usize::from(index)] += 1;
        }

        // First cluster wins ties
        let mut winner = 0;
        for (index, &count) in counts.iter().enumerate() {
            if count > counts[winner] {
                winner = index;
            }
        }

        let rgb = to_rgb(best.centroids[winner]);
        let cluster_share = counts[winner] as f32 / pixels.len() as f32;

        debug!(
            pixels = pixels.len(),
            k,
            color = %rgb,
            share = cluster_share,
            "dominant color extracted"
        );

        Ok(DominantColor {
            rgb,
            pixel_count: pixels.len(),
            cluster_share,
        })
    }

    /// Downsample, flatten to RGB and drop near-black pixels
    pub fn usable_pixels(&self, image: &DynamicImage) -> Vec<Rgb> {
        let max = self.config.max_dimension;
        let rgb = if image.width() > max || image.height() > max {
            image.thumbnail(max, max).into_rgb8()
        } else {
            image.to_rgb8()
        };

        rgb.pixels()
            .map(|p| Rgb::from(p.0))
            .filter(|p| p.channel_sum() > self.config.dark_threshold)
            .collect()
    }

    /// Run k-means `n_init` times and keep the run with the lowest inertia
    fn best_clustering(&self, k: usize, points: &[Srgb]) -> Kmeans<Srgb> {
        let mut best = self.run_kmeans(k, points, self.config.seed);
        let mut lowest = inertia(points, &best);

        for run in 1..self.config.n_init {
            let candidate = self.run_kmeans(k, points, self.config.seed.wrapping_add(run as u64));
            let score = inertia(points, &candidate);
            if score < lowest {
                lowest = score;
                best = candidate;
            }
        }

        best
    }

    fn run_kmeans(&self, k: usize, points: &[Srgb], seed: u64) -> Kmeans<Srgb> {
        get_kmeans(
            k,
            self.config.max_iterations,
            self.config.tolerance,
            false,
            points,
            seed,
        )
    }
}

/// Clustering works on the 0-255 scale so the mean of identical pixels is exact
fn to_point(rgb: Rgb) -> Srgb {
    Srgb::new(f32::from(rgb.r), f32::from(rgb.g), f32::from(rgb.b))
}

/// Truncate a centroid toward zero into 8-bit channels
fn to_rgb(centroid: Srgb) -> Rgb {
    let channel = |v: f32| v.clamp(0.0, 255.0) as u8;
    Rgb::new(
        channel(centroid.red),
        channel(centroid.green),
        channel(centroid.blue),
    )
}

/// Sum of squared distances from each point to its assigned centroid
///
/// Accumulated in `f64` so close totals over many pixels stay distinct.
fn inertia(points: &[Srgb], result: &Kmeans<Srgb>) -> f64 {
    points
        .iter()
        .zip(&result.indices)
        .map(|(point, &index)| {
            let centroid = result.centroids[usize::from(index)];
            let dr = f64::from(point.red - centroid.red);
            let dg = f64::from(point.green - centroid.green);
            let db = f64::from(point.blue - centroid.blue);
            dr * dr + dg * dg + db * db
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb as Pixel, RgbImage, RgbaImage};

    fn extractor() -> DominantColorExtractor {
        DominantColorExtractor::default()
    }

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Pixel(color)))
    }

    /// Fill the first `percent_a`% of pixels (row-major) with `a`, rest with `b`
    fn two_tone(width: u32, height: u32, a: [u8; 3], b: [u8; 3], percent_a: u32) -> DynamicImage {
        let total = width * height;
        let cutoff = total * percent_a / 100;
        let img = RgbImage::from_fn(width, height, |x, y| {
            if y * width + x < cutoff {
                Pixel(a)
            } else {
                Pixel(b)
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_extractor_rejects_invalid_config() {
        let config = ExtractionConfig {
            n_colors: 0,
            ..ExtractionConfig::default()
        };
        assert!(DominantColorExtractor::new(config).is_err());
    }

    #[test]
    fn test_single_color_is_exact() {
        let image = solid(40, 30, [200, 100, 50]);
        for n_colors in [1, 2, 5, 16] {
            let config = ExtractionConfig {
                n_colors,
                ..ExtractionConfig::default()
            };
            let result = DominantColorExtractor::new(config)
                .unwrap()
                .extract(&image)
                .unwrap();
            assert_eq!(result.rgb, Rgb::new(200, 100, 50));
            assert_eq!(result.pixel_count, 1200);
            assert_eq!(result.cluster_share, 1.0);
        }
    }

    #[test]
    fn test_all_dark_image_has_no_result() {
        // channel sum 30 sits exactly on the threshold and is dropped
        let image = solid(50, 50, [10, 10, 10]);
        match extractor().extract(&image) {
            Err(AnalysisError::InsufficientPixels { found, minimum }) => {
                assert_eq!(found, 0);
                assert_eq!(minimum, 10);
            }
            other => panic!("Expected InsufficientPixels, got: {:?}", other),
        }
    }

    #[test]
    fn test_too_few_pixels() {
        let image = solid(3, 3, [255, 255, 255]);
        let err = extractor().extract(&image).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InsufficientPixels { found: 9, .. }
        ));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_dark_filter_threshold() {
        let img = RgbImage::from_fn(4, 1, |x, _| match x {
            0 => Pixel([10, 10, 10]), // sum 30, dropped
            1 => Pixel([10, 10, 11]), // sum 31, kept
            2 => Pixel([0, 0, 0]),
            _ => Pixel([255, 0, 0]),
        });
        let pixels = extractor().usable_pixels(&DynamicImage::ImageRgb8(img));
        assert_eq!(pixels, vec![Rgb::new(10, 10, 11), Rgb::new(255, 0, 0)]);
    }

    #[test]
    fn test_downsample_caps_longer_edge() {
        let image = solid(800, 400, [90, 160, 220]);
        let pixels = extractor().usable_pixels(&image);
        assert_eq!(pixels.len(), 200 * 100);
        assert!(pixels.iter().all(|&p| p == Rgb::new(90, 160, 220)));
    }

    #[test]
    fn test_small_image_is_not_upscaled() {
        let image = solid(20, 10, [90, 160, 220]);
        assert_eq!(extractor().usable_pixels(&image).len(), 200);
    }

    #[test]
    fn test_alpha_is_discarded() {
        let img = RgbaImage::from_pixel(10, 10, image::Rgba([0, 128, 255, 0]));
        let result = extractor()
            .extract(&DynamicImage::ImageRgba8(img))
            .unwrap();
        assert_eq!(result.rgb, Rgb::new(0, 128, 255));
    }

    #[test]
    fn test_mode_cluster_beats_average() {
        let a = [30, 140, 220];
        let b = [240, 200, 20];
        let image = two_tone(50, 40, a, b, 90);

        let result = extractor().extract(&image).unwrap();
        assert_eq!(result.rgb, Rgb::new(30, 140, 220));
        assert!((result.cluster_share - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_dark_border_is_ignored() {
        // 60x60 black frame around a 20x20 green square
        let img = RgbImage::from_fn(60, 60, |x, y| {
            if (20..40).contains(&x) && (20..40).contains(&y) {
                Pixel([40, 180, 60])
            } else {
                Pixel([5, 5, 5])
            }
        });
        let result = extractor().extract(&DynamicImage::ImageRgb8(img)).unwrap();
        assert_eq!(result.rgb, Rgb::new(40, 180, 60));
        assert_eq!(result.pixel_count, 400);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let img = RgbImage::from_fn(64, 48, |x, y| {
            Pixel([(x * 4) as u8, (y * 5) as u8, (x + y) as u8 + 40])
        });
        let image = DynamicImage::ImageRgb8(img);

        let first = extractor().extract(&image).unwrap();
        let second = extractor().extract(&image).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_inertia_of_perfect_fit_is_zero() {
        let points = vec![to_point(Rgb::new(10, 20, 30)); 5];
        let result = get_kmeans(1, 10, 1e-4, false, &points, 1);
        assert_eq!(inertia(&points, &result), 0.0);
    }

    #[test]
    fn test_inertia_keeps_unit_differences_at_large_totals() {
        // 40000 points at distance 100 from a single centroid: total 4e8,
        // where f32 can no longer tell totals one apart
        let centroid = Srgb::new(0.0, 0.0, 0.0);
        let mut points = vec![Srgb::new(100.0, 0.0, 0.0); 40_000];
        let result = Kmeans {
            score: 0.0,
            centroids: vec![centroid],
            indices: vec![0; points.len()],
        };
        let base = inertia(&points, &result);
        assert_eq!(base, 4e8);

        points[0] = Srgb::new(100.0, 1.0, 0.0);
        assert_eq!(inertia(&points, &result) - base, 1.0);
    }

    #[test]
    fn test_centroid_truncation() {
        assert_eq!(
            to_rgb(Srgb::new(12.99, 0.4, 254.999)),
            Rgb::new(12, 0, 254)
        );
        assert_eq!(to_rgb(Srgb::new(-3.0, 300.0, 0.0)), Rgb::new(0, 255, 0));
    }
}
