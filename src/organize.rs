//! Batch organization of a photo directory by dominant color
//!
//! For every image directly inside the source directory:
//! extract → classify → copy to `<destination>/<Category>/<name>.<ext>`.
//! Images that cannot be decoded or have too few usable pixels are skipped
//! and reported; they never abort the run.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::color::{ColorCategory, ColorClassifier, DominantColorExtractor, Rgb};
use crate::config::PipelineConfig;
use crate::image_loader::is_supported_image;
use crate::naming::NameRegistry;
use crate::{AnalysisError, Result};

/// Where one image ended up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub category: ColorCategory,
    pub rgb: Rgb,
}

/// An image that produced no result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skipped {
    pub source: PathBuf,
    pub reason: String,
}

/// Summary of an organize run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrganizeReport {
    /// Number of candidate images found
    pub total: usize,
    pub placed: Vec<Placement>,
    pub skipped: Vec<Skipped>,
}

impl OrganizeReport {
    /// Number of placed images per category
    pub fn category_counts(&self) -> BTreeMap<ColorCategory, usize> {
        let mut counts = BTreeMap::new();
        for placement in &self.placed {
            *counts.entry(placement.category).or_insert(0) += 1;
        }
        counts
    }
}

/// Sorts photos into per-category folders
#[derive(Debug)]
pub struct Organizer {
    extractor: DominantColorExtractor,
    classifier: ColorClassifier,
    names: NameRegistry,
    dry_run: bool,
}

impl Organizer {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            extractor: DominantColorExtractor::new(config.extraction.clone())?,
            classifier: ColorClassifier::new(&config.classification),
            names: NameRegistry::from_config(&config.naming),
            dry_run: false,
        })
    }

    /// Compute placements without creating directories or copying files
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Names handed out so far
    pub fn names(&self) -> &NameRegistry {
        &self.names
    }

    /// Organize every image in `source` into `destination`
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Io` if the source cannot be listed, or a
    /// directory or copy in the destination fails.
    pub fn organize(&mut self, source: &Path, destination: &Path) -> Result<OrganizeReport> {
        let images = collect_images(source)?;
        let mut report = OrganizeReport {
            total: images.len(),
            ..OrganizeReport::default()
        };

        info!(count = images.len(), source = %source.display(), "found images to organize");

        if !self.dry_run {
            fs::create_dir_all(destination).map_err(|e| {
                AnalysisError::io(format!("cannot create {}", destination.display()), e)
            })?;
        }

        for (index, path) in images.iter().enumerate() {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            let dominant = match self.extractor.extract_from_path(path) {
                Ok(dominant) => dominant,
                Err(error) if error.is_recoverable() => {
                    warn!(file = %file_name, %error, "skipping image");
                    report.skipped.push(Skipped {
                        source: path.clone(),
                        reason: error.to_string(),
                    });
                    continue;
                }
                Err(error) => return Err(error),
            };

            let category = self.classifier.classify(dominant.rgb);
            let target = self.place(path, destination, category)?;

            info!(
                "[{}/{}] {} → {}/{}",
                index + 1,
                images.len(),
                file_name,
                category,
                target
                    .file_name()
                    .map(|name| name.to_string_lossy())
                    .unwrap_or_default()
            );

            report.placed.push(Placement {
                source: path.clone(),
                destination: target,
                category,
                rgb: dominant.rgb,
            });
        }

        Ok(report)
    }

    /// Pick a fresh name and copy `path` into its category folder
    fn place(&mut self, path: &Path, destination: &Path, category: ColorCategory) -> Result<PathBuf> {
        let folder = destination.join(category.as_str());
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let mut target = folder.join(format!("{}{}", self.names.generate(category), extension));
        // Names from an earlier run may already be on disk
        while target.exists() {
            target = folder.join(format!("{}{}", self.names.generate(category), extension));
        }

        if self.dry_run {
            debug!(target = %target.display(), "dry run, not copying");
            return Ok(target);
        }

        fs::create_dir_all(&folder)
            .map_err(|e| AnalysisError::io(format!("cannot create {}", folder.display()), e))?;
        fs::copy(path, &target).map_err(|e| {
            AnalysisError::io(
                format!("cannot copy {} to {}", path.display(), target.display()),
                e,
            )
        })?;

        Ok(target)
    }
}

/// List supported images directly inside `dir`, sorted by path
pub fn collect_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| AnalysisError::io(format!("cannot read {}", dir.display()), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| AnalysisError::io(format!("cannot read {}", dir.display()), e))?;
        let path = entry.path();
        if path.is_file() && is_supported_image(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
