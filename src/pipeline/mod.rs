//! The marker-crop dataset transform.
//!
//! Walks a dataset root laid out as one subdirectory per class label,
//! detects the marker in each photograph, crops a padded box around it,
//! resizes the crop to the target resolution, and writes the result under
//! the same class/filename in a mirrored output tree.
//!
//! Unreadable images and images without a detectable marker are logged and
//! skipped; neither halts the batch. Writes are not transactional, but
//! re-running over the same inputs produces byte-identical outputs.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;
use image::imageops::{self, FilterType};
use tracing::{debug, info, warn};

use crate::core::errors::{PrepError, PrepResult};
use crate::core::validation::validate_positive_dimensions;
use crate::processors::{HsvRange, detect_marker};
use crate::utils::load_image;

/// Configuration for the marker-crop transform.
///
/// The defaults reproduce the historical hardcoded policy: the pink-marker
/// HSV band, 10 pixels of padding, and a 160x160 output resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreprocessConfig {
    /// HSV band selecting marker pixels.
    pub hsv_range: HsvRange,
    /// Padding added on every side of the detected box, in pixels.
    pub pad: u32,
    /// Output resolution as (width, height).
    pub target_size: (u32, u32),
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            hsv_range: HsvRange::pink_marker(),
            pad: 10,
            target_size: (160, 160),
        }
    }
}

impl PreprocessConfig {
    /// Checks the configuration for structural problems.
    pub fn validate(&self) -> PrepResult<()> {
        validate_positive_dimensions(self.target_size.0, self.target_size.1)?;
        if self.hsv_range.is_inverted() {
            return Err(PrepError::invalid_input(
                "HSV range has a lower bound greater than its upper bound",
            ));
        }
        Ok(())
    }
}

/// Counters reported after a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreprocessSummary {
    /// Images cropped, resized, and written.
    pub processed: usize,
    /// Files that could not be decoded as images.
    pub skipped_unreadable: usize,
    /// Images in which no marker pixel was found.
    pub skipped_no_marker: usize,
}

/// Single-image and batch marker-crop transform.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    config: PreprocessConfig,
}

impl Preprocessor {
    /// Creates a preprocessor after validating `config`.
    pub fn new(config: PreprocessConfig) -> PrepResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Creates a preprocessor with the default policy.
    pub fn with_defaults() -> Self {
        Self {
            config: PreprocessConfig::default(),
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    /// Applies the transform to a single decoded image.
    ///
    /// Returns the cropped-and-resized image, or `None` when no marker was
    /// detected (the caller decides how to log the skip).
    pub fn process_image(&self, image: &RgbImage) -> Option<RgbImage> {
        let bbox = detect_marker(image, &self.config.hsv_range)?;
        let padded = bbox.padded(self.config.pad, image.width(), image.height());
        let cropped =
            imageops::crop_imm(image, padded.x, padded.y, padded.width, padded.height).to_image();
        let (width, height) = self.config.target_size;
        Some(imageops::resize(&cropped, width, height, FilterType::Triangle))
    }

    /// Runs the transform over every image of every class subdirectory.
    ///
    /// Class subdirectories are visited in name order; non-directory entries
    /// at the dataset root are ignored. The output class directory is created
    /// on demand and each successful crop is written under the original
    /// filename. Skips are logged and counted; only structural failures
    /// (unreadable root, failed write) abort the batch.
    pub fn run(&self, data_dir: &Path, output_dir: &Path) -> PrepResult<PreprocessSummary> {
        if !data_dir.is_dir() {
            return Err(PrepError::invalid_input(format!(
                "dataset root is not a directory: {}",
                data_dir.display()
            )));
        }
        fs::create_dir_all(output_dir)?;

        let mut summary = PreprocessSummary::default();

        for class_dir in sorted_entries(data_dir)? {
            if !class_dir.is_dir() {
                continue;
            }
            let Some(class_name) = class_dir.file_name() else {
                continue;
            };
            let output_class_dir = output_dir.join(class_name);
            fs::create_dir_all(&output_class_dir)?;

            for img_path in sorted_entries(&class_dir)? {
                if !img_path.is_file() {
                    continue;
                }
                self.process_file(&img_path, &output_class_dir, &mut summary)?;
            }
        }

        info!(
            "preprocessing complete: {} written, {} unreadable, {} without marker",
            summary.processed, summary.skipped_unreadable, summary.skipped_no_marker
        );
        Ok(summary)
    }

    fn process_file(
        &self,
        img_path: &Path,
        output_class_dir: &Path,
        summary: &mut PreprocessSummary,
    ) -> PrepResult<()> {
        let image = match load_image(img_path) {
            Ok(image) => image,
            Err(e) => {
                warn!("skipping unreadable image {}: {}", img_path.display(), e);
                summary.skipped_unreadable += 1;
                return Ok(());
            }
        };

        let Some(result) = self.process_image(&image) else {
            warn!("no marker found in {}", img_path.display());
            summary.skipped_no_marker += 1;
            return Ok(());
        };

        let Some(file_name) = img_path.file_name() else {
            return Ok(());
        };
        let save_path = output_class_dir.join(file_name);
        result.save(&save_path).map_err(|source| PrepError::ImageSave {
            path: save_path.clone(),
            source,
        })?;
        debug!("wrote {}", save_path.display());
        summary.processed += 1;
        Ok(())
    }
}

/// Directory entries sorted by path for deterministic traversal order.
fn sorted_entries(dir: &Path) -> PrepResult<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .collect();
    entries.sort();
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const PINK: Rgb<u8> = Rgb([255, 0, 255]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    fn marker_image(w: u32, h: u32) -> RgbImage {
        let mut img = RgbImage::from_pixel(w, h, WHITE);
        for y in 20..60 {
            for x in 30..80 {
                img.put_pixel(x, y, PINK);
            }
        }
        img
    }

    #[test]
    fn test_process_image_resizes_to_target() {
        let preprocessor = Preprocessor::with_defaults();
        let out = preprocessor.process_image(&marker_image(120, 100)).unwrap();
        assert_eq!((out.width(), out.height()), (160, 160));
    }

    #[test]
    fn test_process_image_without_marker() {
        let preprocessor = Preprocessor::with_defaults();
        let blank = RgbImage::from_pixel(64, 64, WHITE);
        assert!(preprocessor.process_image(&blank).is_none());
    }

    #[test]
    fn test_config_rejects_zero_target() {
        let config = PreprocessConfig {
            target_size: (0, 160),
            ..Default::default()
        };
        assert!(Preprocessor::new(config).is_err());
    }

    #[test]
    fn test_config_rejects_inverted_range() {
        let config = PreprocessConfig {
            hsv_range: HsvRange::new([170, 50, 50], [140, 255, 255]),
            ..Default::default()
        };
        assert!(Preprocessor::new(config).is_err());
    }

    #[test]
    fn test_run_mirrors_class_tree_and_skips() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();

        let class_a = input.path().join("A");
        let class_b = input.path().join("B");
        fs::create_dir_all(&class_a).unwrap();
        fs::create_dir_all(&class_b).unwrap();

        marker_image(120, 100).save(class_a.join("sign.png")).unwrap();
        RgbImage::from_pixel(64, 64, WHITE)
            .save(class_b.join("blank.png"))
            .unwrap();
        // Corrupt file and a stray non-directory root entry.
        fs::write(class_a.join("broken.png"), b"not an image").unwrap();
        fs::write(input.path().join("README.txt"), b"ignored").unwrap();

        let summary = Preprocessor::with_defaults()
            .run(input.path(), output.path())
            .unwrap();

        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped_unreadable, 1);
        assert_eq!(summary.skipped_no_marker, 1);

        let out_a = output.path().join("A").join("sign.png");
        assert!(out_a.is_file());
        assert!(!output.path().join("B").join("blank.png").exists());

        let written = load_image(&out_a).unwrap();
        assert_eq!((written.width(), written.height()), (160, 160));
    }

    #[test]
    fn test_run_is_idempotent() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();

        let class_a = input.path().join("A");
        fs::create_dir_all(&class_a).unwrap();
        marker_image(150, 130).save(class_a.join("sign.png")).unwrap();

        let preprocessor = Preprocessor::with_defaults();
        preprocessor.run(input.path(), output.path()).unwrap();
        let first = fs::read(output.path().join("A").join("sign.png")).unwrap();

        preprocessor.run(input.path(), output.path()).unwrap();
        let second = fs::read(output.path().join("A").join("sign.png")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_run_rejects_missing_root() {
        let output = tempfile::tempdir().unwrap();
        let result =
            Preprocessor::with_defaults().run(Path::new("/nonexistent/data"), output.path());
        assert!(matches!(result, Err(PrepError::InvalidInput { .. })));
    }
}
