use std::path::Path;

use image::{DynamicImage, GrayImage};
use tracing::debug;

use crate::error::PreprocessingError;

use super::config::FeatureConfig;
use super::grayscale::luma;
use super::hog::hog;
use super::pixels::PixelGrid;
use super::resize::resize;

/// Reads and decodes an image file. The container format is sniffed from
/// the content, so extensions such as `.jfif` work.
pub fn decode_path(path: &Path) -> Result<DynamicImage, PreprocessingError> {
    let read_err = |source| PreprocessingError::Read { path: path.to_path_buf(), source };
    let reader = image::io::Reader::open(path)
        .map_err(read_err)?
        .with_guessed_format()
        .map_err(read_err)?;
    Ok(reader.decode()?)
}

pub fn decode_bytes(bytes: &[u8]) -> Result<DynamicImage, PreprocessingError> {
    Ok(image::load_from_memory(bytes)?)
}

/// Image → fixed-length descriptor. Stateless apart from its configuration.
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    config: FeatureConfig,
}

impl FeatureExtractor {
    pub fn new(config: FeatureConfig) -> Self {
        FeatureExtractor { config }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Length of every vector `extract` returns.
    pub fn feature_len(&self) -> usize {
        self.config.feature_len()
    }

    pub fn extract_image(&self, img: &DynamicImage) -> Result<Vec<f64>, PreprocessingError> {
        self.extract(&PixelGrid::from_dynamic(img))
    }

    /// Runs channel normalization, grayscale, resize and HOG in that order.
    pub fn extract(&self, grid: &PixelGrid) -> Result<Vec<f64>, PreprocessingError> {
        let cfg = &self.config;
        // Fields are public, so a grid may not have come through `PixelGrid::new`.
        let expected = grid.width as usize * grid.height as usize * grid.channels;
        if grid.data.len() != expected {
            return Err(PreprocessingError::BufferLength { expected, actual: grid.data.len() });
        }
        let min_side = cfg.min_input_side.max(1);
        if grid.width < min_side || grid.height < min_side {
            return Err(PreprocessingError::Degenerate {
                width: grid.width,
                height: grid.height,
                min_side,
            });
        }
        if cfg.feature_len() == 0 {
            return Err(PreprocessingError::GridTooLarge {
                width: cfg.width,
                height: cfg.height,
                cell: cfg.hog.pixels_per_cell,
                block: cfg.hog.cells_per_block,
            });
        }

        let rgb = grid.to_rgb()?;
        debug!(
            width = grid.width,
            height = grid.height,
            channels = grid.channels,
            "normalized input to RGB"
        );

        let w = grid.width;
        let gray = GrayImage::from_fn(w, grid.height, |x, y| {
            image::Luma([luma(rgb[(y * w + x) as usize])])
        });
        let resized = resize(&gray, cfg.width, cfg.height, cfg.resize);
        let features = hog(&resized, &cfg.hog);

        debug!(len = features.len(), "extracted HOG descriptor");
        Ok(features)
    }
}
