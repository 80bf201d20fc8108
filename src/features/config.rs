use std::path::Path;

use serde::{Deserialize, Serialize};

/// Per-block normalization applied to the concatenated cell histograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockNorm {
    L1,
    L1Sqrt,
    L2,
    /// L2, clip at 0.2, L2 again.
    L2Hys,
}

/// Resampling used to bring every image to the target resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeKernel {
    /// Fixed-point bilinear with half-pixel centres and edge clamping.
    Bilinear,
    Triangle,
    CatmullRom,
    Lanczos3,
}

/// Histogram-of-oriented-gradients parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HogParams {
    pub orientations: usize,
    /// Square cell side in pixels.
    pub pixels_per_cell: u32,
    /// Square block side in cells.
    pub cells_per_block: u32,
    pub block_norm: BlockNorm,
}

impl Default for HogParams {
    fn default() -> Self {
        HogParams {
            orientations:    9,
            pixels_per_cell: 8,
            cells_per_block: 2,
            block_norm:      BlockNorm::L2Hys,
        }
    }
}

/// Everything that determines the feature vector for a given image.
///
/// These values are part of the artifact contract: the scaler and
/// classifier only make sense for vectors produced with the same settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureConfig {
    pub width: u32,
    pub height: u32,
    pub resize: ResizeKernel,
    pub hog: HogParams,
    /// Inputs with a side shorter than this are rejected as degenerate.
    pub min_input_side: u32,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        FeatureConfig {
            width:          128,
            height:         128,
            resize:         ResizeKernel::Bilinear,
            hog:            HogParams::default(),
            min_input_side: 8,
        }
    }
}

impl FeatureConfig {
    /// Cells along (rows, cols) after resizing.
    pub fn cell_grid(&self) -> (usize, usize) {
        match self.hog.pixels_per_cell {
            0 => (0, 0),
            c => ((self.height / c) as usize, (self.width / c) as usize),
        }
    }

    /// Overlapping blocks along (rows, cols); zero when the grid is too small.
    pub fn block_grid(&self) -> (usize, usize) {
        let (rows, cols) = self.cell_grid();
        let b = self.hog.cells_per_block as usize;
        ((rows + 1).saturating_sub(b), (cols + 1).saturating_sub(b))
    }

    /// Length of every feature vector this configuration produces.
    pub fn feature_len(&self) -> usize {
        let (br, bc) = self.block_grid();
        let b = self.hog.cells_per_block as usize;
        br * bc * b * b * self.hog.orientations
    }

    /// Serializes the configuration to a pretty-printed JSON file.
    pub fn save_json(&self, path: &Path) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Deserializes a configuration previously written by `save_json`.
    pub fn load_json(path: &Path) -> std::io::Result<FeatureConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
