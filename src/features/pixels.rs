use image::{ColorType, DynamicImage};

use crate::error::PreprocessingError;

/// Interleaved 8-bit pixel grid as handed over by a caller or a decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    pub width: u32,
    pub height: u32,
    pub channels: usize,
    pub data: Vec<u8>,
}

impl PixelGrid {
    /// Wraps a raw buffer, checking that its length matches the geometry.
    pub fn new(width: u32, height: u32, channels: usize, data: Vec<u8>) -> Result<Self, PreprocessingError> {
        let expected = width as usize * height as usize * channels;
        if data.len() != expected {
            return Err(PreprocessingError::BufferLength { expected, actual: data.len() });
        }
        Ok(PixelGrid { width, height, channels, data })
    }

    /// Converts a decoded image to 8-bit luma, RGB or RGBA. Luma+alpha
    /// loses its alpha, and wider sample types are narrowed by `image`.
    pub fn from_dynamic(img: &DynamicImage) -> Self {
        let (width, height) = (img.width(), img.height());
        let (channels, data) = match img.color() {
            ColorType::L8 | ColorType::L16 | ColorType::La8 | ColorType::La16 => {
                (1, img.to_luma8().into_raw())
            }
            ColorType::Rgba8 | ColorType::Rgba16 | ColorType::Rgba32F => {
                (4, img.to_rgba8().into_raw())
            }
            _ => (3, img.to_rgb8().into_raw()),
        };
        PixelGrid { width, height, channels, data }
    }

    /// Collapses the grid to 3-channel RGB: alpha is dropped, luma is
    /// broadcast.
    pub fn to_rgb(&self) -> Result<Vec<[u8; 3]>, PreprocessingError> {
        let rgb = match self.channels {
            1 => self.data.iter().map(|&v| [v, v, v]).collect(),
            3 => self.data.chunks_exact(3).map(|p| [p[0], p[1], p[2]]).collect(),
            4 => self.data.chunks_exact(4).map(|p| [p[0], p[1], p[2]]).collect(),
            n => return Err(PreprocessingError::UnsupportedChannels(n)),
        };
        Ok(rgb)
    }
}
