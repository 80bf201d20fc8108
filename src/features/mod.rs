pub mod config;
pub mod extractor;
pub mod grayscale;
pub mod hog;
pub mod pixels;
pub mod resize;

pub use config::{BlockNorm, FeatureConfig, HogParams, ResizeKernel};
pub use extractor::{decode_bytes, decode_path, FeatureExtractor};
pub use pixels::PixelGrid;
