pub mod config;
pub mod predictor;

pub use config::{PipelineConfig, PipelineConfigBuilder, PIPELINE_FILE};
pub use predictor::{predict, Diagnosis, ImageSource, Predictor};
