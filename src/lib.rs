pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod models;
pub mod features;
pub mod artifacts;
pub mod advice;
pub mod pipeline;
pub mod logger;

// Convenience re-exports
pub use error::{Error, PreprocessingError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::network::Network;
pub use models::{Classifier, Label, LabelDecoder, Scaler};
pub use features::{FeatureConfig, FeatureExtractor, PixelGrid};
pub use artifacts::{load_model, load_model_from, ArtifactPaths, Artifacts};
pub use advice::DiseaseAdvice;
pub use pipeline::{predict, Diagnosis, ImageSource, PipelineConfig, Predictor};
