use std::path::Path;
use std::sync::Arc;

use image::DynamicImage;
use serde::Serialize;
use tracing::{debug, info};

use crate::advice::{self, DiseaseAdvice};
use crate::artifacts::{load_model_from, Artifacts};
use crate::error::Result;
use crate::features::{decode_bytes, decode_path, FeatureExtractor, PixelGrid};
use crate::models::Label;

use super::config::PipelineConfig;

/// A reference to an encoded raster image.
#[derive(Debug, Clone, Copy)]
pub enum ImageSource<'a> {
    Path(&'a Path),
    Bytes(&'a [u8]),
}

impl<'a> From<&'a Path> for ImageSource<'a> {
    fn from(p: &'a Path) -> Self {
        ImageSource::Path(p)
    }
}

impl<'a> From<&'a [u8]> for ImageSource<'a> {
    fn from(b: &'a [u8]) -> Self {
        ImageSource::Bytes(b)
    }
}

/// A prediction plus whatever guidance exists for it.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnosis {
    pub label: Label,
    pub advice: Option<&'static DiseaseAdvice>,
}

/// Image → label, over artifacts loaded once and shared read-only.
///
/// Cloning is cheap and every clone reads the same `Arc<Artifacts>`, so one
/// predictor can serve any number of threads.
#[derive(Debug, Clone)]
pub struct Predictor {
    artifacts: Arc<Artifacts>,
    extractor: FeatureExtractor,
}

impl Predictor {
    pub fn new(artifacts: Arc<Artifacts>, extractor: FeatureExtractor) -> Self {
        Predictor { artifacts, extractor }
    }

    /// Loads the artifacts named by `config` and wires up the extractor.
    pub fn load(config: &PipelineConfig) -> Result<Self> {
        let artifacts = load_model_from(&config.artifacts)?;
        let extractor = FeatureExtractor::new(config.features.clone());
        info!(
            features = extractor.feature_len(),
            labels = artifacts.decoder().len(),
            "predictor ready"
        );
        Ok(Predictor::new(Arc::new(artifacts), extractor))
    }

    pub fn artifacts(&self) -> &Arc<Artifacts> {
        &self.artifacts
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    pub fn predict(&self, source: ImageSource<'_>) -> Result<Label> {
        let img = match source {
            ImageSource::Path(p)  => decode_path(p)?,
            ImageSource::Bytes(b) => decode_bytes(b)?,
        };
        self.predict_image(&img)
    }

    pub fn predict_path(&self, path: impl AsRef<Path>) -> Result<Label> {
        self.predict(ImageSource::Path(path.as_ref()))
    }

    pub fn predict_bytes(&self, bytes: &[u8]) -> Result<Label> {
        self.predict(ImageSource::Bytes(bytes))
    }

    pub fn predict_image(&self, img: &DynamicImage) -> Result<Label> {
        self.predict_pixels(&PixelGrid::from_dynamic(img))
    }

    /// Extract → scale → classify → decode.
    pub fn predict_pixels(&self, grid: &PixelGrid) -> Result<Label> {
        let features = self.extractor.extract(grid)?;
        self.predict_features(&features)
    }

    /// The post-extraction half of the chain, for callers that already hold
    /// a descriptor.
    pub fn predict_features(&self, features: &[f64]) -> Result<Label> {
        let scaled = self.artifacts.scaler().transform(features)?;
        let index = self.artifacts.classifier().predict(&scaled)?;
        let label = self.artifacts.decoder().decode(index)?;
        debug!(index, label = %label, "classified");
        Ok(label)
    }

    pub fn diagnose(&self, source: ImageSource<'_>) -> Result<Diagnosis> {
        let label = self.predict(source)?;
        let advice = advice::lookup(label.as_str());
        Ok(Diagnosis { label, advice })
    }
}

/// One-shot entry point: loads the artifacts from the default (or
/// `$CROPSCAN_MODEL_DIR`) location and predicts a single image. Callers that
/// predict repeatedly should build a `Predictor` once instead.
pub fn predict(source: ImageSource<'_>) -> Result<Label> {
    Predictor::load(&PipelineConfig::from_env()?)?.predict(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Stage};
    use crate::math::matrix::Matrix;
    use crate::models::{Classifier, LabelDecoder, LinearModel, Scaler};

    /// Two features through an identity scaler; class 1 iff x0 > x1.
    fn tiny() -> Predictor {
        let artifacts = Artifacts::new(
            Classifier::Linear(LinearModel {
                coef: Matrix::from_data(vec![vec![1.0, -1.0]]),
                intercept: vec![0.0],
            }),
            LabelDecoder::new(vec!["Healthy".into(), "Hispa".into()]),
            Scaler::Standard { mean: vec![0.0, 0.0], scale: vec![1.0, 1.0] },
        );
        Predictor::new(Arc::new(artifacts), FeatureExtractor::default())
    }

    #[test]
    fn features_flow_through_scaler_classifier_decoder() {
        let p = tiny();
        assert_eq!(p.predict_features(&[2.0, 1.0]).unwrap().as_str(), "hispa");
        assert_eq!(p.predict_features(&[1.0, 2.0]).unwrap().as_str(), "healthy");
    }

    #[test]
    fn extractor_output_that_skews_from_scaler_is_reported() {
        let p = tiny();
        let grid = PixelGrid::new(16, 16, 1, vec![9; 256]).unwrap();
        match p.predict_pixels(&grid) {
            Err(Error::DimensionMismatch { stage: Stage::Scaler, expected: 2, actual: 8100 }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn inconsistent_pixel_grid_is_an_error_not_a_panic() {
        let grid = PixelGrid { width: 16, height: 16, channels: 3, data: vec![0; 3] };
        let err = tiny().predict_pixels(&grid).unwrap_err();
        assert!(matches!(
            err,
            Error::Preprocessing(crate::error::PreprocessingError::BufferLength { expected: 768, actual: 3 })
        ));
        assert!(!err.is_configuration_fault());
    }

    #[test]
    fn predictor_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Predictor>();
    }
}
