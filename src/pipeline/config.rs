use std::path::Path;

use crate::artifacts::paths::{self, ArtifactPaths};
use crate::error::{ArtifactKind, Error, Result};
use crate::features::FeatureConfig;

/// Optional feature settings stored next to the artifacts.
pub const PIPELINE_FILE: &str = "pipeline.json";

/// Everything a `Predictor` needs besides the loaded artifacts themselves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineConfig {
    pub features: FeatureConfig,
    pub artifacts: ArtifactPaths,
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Artifacts under `dir`, with feature settings from `dir/pipeline.json`
    /// when that file exists and the reference settings otherwise.
    pub fn from_model_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let pipeline_file = dir.join(PIPELINE_FILE);
        let features = if pipeline_file.is_file() {
            FeatureConfig::load_json(&pipeline_file)
                .map_err(|e| Error::artifact(ArtifactKind::FeatureConfig, &pipeline_file, e))?
        } else {
            FeatureConfig::default()
        };
        Ok(PipelineConfig { features, artifacts: ArtifactPaths::from_dir(dir) })
    }

    /// `from_model_dir` on `$CROPSCAN_MODEL_DIR`, or on `models/`.
    pub fn from_env() -> Result<Self> {
        PipelineConfig::from_model_dir(paths::model_dir())
    }
}

#[derive(Default)]
pub struct PipelineConfigBuilder {
    features: Option<FeatureConfig>,
    artifacts: Option<ArtifactPaths>,
}

impl PipelineConfigBuilder {
    pub fn features(mut self, features: FeatureConfig) -> Self {
        self.features = Some(features);
        self
    }

    pub fn artifacts(mut self, artifacts: ArtifactPaths) -> Self {
        self.artifacts = Some(artifacts);
        self
    }

    pub fn model_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.artifacts = Some(ArtifactPaths::from_dir(dir));
        self
    }

    pub fn build(self) -> PipelineConfig {
        PipelineConfig {
            features: self.features.unwrap_or_default(),
            artifacts: self.artifacts.unwrap_or_default(),
        }
    }
}
