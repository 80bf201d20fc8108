use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const MODEL_DIR: &str = "models";
pub const CLASSIFIER_FILE: &str = "best_model.json";
pub const LABELS_FILE: &str = "labels.json";
pub const SCALER_FILE: &str = "scaler.json";

/// Environment variable that relocates the artifact directory.
pub const MODEL_DIR_ENV: &str = "CROPSCAN_MODEL_DIR";

/// Where the three trained artifacts live on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    pub classifier: PathBuf,
    pub labels: PathBuf,
    pub scaler: PathBuf,
}

impl ArtifactPaths {
    /// The standard file names under `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        ArtifactPaths {
            classifier: dir.join(CLASSIFIER_FILE),
            labels:     dir.join(LABELS_FILE),
            scaler:     dir.join(SCALER_FILE),
        }
    }

    /// The standard file names under `model_dir()`.
    pub fn from_env() -> Self {
        ArtifactPaths::from_dir(model_dir())
    }
}

/// `$CROPSCAN_MODEL_DIR` when set and non-empty, `models/` otherwise.
pub fn model_dir() -> PathBuf {
    std::env::var_os(MODEL_DIR_ENV)
        .filter(|d| !d.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(MODEL_DIR))
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        ArtifactPaths::from_dir(MODEL_DIR)
    }
}
