use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which artifact file an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Classifier,
    Labels,
    Scaler,
    /// The optional `pipeline.json` feature settings.
    FeatureConfig,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Classifier => write!(f, "classifier"),
            ArtifactKind::Labels     => write!(f, "label decoder"),
            ArtifactKind::Scaler     => write!(f, "scaler"),
            ArtifactKind::FeatureConfig => write!(f, "feature configuration"),
        }
    }
}

/// Pipeline stage that checks vector dimensionality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Scaler,
    Classifier,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Scaler     => write!(f, "scaler"),
            Stage::Classifier => write!(f, "classifier"),
        }
    }
}

/// Underlying reason an artifact file could not be turned into a usable model.
#[derive(Error, Debug)]
pub enum ArtifactLoadCause {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid contents: {0}")]
    Invalid(String),
}

/// Failures local to one image: reading, decoding, or a layout the extractor
/// cannot normalize.
#[derive(Error, Debug)]
pub enum PreprocessingError {
    #[error("failed to read image {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("unsupported channel count {0} (expected 1, 3 or 4)")]
    UnsupportedChannels(usize),

    #[error("degenerate image {width}x{height}: each side must be at least {min_side} px")]
    Degenerate {
        width: u32,
        height: u32,
        min_side: u32,
    },

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferLength { expected: usize, actual: usize },

    #[error("{width}x{height} image is too small for {cell}px cells grouped {block}x{block}")]
    GridTooLarge {
        width: u32,
        height: u32,
        cell: u32,
        block: u32,
    },
}

/// Every way a prediction can fail.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to load {kind} artifact from {}: {source}", .path.display())]
    ArtifactLoad {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: ArtifactLoadCause,
    },

    #[error("preprocessing failed: {0}")]
    Preprocessing(#[from] PreprocessingError),

    #[error("{stage} expects {expected} features, got {actual}")]
    DimensionMismatch {
        stage: Stage,
        expected: usize,
        actual: usize,
    },

    #[error("class index {index} is outside the {known} known labels")]
    UnknownIndex { index: usize, known: usize },
}

impl Error {
    pub(crate) fn artifact(
        kind: ArtifactKind,
        path: impl Into<PathBuf>,
        source: impl Into<ArtifactLoadCause>,
    ) -> Self {
        Error::ArtifactLoad { kind, path: path.into(), source: source.into() }
    }

    /// True for faults caused by the artifacts or their configuration, which
    /// will recur on every call until the deployment is fixed. False for
    /// faults tied to the single image that was submitted.
    pub fn is_configuration_fault(&self) -> bool {
        !matches!(self, Error::Preprocessing(_))
    }

    /// Short machine-readable tag used by the HTTP API.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Error::ArtifactLoad { .. }      => "artifact_load",
            Error::Preprocessing(_)         => "preprocessing",
            Error::DimensionMismatch { .. } => "dimension_mismatch",
            Error::UnknownIndex { .. }      => "unknown_index",
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Preprocessing(PreprocessingError::Decode(e))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
