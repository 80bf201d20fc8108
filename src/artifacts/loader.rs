use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::error::{ArtifactKind, ArtifactLoadCause, Error, Result};
use crate::models::{Classifier, LabelDecoder, Scaler};

use super::paths::ArtifactPaths;

/// The three trained artifacts, loaded together and never modified.
///
/// Share it behind an `Arc`; every method takes `&self`.
#[derive(Debug, Clone)]
pub struct Artifacts {
    classifier: Classifier,
    decoder: LabelDecoder,
    scaler: Scaler,
}

impl Artifacts {
    pub fn new(classifier: Classifier, decoder: LabelDecoder, scaler: Scaler) -> Self {
        Artifacts { classifier, decoder, scaler }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn decoder(&self) -> &LabelDecoder {
        &self.decoder
    }

    pub fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    /// Logs disagreements between the artifacts. They are not fatal here;
    /// prediction reports them as dimension or index errors.
    fn warn_on_skew(&self) {
        let (s, c) = (self.scaler.n_features(), self.classifier.n_features());
        if s != c {
            warn!(scaler = s, classifier = c, "scaler and classifier disagree on feature count");
        }
        let (k, labels) = (self.classifier.n_classes(), self.decoder.len());
        if k > labels {
            warn!(classes = k, labels, "classifier can emit more classes than there are labels");
        }
    }
}

fn read_artifact<T, F>(kind: ArtifactKind, path: &Path, check: F) -> Result<T>
where
    T: DeserializeOwned,
    F: FnOnce(&T) -> std::result::Result<(), String>,
{
    let file = File::open(path).map_err(|e| Error::artifact(kind, path, e))?;
    let value: T = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| Error::artifact(kind, path, e))?;
    check(&value).map_err(|msg| Error::artifact(kind, path, ArtifactLoadCause::Invalid(msg)))?;
    info!(artifact = %kind, path = %path.display(), "loaded artifact");
    Ok(value)
}

/// Loads all three artifacts from the given paths. Fails as a whole if any
/// one of them is missing, unreadable, malformed or structurally invalid.
pub fn load_model_from(paths: &ArtifactPaths) -> Result<Artifacts> {
    let classifier: Classifier =
        read_artifact(ArtifactKind::Classifier, &paths.classifier, Classifier::check_shape)?;
    let decoder: LabelDecoder =
        read_artifact(ArtifactKind::Labels, &paths.labels, LabelDecoder::check_shape)?;
    let scaler: Scaler =
        read_artifact(ArtifactKind::Scaler, &paths.scaler, Scaler::check_shape)?;

    let artifacts = Artifacts::new(classifier, decoder, scaler);
    artifacts.warn_on_skew();
    Ok(artifacts)
}

/// Loads the artifacts from the fixed default locations under `models/`.
pub fn load_model() -> Result<Artifacts> {
    load_model_from(&ArtifactPaths::default())
}
