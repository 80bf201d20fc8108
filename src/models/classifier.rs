use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, Stage};
use crate::network::Network;

use super::forest::ForestModel;
use super::linear::LinearModel;
use super::svm::SupportVectorModel;

/// The trained decision function, tagged by `kind` in `best_model.json`.
///
/// Which algorithm was selected at training time is opaque to the pipeline;
/// each variant only has to map a scaled vector to a class index the same
/// way every time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    Linear(LinearModel),
    Svc(SupportVectorModel),
    Forest(ForestModel),
    Mlp(Network),
}

impl Classifier {
    /// Input dimensionality the classifier was fit on.
    pub fn n_features(&self) -> usize {
        match self {
            Classifier::Linear(m) => m.n_features(),
            Classifier::Svc(m)    => m.n_features(),
            Classifier::Forest(m) => m.n_features,
            Classifier::Mlp(n)    => n.input_size(),
        }
    }

    /// Number of distinct indices `predict` can return.
    pub fn n_classes(&self) -> usize {
        match self {
            Classifier::Linear(m) => m.n_classes(),
            Classifier::Svc(m)    => m.n_classes(),
            Classifier::Forest(m) => m.n_classes,
            Classifier::Mlp(n)    => n.output_size().max(2),
        }
    }

    pub fn predict(&self, features: &[f64]) -> Result<usize> {
        let expected = self.n_features();
        if features.len() != expected {
            return Err(Error::DimensionMismatch {
                stage: Stage::Classifier,
                expected,
                actual: features.len(),
            });
        }

        let index = match self {
            Classifier::Linear(m) => m.predict(features),
            Classifier::Svc(m)    => m.predict(features),
            Classifier::Forest(m) => m.predict(features),
            Classifier::Mlp(n) => {
                let out = n.forward(features);
                if out.len() == 1 {
                    usize::from(out[0] > 0.5)
                } else {
                    super::argmax(&out)
                }
            }
        };
        Ok(index)
    }

    pub(crate) fn check_shape(&self) -> std::result::Result<(), String> {
        match self {
            Classifier::Linear(m) => m.check_shape(),
            Classifier::Svc(m)    => m.check_shape(),
            Classifier::Forest(m) => m.check_shape(),
            Classifier::Mlp(n)    => n.check_shape(),
        }
    }
}
