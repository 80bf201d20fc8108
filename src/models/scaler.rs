use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, Stage};

/// Per-dimension affine normalization fit at training time.
///
/// Stored in `scaler.json` with a `kind` tag. Both forms are exact ports of
/// the corresponding scikit-learn transforms, including operation order, so
/// the scaled vector matches the training-side one bit for bit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    /// `(x - mean) / scale` (`StandardScaler`).
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min` (`MinMaxScaler`).
    MinMax { scale: Vec<f64>, min: Vec<f64> },
}

impl Scaler {
    /// Number of features the scaler was fit on.
    pub fn n_features(&self) -> usize {
        match self {
            Scaler::Standard { mean, .. } => mean.len(),
            Scaler::MinMax { scale, .. }  => scale.len(),
        }
    }

    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>> {
        let expected = self.n_features();
        if features.len() != expected {
            return Err(Error::DimensionMismatch {
                stage: Stage::Scaler,
                expected,
                actual: features.len(),
            });
        }

        let scaled = match self {
            Scaler::Standard { mean, scale } => features
                .iter()
                .zip(mean.iter().zip(scale.iter()))
                .map(|(x, (m, s))| (x - m) / s)
                .collect(),
            Scaler::MinMax { scale, min } => features
                .iter()
                .zip(scale.iter().zip(min.iter()))
                .map(|(x, (s, m))| x * s + m)
                .collect(),
        };
        Ok(scaled)
    }

    pub(crate) fn check_shape(&self) -> std::result::Result<(), String> {
        let (a, b, what) = match self {
            Scaler::Standard { mean, scale } => (mean, scale, "mean/scale"),
            Scaler::MinMax { scale, min }    => (scale, min, "scale/min"),
        };
        if a.is_empty() {
            return Err("scaler has no features".into());
        }
        if a.len() != b.len() {
            return Err(format!("{} lengths differ: {} vs {}", what, a.len(), b.len()));
        }
        if a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
            return Err("scaler parameters must be finite".into());
        }
        if let Scaler::Standard { scale, .. } = self {
            if let Some(i) = scale.iter().position(|&s| s == 0.0) {
                return Err(format!("standard scaler has zero scale at feature {}", i));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_centres_then_divides() {
        let scaler = Scaler::Standard { mean: vec![1.0, -2.0], scale: vec![2.0, 0.5] };
        assert_eq!(scaler.transform(&[3.0, -1.0]).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn min_max_multiplies_then_shifts() {
        let scaler = Scaler::MinMax { scale: vec![0.5, 2.0], min: vec![0.0, -1.0] };
        assert_eq!(scaler.transform(&[4.0, 1.0]).unwrap(), vec![2.0, 1.0]);
    }

    #[test]
    fn wrong_length_is_rejected_not_truncated() {
        let scaler = Scaler::Standard { mean: vec![0.0; 3], scale: vec![1.0; 3] };
        for len in [2, 4] {
            match scaler.transform(&vec![0.0; len]) {
                Err(Error::DimensionMismatch { stage: Stage::Scaler, expected: 3, actual }) => {
                    assert_eq!(actual, len)
                }
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn zero_scale_is_invalid() {
        let scaler = Scaler::Standard { mean: vec![0.0, 0.0], scale: vec![1.0, 0.0] };
        assert!(scaler.check_shape().unwrap_err().contains("feature 1"));
    }

    #[test]
    fn json_uses_kind_tag() {
        let scaler: Scaler =
            serde_json::from_str(r#"{"kind":"min_max","scale":[1.0],"min":[0.0]}"#).unwrap();
        assert_eq!(scaler.n_features(), 1);
    }
}
