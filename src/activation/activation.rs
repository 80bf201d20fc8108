use serde::{Serialize, Deserialize};
use std::f64::consts::E;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    /// Logistic function; scikit-learn calls it `logistic`.
    Sigmoid,
    ReLU,
    Identity,
    /// Softmax is a vector-valued activation; it is applied at the layer level
    /// in `Layer::forward()` and never element-wise.
    Softmax,
    Tanh,
}

impl ActivationFunction {
    /// Element-wise activation. `Softmax` is the identity here; see
    /// `apply()` for the full-vector form.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::Identity | ActivationFunction::Softmax => x,
            ActivationFunction::Tanh => x.tanh(),
        }
    }

    /// Applies the activation to a whole pre-activation vector in place.
    pub fn apply(&self, z: &mut [f64]) {
        match self {
            ActivationFunction::Softmax => softmax(z),
            _ => z.iter_mut().for_each(|x| *x = self.function(*x)),
        }
    }
}

/// Numerically stable softmax (shifted by the max).
fn softmax(z: &mut [f64]) {
    let max = z.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mut sum = 0.0;
    for x in z.iter_mut() {
        *x = (*x - max).exp();
        sum += *x;
    }
    if sum > 0.0 {
        z.iter_mut().for_each(|x| *x /= sum);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn softmax_sums_to_one_and_keeps_order() {
        let mut z = vec![1.0, 3.0, 2.0];
        ActivationFunction::Softmax.apply(&mut z);
        assert!((z.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(z[1] > z[2] && z[2] > z[0]);
    }

    #[test]
    fn elementwise_variants() {
        let mut z = vec![-2.0, 0.5];
        ActivationFunction::ReLU.apply(&mut z);
        assert_eq!(z, vec![0.0, 0.5]);
        assert_eq!(ActivationFunction::Tanh.function(0.0), 0.0);
        assert!((ActivationFunction::Tanh.function(1.0) - 0.761_594_155_955_764_9).abs() < 1e-12);
        assert!((ActivationFunction::Sigmoid.function(0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn training_only_activations_are_not_accepted() {
        assert!(serde_json::from_str::<ActivationFunction>(r#"{"LeakyReLU":{"alpha":0.1}}"#).is_err());
        assert!(serde_json::from_str::<ActivationFunction>(r#""Gelu""#).is_err());
        assert_eq!(serde_json::from_str::<ActivationFunction>(r#""Tanh""#).unwrap(), ActivationFunction::Tanh);
    }
}
