use serde::{Serialize, Deserialize};

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

/// Fully connected layer of an exported feed-forward classifier.
///
/// `weights` is `input_size × size`, the same orientation scikit-learn uses
/// for `MLPClassifier.coefs_`, so a row vector multiplies from the left.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer{
    pub weights: Matrix,
    pub biases: Vec<f64>,
    pub activation: ActivationFunction
}

impl Layer {
    pub fn new(weights: Matrix, biases: Vec<f64>, activation: ActivationFunction) -> Layer {
        Layer { weights, biases, activation }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    pub fn size(&self) -> usize {
        self.weights.cols
    }

    /// z = xW + b, then the activation.
    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut z = self.weights.vec_mul(input);
        for (zi, b) in z.iter_mut().zip(self.biases.iter()) {
            *zi += b;
        }
        self.activation.apply(&mut z);
        z
    }

    pub(crate) fn check_shape(&self) -> Result<(), String> {
        self.weights.check_shape()?;
        if self.biases.len() != self.size() {
            return Err(format!(
                "layer has {} biases for {} units", self.biases.len(), self.size()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_adds_bias_then_activates() {
        let layer = Layer::new(
            Matrix::from_data(vec![vec![1.0, -1.0], vec![2.0, 0.5]]),
            vec![0.5, -10.0],
            ActivationFunction::ReLU,
        );
        assert_eq!(layer.forward(&[1.0, 1.0]), vec![3.5, 0.0]);
        assert_eq!(layer.input_size(), 2);
        assert_eq!(layer.size(), 2);
    }

    #[test]
    fn bias_count_must_match_units() {
        let layer = Layer::new(Matrix::zeros(3, 2), vec![0.0], ActivationFunction::Identity);
        assert!(layer.check_shape().is_err());
    }
}
