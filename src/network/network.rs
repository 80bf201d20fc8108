use crate::layers::dense::Layer;
use serde::{Serialize, Deserialize};

/// Feed-forward network exported from a trained multi-layer perceptron.
/// Inference only: `forward` takes `&self` and keeps no activations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
}

impl Network {
    pub fn new(layers: Vec<Layer>) -> Network {
        Network { layers }
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, |l| l.input_size())
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, |l| l.size())
    }

    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut current = input.to_vec();
        for layer in &self.layers {
            current = layer.forward(&current);
        }
        current
    }

    /// Every layer must be well-formed and feed the next one.
    pub fn check_shape(&self) -> Result<(), String> {
        if self.layers.is_empty() {
            return Err("network has no layers".into());
        }
        for (i, layer) in self.layers.iter().enumerate() {
            layer.check_shape().map_err(|e| format!("layer {}: {}", i, e))?;
        }
        for (i, pair) in self.layers.windows(2).enumerate() {
            if pair[0].size() != pair[1].input_size() {
                return Err(format!(
                    "layer {} outputs {} values but layer {} expects {}",
                    i, pair[0].size(), i + 1, pair[1].input_size()
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActivationFunction, Matrix};

    #[test]
    fn layers_must_chain() {
        let net = Network::new(vec![
            Layer::new(Matrix::zeros(4, 3), vec![0.0; 3], ActivationFunction::ReLU),
            Layer::new(Matrix::zeros(2, 2), vec![0.0; 2], ActivationFunction::Softmax),
        ]);
        assert!(net.check_shape().unwrap_err().contains("layer 1 expects 2"));
        assert!(Network::new(vec![]).check_shape().is_err());
    }

    #[test]
    fn forward_runs_every_layer() {
        let net = Network::new(vec![
            Layer::new(Matrix::from_data(vec![vec![1.0], vec![1.0]]), vec![0.0], ActivationFunction::Identity),
            Layer::new(Matrix::from_data(vec![vec![2.0, -2.0]]), vec![0.0, 0.0], ActivationFunction::Softmax),
        ]);
        assert!(net.check_shape().is_ok());
        let out = net.forward(&[0.5, 0.5]);
        assert_eq!(out.len(), 2);
        assert!(out[0] > out[1]);
        assert_eq!(net.input_size(), 2);
        assert_eq!(net.output_size(), 2);
    }
}
