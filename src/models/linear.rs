use serde::{Deserialize, Serialize};

use crate::math::matrix::Matrix;

/// Linear decision function (logistic regression, linear SVM).
///
/// `coef` has one row per class, or a single row for a binary problem in
/// which case a positive score selects class 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub coef: Matrix,
    pub intercept: Vec<f64>,
}

impl LinearModel {
    pub fn n_features(&self) -> usize {
        self.coef.cols
    }

    pub fn n_classes(&self) -> usize {
        if self.coef.rows == 1 { 2 } else { self.coef.rows }
    }

    pub fn decision_function(&self, x: &[f64]) -> Vec<f64> {
        self.coef
            .mul_vec(x)
            .into_iter()
            .zip(self.intercept.iter())
            .map(|(s, b)| s + b)
            .collect()
    }

    pub fn predict(&self, x: &[f64]) -> usize {
        let scores = self.decision_function(x);
        if scores.len() == 1 {
            return usize::from(scores[0] > 0.0);
        }
        super::argmax(&scores)
    }

    pub(crate) fn check_shape(&self) -> Result<(), String> {
        self.coef.check_shape()?;
        if self.coef.rows == 0 || self.coef.cols == 0 {
            return Err("linear model has an empty coefficient matrix".into());
        }
        if self.intercept.len() != self.coef.rows {
            return Err(format!(
                "{} intercepts for {} coefficient rows", self.intercept.len(), self.coef.rows
            ));
        }
        Ok(())
    }
}
