use serde::{Deserialize, Serialize};

use crate::math::matrix::{dot, Matrix};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Kernel {
    Linear,
    Rbf { gamma: f64 },
    Poly { gamma: f64, coef0: f64, degree: i32 },
    Sigmoid { gamma: f64, coef0: f64 },
}

impl Kernel {
    pub fn eval(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            Kernel::Linear => dot(a, b),
            Kernel::Rbf { gamma } => {
                let d2: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum();
                (-gamma * d2).exp()
            }
            Kernel::Poly { gamma, coef0, degree } => (gamma * dot(a, b) + coef0).powi(*degree),
            Kernel::Sigmoid { gamma, coef0 } => (gamma * dot(a, b) + coef0).tanh(),
        }
    }
}

/// Kernel SVM with one-vs-one voting, in libsvm's internal layout.
///
/// Support vectors are grouped by class in index order, `n_support[c]` of
/// them for class `c`. For the pair `(i, j)`, `i < j`, the decision value is
/// positive when the pair votes for `i`. Export with scikit-learn's private
/// `_dual_coef_` / `_intercept_`, which keep that sign for binary problems
/// as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportVectorModel {
    pub kernel: Kernel,
    pub support_vectors: Matrix,
    pub n_support: Vec<usize>,
    /// `(n_classes - 1) × n_sv`.
    pub dual_coef: Matrix,
    /// One entry per class pair, in `(0,1), (0,2), .., (1,2), ..` order.
    pub intercept: Vec<f64>,
}

impl SupportVectorModel {
    pub fn n_features(&self) -> usize {
        self.support_vectors.cols
    }

    pub fn n_classes(&self) -> usize {
        self.n_support.len()
    }

    pub fn predict(&self, x: &[f64]) -> usize {
        let n_classes = self.n_classes();
        let kvalues: Vec<f64> = self
            .support_vectors
            .data
            .iter()
            .map(|sv| self.kernel.eval(sv, x))
            .collect();

        let mut start = Vec::with_capacity(n_classes);
        let mut offset = 0;
        for &n in &self.n_support {
            start.push(offset);
            offset += n;
        }

        let mut votes = vec![0usize; n_classes];
        let mut pair = 0;
        for i in 0..n_classes {
            for j in (i + 1)..n_classes {
                let (si, sj) = (start[i], start[j]);
                let (ci, cj) = (self.n_support[i], self.n_support[j]);
                let coef_i = &self.dual_coef.row(j - 1)[si..si + ci];
                let coef_j = &self.dual_coef.row(i)[sj..sj + cj];

                let sum = dot(coef_i, &kvalues[si..si + ci]) + dot(coef_j, &kvalues[sj..sj + cj]);
                if sum + self.intercept[pair] > 0.0 {
                    votes[i] += 1;
                } else {
                    votes[j] += 1;
                }
                pair += 1;
            }
        }

        let mut best = 0;
        for (c, &v) in votes.iter().enumerate() {
            if v > votes[best] {
                best = c;
            }
        }
        best
    }

    pub(crate) fn check_shape(&self) -> Result<(), String> {
        self.support_vectors.check_shape()?;
        self.dual_coef.check_shape()?;
        let k = self.n_classes();
        if k < 2 {
            return Err(format!("svc needs at least two classes, has {}", k));
        }
        let n_sv: usize = self.n_support.iter().sum();
        if n_sv != self.support_vectors.rows {
            return Err(format!(
                "n_support sums to {} but {} support vectors are stored", n_sv, self.support_vectors.rows
            ));
        }
        if self.dual_coef.rows != k - 1 || self.dual_coef.cols != n_sv {
            return Err(format!(
                "dual_coef is {}x{}, expected {}x{}", self.dual_coef.rows, self.dual_coef.cols, k - 1, n_sv
            ));
        }
        let pairs = k * (k - 1) / 2;
        if self.intercept.len() != pairs {
            return Err(format!("{} intercepts for {} class pairs", self.intercept.len(), pairs));
        }
        Ok(())
    }
}
