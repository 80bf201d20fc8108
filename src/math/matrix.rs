use serde::{Serialize, Deserialize};

/// Dense row-major matrix as stored in the model artifacts.
///
/// `rows` and `cols` are serialized alongside the data so that a truncated or
/// hand-edited artifact is caught by `check_shape()` at load time instead of
/// surfacing as an out-of-bounds index during inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data.first().map_or(0, |r| r.len()),
            data
        }
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i]
    }

    /// Verifies that the declared shape matches the stored rows.
    pub fn check_shape(&self) -> Result<(), String> {
        if self.data.len() != self.rows {
            return Err(format!("matrix declares {} rows but stores {}", self.rows, self.data.len()));
        }
        if let Some((i, row)) = self.data.iter().enumerate().find(|(_, r)| r.len() != self.cols) {
            return Err(format!(
                "matrix row {} has {} columns, expected {}", i, row.len(), self.cols
            ));
        }
        Ok(())
    }

    /// Matrix × column vector. `v.len()` must equal `cols`.
    pub fn mul_vec(&self, v: &[f64]) -> Vec<f64> {
        debug_assert_eq!(v.len(), self.cols);
        self.data.iter().map(|row| dot(row, v)).collect()
    }

    /// Row vector × matrix. `v.len()` must equal `rows`.
    pub fn vec_mul(&self, v: &[f64]) -> Vec<f64> {
        debug_assert_eq!(v.len(), self.rows);
        let mut res = vec![0.0; self.cols];
        for (x, row) in v.iter().zip(self.data.iter()) {
            for (acc, w) in res.iter_mut().zip(row.iter()) {
                *acc += x * w;
            }
        }
        res
    }
}

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
