use serde::{Deserialize, Serialize};

/// One decision tree in scikit-learn's flat `tree_` layout.
///
/// Node `n` is a leaf when `children_left[n] == -1`. Otherwise samples with
/// `x[feature[n]] <= threshold[n]` go left, with `x` rounded to f32 first. `value[n]` holds the class
/// distribution (counts or fractions) seen at that node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

const LEAF: i64 = -1;

impl DecisionTree {
    fn leaf(&self, x: &[f64]) -> usize {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let f = self.feature[node] as usize;
            // Trees are fit on single-precision inputs; thresholds sit between f32 values.
            node = if (x[f] as f32 as f64) <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        node
    }

    /// Normalized class distribution at the leaf `x` lands in.
    pub fn predict_proba(&self, x: &[f64]) -> Vec<f64> {
        let dist = &self.value[self.leaf(x)];
        let total: f64 = dist.iter().sum();
        if total > 0.0 {
            dist.iter().map(|v| v / total).collect()
        } else {
            dist.clone()
        }
    }

    fn check_shape(&self, n_features: usize, n_classes: usize) -> Result<(), String> {
        let n = self.children_left.len();
        if n == 0 {
            return Err("tree has no nodes".into());
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err("tree node arrays have different lengths".into());
        }
        for node in 0..n {
            if self.value[node].len() != n_classes {
                return Err(format!(
                    "node {} has {} class values, expected {}", node, self.value[node].len(), n_classes
                ));
            }
            let (l, r) = (self.children_left[node], self.children_right[node]);
            if l == LEAF {
                continue;
            }
            // Children always come after their parent, which also rules out cycles.
            let in_range = |c: i64| c > node as i64 && (c as usize) < n;
            if !in_range(l) || !in_range(r) {
                return Err(format!("node {} has invalid children {} / {}", node, l, r));
            }
            let f = self.feature[node];
            if f < 0 || f as usize >= n_features {
                return Err(format!("node {} splits on feature {} of {}", node, f, n_features));
            }
        }
        Ok(())
    }
}

/// Ensemble of decision trees; the prediction is the argmax of the mean
/// per-tree class probabilities. A single decision tree is a forest of one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestModel {
    pub n_features: usize,
    pub n_classes: usize,
    pub trees: Vec<DecisionTree>,
}

impl ForestModel {
    pub fn predict(&self, x: &[f64]) -> usize {
        let mut acc = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (a, p) in acc.iter_mut().zip(tree.predict_proba(x)) {
                *a += p;
            }
        }
        // Dividing by the tree count does not change the argmax.
        super::argmax(&acc)
    }

    pub(crate) fn check_shape(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest has no trees".into());
        }
        if self.n_classes == 0 || self.n_features == 0 {
            return Err("forest must declare features and classes".into());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.check_shape(self.n_features, self.n_classes)
                .map_err(|e| format!("tree {}: {}", i, e))?;
        }
        Ok(())
    }
}
