pub mod classifier;
pub mod forest;
pub mod label_decoder;
pub mod linear;
pub mod scaler;
pub mod svm;

pub use classifier::Classifier;
pub use forest::{DecisionTree, ForestModel};
pub use label_decoder::{Label, LabelDecoder};
pub use linear::LinearModel;
pub use scaler::Scaler;
pub use svm::{Kernel, SupportVectorModel};

/// Index of the largest value; the first one wins on ties.
pub(crate) fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}
