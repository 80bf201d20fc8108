pub mod advice;

pub use advice::{known_labels, lookup, DiseaseAdvice};
