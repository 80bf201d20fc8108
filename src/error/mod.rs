pub mod error;

pub use error::{ArtifactKind, ArtifactLoadCause, Error, PreprocessingError, Result, Stage};
