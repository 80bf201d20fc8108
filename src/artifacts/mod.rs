pub mod loader;
pub mod paths;

pub use loader::{load_model, load_model_from, Artifacts};
pub use paths::ArtifactPaths;
