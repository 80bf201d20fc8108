use std::sync::Arc;
use cropscan::{Label, Predictor};

/// Environment variable overriding the listen address.
pub const ADDR_ENV: &str = "CROPSCAN_ADDR";
pub const DEFAULT_ADDR: &str = "127.0.0.1:7878";

/// Address to bind, from `$CROPSCAN_ADDR` or the default.
pub fn bind_addr() -> String {
    std::env::var(ADDR_ENV)
        .ok()
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ADDR.to_owned())
}

// ---------------------------------------------------------------------------
// Main state struct
// ---------------------------------------------------------------------------

/// Everything a handler needs. Immutable after startup, so no lock.
pub struct StudioState {
    pub predictor: Predictor,
}

impl StudioState {
    pub fn new(predictor: Predictor) -> Self {
        StudioState { predictor }
    }

    /// Every label the loaded decoder can produce, in class-index order.
    pub fn labels(&self) -> Vec<String> {
        self.predictor.artifacts().decoder().labels().map(Label::into_string).collect()
    }
}

/// Shared state passed to every handler.
pub type SharedState = Arc<StudioState>;
