/// cropscan Studio
///
/// Browser front-end for the leaf-disease classifier. Upload a leaf photo
/// and get back the predicted disease with its cause and remedy. Served by a
/// synchronous tiny_http server; no JavaScript frameworks required.
///
/// Run with:
///   cargo run --bin studio --release
/// Then open http://127.0.0.1:7878
///
/// Environment:
///   CROPSCAN_MODEL_DIR  directory holding the trained artifacts (default `models`)
///   CROPSCAN_ADDR       listen address (default `127.0.0.1:7878`)
///   RUST_LOG            log filter (default `info`)

mod state;
mod render;
mod routes;
mod handlers;
mod util;

use std::sync::Arc;
use tiny_http::Server;
use tracing::info;

use cropscan::logger;
use cropscan::{PipelineConfig, Predictor};

use state::StudioState;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init();

    // Artifacts are loaded once, before the first request is accepted.
    let config    = PipelineConfig::from_env()?;
    let predictor = Predictor::load(&config)?;

    let addr   = state::bind_addr();
    let server = Server::http(&addr).map_err(|e| e as Box<dyn std::error::Error>)?;

    let shared_state = Arc::new(StudioState::new(predictor));

    println!("╔══════════════════════════════════════════════╗");
    println!("║          cropscan Studio                     ║");
    println!("╠══════════════════════════════════════════════╣");
    println!("║  Open in your browser:                       ║");
    println!("║  http://{:<37}║", addr);
    println!("╚══════════════════════════════════════════════╝");
    info!(%addr, "studio listening");

    // One thread per request; every thread shares the same read-only predictor.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
    Ok(())
}
