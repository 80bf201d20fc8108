use std::io::Cursor;
use serde_json::json;
use tiny_http::{Request, Response};
use tracing::warn;

use cropscan::ImageSource;

use crate::handlers::read_image_upload;
use crate::routes::json_response;
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// POST /api/predict
// ---------------------------------------------------------------------------

/// `{label, cause, remedy}` on success. Failures carry `{error, kind}`:
/// 400 for a bad upload, 422 for a fault in this image, 500 for a fault in
/// the loaded artifacts.
pub fn handle_predict(request: &mut Request, state: &SharedState) -> Response<Cursor<Vec<u8>>> {
    let bytes = match read_image_upload(request) {
        Ok(b)  => b,
        Err(e) => {
            let body = json!({ "error": e.message(), "kind": "bad_request" });
            return json_response(400, body.to_string());
        }
    };

    match state.predictor.diagnose(ImageSource::Bytes(&bytes)) {
        Ok(d) => {
            let body = json!({
                "label":  d.label,
                "cause":  d.advice.map(|a| a.cause),
                "remedy": d.advice.map(|a| a.remedy),
            });
            json_response(200, body.to_string())
        }
        Err(e) => {
            warn!(kind = e.kind_name(), "prediction failed: {}", e);
            let status = if e.is_configuration_fault() { 500 } else { 422 };
            let body = json!({ "error": e.to_string(), "kind": e.kind_name() });
            json_response(status, body.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// GET /api/labels
// ---------------------------------------------------------------------------

pub fn handle_labels(state: &SharedState) -> Response<Cursor<Vec<u8>>> {
    let body = serde_json::Value::from(state.labels());
    json_response(200, body.to_string())
}
