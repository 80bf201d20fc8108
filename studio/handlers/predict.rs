use std::io::Cursor;
use tiny_http::{Request, Response};
use tracing::{info, warn};

use cropscan::{Diagnosis, ImageSource};

use crate::handlers::{html_escape, read_image_upload};
use crate::render::{display_name, render_page};
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// POST /predict
// ---------------------------------------------------------------------------

pub fn handle_post(request: &mut Request, state: &SharedState) -> Response<Cursor<Vec<u8>>> {
    let result_html = match read_image_upload(request) {
        Ok(bytes) => match state.predictor.diagnose(ImageSource::Bytes(&bytes)) {
            Ok(diagnosis) => {
                info!(label = %diagnosis.label, "prediction");
                diagnosis_html(&diagnosis)
            }
            Err(e) => {
                warn!(kind = e.kind_name(), "prediction failed: {}", e);
                error_html(&html_escape(&e.to_string()))
            }
        },
        Err(e) => error_html(e.message()),
    };

    let page = render_page(&state.labels(), &[("RESULT_SECTION", result_html.as_str())]);
    crate::routes::html_response(page)
}

// ---------------------------------------------------------------------------
// Result cards
// ---------------------------------------------------------------------------

fn diagnosis_html(diagnosis: &Diagnosis) -> String {
    let hero = html_escape(&display_name(diagnosis.label.as_str()));
    let details = match diagnosis.advice {
        Some(advice) => format!(
            r#"<div class="detail"><h3>Cause</h3><p>{cause}</p></div>
<div class="detail"><h3>Remedy</h3><p>{remedy}</p></div>"#,
            cause  = html_escape(advice.cause),
            remedy = html_escape(advice.remedy),
        ),
        None => r#"<div class="warn-box">No details available for this disease.</div>"#.to_owned(),
    };
    format!(
        r#"<div class="result-card"><h2>Result</h2>
<div class="prediction-hero">{hero}</div>
{details}
</div>"#,
        hero = hero, details = details
    )
}

fn error_html(msg: &str) -> String {
    format!(r#"<div class="result-card"><h2>Error</h2><div class="error-box">{}</div></div>"#, msg)
}
