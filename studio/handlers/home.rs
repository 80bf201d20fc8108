use std::io::Cursor;
use tiny_http::Response;

use crate::render::render_page;
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

pub fn handle_get(state: &SharedState) -> Response<Cursor<Vec<u8>>> {
    let page = render_page(&state.labels(), &[]);
    crate::routes::html_response(page)
}
