pub mod api;
pub mod home;
pub mod predict;

use std::io::Read;
use tiny_http::Request;

use crate::util::multipart::{extract_boundary, multipart_extract_file_by_name};

/// Name of the file input on the upload form and in API requests.
pub const UPLOAD_FIELD: &str = "image_file";

/// Uploads larger than this are rejected before decoding.
pub const MAX_UPLOAD_BYTES: u64 = 20 * 1024 * 1024;

/// Why an upload never reached the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadError {
    NotMultipart,
    TooLarge,
    Unreadable,
    MissingFile,
}

impl UploadError {
    pub fn message(self) -> &'static str {
        match self {
            UploadError::NotMultipart => "Expected a multipart/form-data upload.",
            UploadError::TooLarge     => "The uploaded file is too large.",
            UploadError::Unreadable   => "The request body could not be read.",
            UploadError::MissingFile  => "No image file was uploaded.",
        }
    }
}

/// Reads the request body and pulls out the `image_file` part.
pub fn read_image_upload(request: &mut Request) -> Result<Vec<u8>, UploadError> {
    let content_type = request.headers().iter()
        .find(|h| h.field.equiv("Content-Type"))
        .map(|h| h.value.as_str().to_owned())
        .unwrap_or_default();

    if !content_type.starts_with("multipart/form-data") {
        return Err(UploadError::NotMultipart);
    }
    let boundary = extract_boundary(&content_type).ok_or(UploadError::NotMultipart)?;

    let mut body: Vec<u8> = Vec::new();
    request.as_reader()
        .take(MAX_UPLOAD_BYTES + 1)
        .read_to_end(&mut body)
        .map_err(|_| UploadError::Unreadable)?;
    if body.len() as u64 > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge);
    }

    match multipart_extract_file_by_name(&body, &boundary, UPLOAD_FIELD) {
        Some(bytes) if !bytes.is_empty() => Ok(bytes),
        _ => Err(UploadError::MissingFile),
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
     .replace('<', "&lt;")
     .replace('>', "&gt;")
     .replace('"', "&quot;")
}
