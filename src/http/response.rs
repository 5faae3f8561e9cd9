//! Response construction for relayed images.
//!
//! The declared type is `image/png` unless passthrough mode is on and the
//! upstream sent an `image/*` type.

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};

use crate::config::ContentTypeMode;
use crate::relay::FetchedImage;

pub const DEFAULT_IMAGE_TYPE: &str = "image/png";

pub fn resolve_content_type(mode: ContentTypeMode, upstream: Option<&str>) -> HeaderValue {
    let fallback = HeaderValue::from_static(DEFAULT_IMAGE_TYPE);
    match mode {
        ContentTypeMode::Fixed => fallback,
        ContentTypeMode::Passthrough => upstream
            .map(str::trim)
            .filter(|ct| is_image_type(ct))
            .and_then(|ct| HeaderValue::from_str(ct).ok())
            .unwrap_or(fallback),
    }
}

fn is_image_type(content_type: &str) -> bool {
    content_type
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// 200 response carrying the upstream bytes unmodified.
pub fn image_response(image: FetchedImage, mode: ContentTypeMode) -> Response {
    let content_type = resolve_content_type(mode, image.content_type.as_deref());
    ([(header::CONTENT_TYPE, content_type)], image.bytes).into_response()
}
