//! Cross-origin decoration applied to every outgoing response.
//!
//! The requesting `Origin` is echoed back (or `*` when absent); allowed
//! methods and headers are fixed.

use axum::{
  extract::Request,
  http::{header, HeaderValue},
  middleware::Next,
  response::Response,
};

pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";

pub async fn decorate(req: Request, next: Next) -> Response {
  let origin = req
    .headers()
    .get(header::ORIGIN)
    .cloned()
    .unwrap_or_else(|| HeaderValue::from_static("*"));

  let mut res = next.run(req).await;
  let headers = res.headers_mut();
  headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
  headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
  headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
  res
}
