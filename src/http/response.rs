//! HTTP response building module
//!
//! Provides builders for the fixed set of responses the mission routes emit.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

pub const TEXT_PLAIN: &str = "text/plain;charset=UTF-8";
pub const APPLICATION_JSON: &str = "application/json";

/// Build a plain text response
pub fn build_text_response(status: StatusCode, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", TEXT_PLAIN)
        .body(Full::new(body.into()))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a compact JSON response
///
/// A value that fails to serialize yields the generic 500 instead.
pub fn build_json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_vec(body) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_500_response();
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", APPLICATION_JSON)
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 400 response for a missing or empty `name` field
pub fn build_400_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::BAD_REQUEST, "Name parameter is required")
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::NOT_FOUND, "Not Found")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(allow: &str) -> Response<Full<Bytes>> {
    let mut response = build_text_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
    if let Ok(value) = allow.parse() {
        response.headers_mut().insert("Allow", value);
    }
    response
}

/// Build opaque 500 response; details go to the error log only
pub fn build_500_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_text_response() {
        let response = build_text_response(StatusCode::OK, "Hello, World!");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["Content-Type"], TEXT_PLAIN);
        assert_eq!(body_string(response).await, "Hello, World!");
    }

    #[tokio::test]
    async fn test_json_response_is_compact() {
        let response = build_json_response(
            StatusCode::OK,
            &serde_json::json!({"success": true, "tasks": []}),
        );
        assert_eq!(response.headers()["Content-Type"], APPLICATION_JSON);
        assert_eq!(body_string(response).await, r#"{"success":true,"tasks":[]}"#);
    }

    #[tokio::test]
    async fn test_error_responses() {
        let r400 = build_400_response();
        assert_eq!(r400.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(r400).await, "Name parameter is required");

        let r404 = build_404_response();
        assert_eq!(r404.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(r404).await, "Not Found");

        let r405 = build_405_response("POST");
        assert_eq!(r405.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(r405.headers()["Allow"], "POST");
        assert_eq!(body_string(r405).await, "Method not allowed");

        let r500 = build_500_response();
        assert_eq!(r500.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(r500).await, "Internal server error");
    }
}
