//! Rendering forwarder results as HTTP responses.
//!
//! # Responsibilities
//! - Write the envelope's status, headers and body verbatim
//! - Map envelopes without a status (and legacy errors) to 502
//!
//! # Design Decisions
//! - A REST gateway treats a proxy result without `statusCode` as malformed
//!   and answers 502; the HTTP front end does the same
//! - Internal error details never reach the body

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::forwarder::{fixed_headers, OutboundResponse};

impl IntoResponse for OutboundResponse {
    fn into_response(self) -> Response {
        let status = self
            .status_code
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::BAD_GATEWAY);

        let mut response = Response::new(Body::from(self.body.unwrap_or_default()));
        *response.status_mut() = status;

        let headers = response.headers_mut();
        for (name, value) in &self.headers {
            match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!(header = %name, "Dropping invalid response header"),
            }
        }

        response
    }
}

/// Response for an invocation that failed outright.
pub fn invocation_failure() -> Response {
    OutboundResponse {
        status_code: Some(StatusCode::BAD_GATEWAY.as_u16()),
        body: None,
        headers: fixed_headers(),
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
    use http_body_util::BodyExt;

    async fn body_string(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_complete_envelope() {
        let response = OutboundResponse::message(500, "Something was wrong").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(body_string(response).await, r#"{"message": "Something was wrong"}"#);
    }

    #[tokio::test]
    async fn test_headers_only_envelope() {
        let response = OutboundResponse::headers_only().into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(body_string(response).await, "");
    }

    #[tokio::test]
    async fn test_invocation_failure() {
        let response = invocation_failure();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(body_string(response).await, "");
    }
}
