use thiserror::Error;

/// Errors raised by the shared HTTP plumbing
#[derive(Error, Debug)]
pub enum CommonRequestError {
    /// The connection layer failed (DNS, TLS, connect, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The request body could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a status other than `200 OK`
    #[error("HTTP {status}: {body}")]
    Status {
        /// Numeric HTTP status code
        status: u16,
        /// Raw response body, decoded lossily
        body: String,
    },
}

impl CommonRequestError {
    /// Build a status error from a response status and its raw body.
    #[must_use]
    pub fn from_status(status: reqwest::StatusCode, body: &[u8]) -> Self {
        Self::Status {
            status: status.as_u16(),
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }
}

/// Drop the request URL from a transport error.
///
/// Request URLs carry the API key as a query parameter, so every transport
/// error leaving this crate goes through here.
pub(crate) fn redact(err: reqwest::Error) -> CommonRequestError {
    CommonRequestError::Http(err.without_url())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_keeps_code_and_body() {
        let err = CommonRequestError::from_status(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            br#"{"error":{"message":"slow down"}}"#,
        );
        match err {
            CommonRequestError::Status { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, r#"{"error":{"message":"slow down"}}"#);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn status_error_decodes_invalid_utf8_lossily() {
        let err = CommonRequestError::from_status(reqwest::StatusCode::BAD_GATEWAY, &[0xff, b'o']);
        assert_eq!(err.to_string(), "HTTP 502: \u{fffd}o");
    }
}
