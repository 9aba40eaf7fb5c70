use kaker_ox_common::CommonRequestError;
use serde::{Serialize, Serializer, ser::SerializeStruct};
use thiserror::Error;

/// Everything that can end a generate call.
///
/// None of these are retried by the client.
#[derive(Debug, Error)]
pub enum KakerRequestError {
    /// The client was configured with unusable values
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The connection layer failed: DNS, TLS, connect, timeout or body read
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The provider answered with a status other than `200 OK`
    #[error("HTTP error {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response body is not JSON
    #[error("Malformed response: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// The provider reported an error object in the body
    #[error("API error: {message}")]
    Api {
        message: String,
        code: Option<i64>,
        status: Option<String>,
    },

    /// The response is JSON but has no generated text where expected
    #[error("Unexpected response format: {0}")]
    UnexpectedShape(String),
}

impl KakerRequestError {
    /// HTTP status code carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<CommonRequestError> for KakerRequestError {
    fn from(err: CommonRequestError) -> Self {
        match err {
            CommonRequestError::Http(e) => Self::Transport(e),
            CommonRequestError::Status { status, body } => Self::HttpStatus { status, body },
            CommonRequestError::Json(e) => {
                Self::Configuration(format!("request body could not be encoded: {e}"))
            }
        }
    }
}

impl Serialize for KakerRequestError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            KakerRequestError::Configuration(message) => {
                let mut state = serializer.serialize_struct("KakerRequestError", 2)?;
                state.serialize_field("type", "Configuration")?;
                state.serialize_field("message", message)?;
                state.end()
            }
            KakerRequestError::Transport(e) => {
                let mut state = serializer.serialize_struct("KakerRequestError", 2)?;
                state.serialize_field("type", "Transport")?;
                state.serialize_field("error", &e.to_string())?;
                state.end()
            }
            KakerRequestError::HttpStatus { status, body } => {
                let mut state = serializer.serialize_struct("KakerRequestError", 3)?;
                state.serialize_field("type", "HttpStatus")?;
                state.serialize_field("status", status)?;
                state.serialize_field("body", body)?;
                state.end()
            }
            KakerRequestError::MalformedResponse(e) => {
                let mut state = serializer.serialize_struct("KakerRequestError", 2)?;
                state.serialize_field("type", "MalformedResponse")?;
                state.serialize_field("error", &e.to_string())?;
                state.end()
            }
            KakerRequestError::Api {
                message,
                code,
                status,
            } => {
                let field_count = 2 // type, message
                    + usize::from(code.is_some())
                    + usize::from(status.is_some());
                let mut state = serializer.serialize_struct("KakerRequestError", field_count)?;
                state.serialize_field("type", "Api")?;
                state.serialize_field("message", message)?;
                if let Some(c) = code {
                    state.serialize_field("code", c)?;
                }
                if let Some(s) = status {
                    state.serialize_field("status", s)?;
                }
                state.end()
            }
            KakerRequestError::UnexpectedShape(message) => {
                let mut state = serializer.serialize_struct("KakerRequestError", 2)?;
                state.serialize_field("type", "UnexpectedShape")?;
                state.serialize_field("message", message)?;
                state.end()
            }
        }
    }
}
