use serde::Serialize;

pub mod request;
pub mod response;
pub mod stream;

pub use request::GenerateContentRequest;
pub use response::{GenerateContentResponse, ResponseCandidate, UsageMetadata};
pub use stream::{TextStream, fragment_from_line};

/// MIME type requested for every answer
pub const PLAIN_TEXT_MIME_TYPE: &str = "text/plain";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// The maximum number of tokens to include in a candidate.
    pub max_output_tokens: u32,
    /// Output response mimetype of the generated candidate text.
    pub response_mime_type: String,
}

impl GenerationConfig {
    #[must_use]
    pub fn plain_text(max_output_tokens: u32) -> Self {
        Self {
            max_output_tokens,
            response_mime_type: PLAIN_TEXT_MIME_TYPE.to_string(),
        }
    }
}
