use serde::Deserialize;
use serde_json::Value;

use crate::{KakerRequestError, content::Content};

/// Where the generated text lives in a response
pub(crate) const TEXT_PATH: &str = "candidates[0].content.parts[0].text";

/// JSON pointer form of [`TEXT_PATH`]
const TEXT_POINTER: &str = "/candidates/0/content/parts/0/text";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<ResponseCandidate>,
    pub usage_metadata: Option<UsageMetadata>,
    pub model_version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseCandidate {
    #[serde(default)]
    pub content: Content,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.candidates.first()?.content.first_text()
    }
}

/// `{"error": {...}}` as sent by Google APIs
#[derive(Debug, Default, Deserialize)]
struct ApiErrorDetails {
    code: Option<i64>,
    message: Option<String>,
    status: Option<String>,
}

/// Error object of a decoded body, if there is one.
pub(crate) fn api_error(value: &Value) -> Option<KakerRequestError> {
    let error = value.get("error").filter(|e| !e.is_null())?;
    let details: ApiErrorDetails = serde_json::from_value(error.clone()).unwrap_or_default();

    Some(KakerRequestError::Api {
        message: details.message.unwrap_or_else(|| error.to_string()),
        code: details.code,
        status: details.status,
    })
}

/// Text at [`TEXT_PATH`], whatever the rest of the body looks like.
pub(crate) fn first_text(value: &Value) -> Option<&str> {
    value.pointer(TEXT_POINTER)?.as_str()
}

/// Debug event with the token counts of a body, when they decode.
pub(crate) fn log_usage(value: &Value) {
    let Ok(response) = GenerateContentResponse::deserialize(value) else {
        return;
    };
    if let Some(usage) = &response.usage_metadata {
        tracing::debug!(
            model_version = response.model_version.as_deref().unwrap_or("unknown"),
            prompt_tokens = usage.prompt_token_count,
            candidates_tokens = usage.candidates_token_count,
            total_tokens = usage.total_token_count,
            "token usage"
        );
    }
}

/// Turn a complete non-streaming body into the generated text.
///
/// # Errors
///
/// - `KakerRequestError::MalformedResponse` if the body is not JSON
/// - `KakerRequestError::Api` if the body carries an error object
/// - `KakerRequestError::UnexpectedShape` if there is no text where expected
pub(crate) fn extract_text(body: &[u8]) -> Result<String, KakerRequestError> {
    let value: Value = serde_json::from_slice(body).map_err(KakerRequestError::MalformedResponse)?;

    if let Some(err) = api_error(&value) {
        return Err(err);
    }

    log_usage(&value);

    let Some(text) = first_text(&value) else {
        let finish_reason = value
            .pointer("/candidates/0/finishReason")
            .and_then(Value::as_str);
        return Err(KakerRequestError::UnexpectedShape(match finish_reason {
            Some(reason) => format!("missing {TEXT_PATH} (finish reason {reason})"),
            None => format!("missing {TEXT_PATH}"),
        }));
    };

    Ok(text.to_owned())
}
