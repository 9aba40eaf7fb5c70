use async_stream::try_stream;
use futures_util::{StreamExt, stream::BoxStream};
use kaker_ox_common::{CommonRequestError, data_payload};
use serde_json::Value;

use super::response::{api_error, first_text, log_usage};
use crate::KakerRequestError;

/// Lazy, forward-only sequence of generated text fragments.
///
/// Fragments arrive in the order the provider sent them and carry no
/// alignment guarantee with tokens or sentences. The sequence ends when the
/// server closes the connection.
pub type TextStream = BoxStream<'static, Result<String, KakerRequestError>>;

/// Extract the text fragment carried by one line of a streamed response.
///
/// Lines without the `data: ` marker, empty payloads, the `[DONE]` sentinel,
/// payloads that are not JSON and chunks without text all yield `None`.
#[must_use]
pub fn fragment_from_line(line: &str) -> Option<String> {
    let payload = data_payload(line)?;

    let value: Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "skipping stream chunk that is not JSON");
            return None;
        }
    };

    if let Some(err) = api_error(&value) {
        tracing::warn!(error = %err, "skipping stream chunk carrying an error");
        return None;
    }

    log_usage(&value);

    let fragment = first_text(&value).map(str::to_owned);
    if fragment.is_none() {
        tracing::debug!("skipping stream chunk without text");
    }
    fragment
}

/// Turn a stream of body lines into a stream of text fragments.
///
/// Transport errors end the sequence; malformed chunks are dropped.
pub(crate) fn text_fragments(
    lines: BoxStream<'static, Result<String, CommonRequestError>>,
) -> TextStream {
    Box::pin(try_stream! {
        let mut lines = lines;
        let mut emitted = 0usize;

        while let Some(line) = lines.next().await {
            let line = line?;
            if let Some(fragment) = fragment_from_line(&line) {
                emitted += 1;
                yield fragment;
            }
        }

        tracing::debug!(fragments = emitted, "stream finished");
    })
}
